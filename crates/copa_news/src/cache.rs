use async_trait::async_trait;
use copa_core::{NewsCache, NewsPage};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);
pub const DEFAULT_CAPACITY: usize = 256;

struct CacheEntry {
    inserted_at: Instant,
    page: NewsPage,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() >= ttl
    }
}

/// In-memory TTL cache for assembled news pages.
///
/// Expired entries are not swept; they report as absent on read and are
/// overwritten on the next recomputation. The capacity is a safety
/// valve for a long-lived process: a full cache first sheds expired
/// entries, then the oldest one.
pub struct MemoryCache {
    ttl: Duration,
    capacity: usize,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity,
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl NewsCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<NewsPage> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.is_expired(self.ttl) {
            return None;
        }
        Some(entry.page.clone())
    }

    async fn put(&self, key: String, page: NewsPage) {
        let mut entries = self.entries.write().await;
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            entries.retain(|_, e| !e.is_expired(self.ttl));
            if entries.len() >= self.capacity {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, e)| e.inserted_at)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    debug!(key = %oldest, "cache full, evicting oldest entry");
                    entries.remove(&oldest);
                }
            }
        }
        entries.insert(
            key,
            CacheEntry {
                inserted_at: Instant::now(),
                page,
            },
        );
    }
}
