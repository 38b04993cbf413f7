use async_trait::async_trait;

use crate::news::NewsPage;

/// TTL-aware response cache for the news pipeline.
///
/// Implementations own expiry and eviction; an expired entry must report
/// as absent from `get`. Only successful pages are ever stored, so a
/// failed request is always retried fresh.
#[async_trait]
pub trait NewsCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<NewsPage>;

    async fn put(&self, key: String, page: NewsPage);
}
