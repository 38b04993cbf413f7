use copa_core::{Article, Error, NewsCache, NewsItem, NewsPage, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, info};

use crate::dedup::dedup_articles;
use crate::fetch::{fetch_size, FetchParams, NewsSource, BASE_QUERY};
use crate::filter::DomainExcluder;
use crate::normalize::host_of;
use crate::rank::DomainRank;
use crate::similarity::Thresholds;

pub const DEFAULT_LANGUAGE: &str = "pt";
pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const DEFAULT_INCLUDE: &str = "";
pub const DEFAULT_EXCLUDE: &str = "ig.com.br,sapo.pt";

/// Query parameters exactly as they arrive on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNewsQuery {
    pub q: Option<String>,
    pub language: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
    pub domains: Option<String>,
    #[serde(rename = "excludeDomains")]
    pub exclude_domains: Option<String>,
    pub sim: Option<String>,
}

/// Validated effective query. Serialization of this struct is the cache
/// key, so the field set and order pin the key shape.
#[derive(Debug, Clone, Serialize)]
pub struct NewsQuery {
    pub query: String,
    pub language: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: u32,
    pub page_size: u32,
    pub include_csv: String,
    pub exclude_csv: String,
    pub sim: f64,
}

fn parse_positive(raw: Option<&str>, default: u32, field: &str) -> Result<u32> {
    match raw {
        None => Ok(default),
        Some(s) if s.trim().is_empty() => Ok(default),
        Some(s) => match s.trim().parse::<u32>() {
            Ok(v) if v > 0 => Ok(v),
            _ => Err(Error::InvalidRequest(format!(
                "{} must be a positive integer",
                field
            ))),
        },
    }
}

fn non_blank(value: Option<String>, default: &str) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => default.to_string(),
    }
}

impl NewsQuery {
    pub fn from_raw(raw: RawNewsQuery) -> Result<Self> {
        let page = parse_positive(raw.page.as_deref(), 1, "page")?;
        let page_size = parse_positive(raw.page_size.as_deref(), DEFAULT_PAGE_SIZE, "pageSize")?;
        let sim = Thresholds::from_knob(raw.sim.as_deref()).sim_title;

        let free_text = raw.q.unwrap_or_default();
        let query = if free_text.trim().is_empty() {
            BASE_QUERY.to_string()
        } else {
            format!("{} AND {}", BASE_QUERY, free_text.trim())
        };

        Ok(Self {
            query,
            language: non_blank(raw.language, DEFAULT_LANGUAGE),
            from: raw.from,
            to: raw.to,
            page,
            page_size,
            include_csv: non_blank(raw.domains, DEFAULT_INCLUDE),
            exclude_csv: non_blank(raw.exclude_domains, DEFAULT_EXCLUDE),
            sim,
        })
    }

    /// Canonical serialization of every effective parameter.
    pub fn cache_key(&self) -> String {
        serde_json::to_string(self).expect("query serializes")
    }

    fn thresholds(&self) -> Thresholds {
        Thresholds {
            sim_title: self.sim,
            ..Thresholds::default()
        }
    }
}

/// Fixed-length id derived from the article URL.
pub fn article_id(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    digest
        .iter()
        .take(8)
        .map(|b| format!("{:02x}", b))
        .collect()
}

fn to_item(a: Article) -> NewsItem {
    NewsItem {
        id: article_id(&a.url),
        title: a.title,
        excerpt: a.description,
        cover: a.url_to_image.filter(|s| !s.is_empty()),
        source: a.source.name,
        url: a.url,
        published_at: a.published_at,
    }
}

/// Runs the full pipeline: cache → fetch → exclude → dedup → page.
pub struct NewsService {
    source: Arc<dyn NewsSource>,
    cache: Arc<dyn NewsCache>,
}

impl NewsService {
    pub fn new(source: Arc<dyn NewsSource>, cache: Arc<dyn NewsCache>) -> Self {
        Self { source, cache }
    }

    pub async fn fetch_page(&self, query: &NewsQuery) -> Result<NewsPage> {
        let key = query.cache_key();
        if let Some(page) = self.cache.get(&key).await {
            debug!(page = query.page, "news cache hit");
            return Ok(page);
        }

        let batch = self
            .source
            .everything(&FetchParams {
                query: query.query.clone(),
                language: query.language.clone(),
                from: query.from.clone(),
                to: query.to.clone(),
                page: query.page,
                page_size: fetch_size(query.page_size),
                domains: query.include_csv.clone(),
            })
            .await?;

        let excluder = DomainExcluder::new(&query.exclude_csv);
        let rank = DomainRank::new(&query.include_csv);

        let kept: Vec<Article> = batch
            .into_iter()
            .filter(|a| !excluder.is_excluded(&host_of(&a.url)))
            .collect();
        let uniques = dedup_articles(kept, &query.thresholds(), &rank);

        let total = uniques.len();
        let items: Vec<NewsItem> = uniques
            .into_iter()
            .map(to_item)
            .take(query.page_size as usize)
            .collect();

        let page = NewsPage {
            total,
            domains: query.include_csv.clone(),
            excluded: query
                .exclude_csv
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            items,
        };

        info!(total, served = page.items.len(), "news page assembled");
        self.cache.put(key, page.clone()).await;
        Ok(page)
    }
}
