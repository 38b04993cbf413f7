pub mod cache;
pub mod dedup;
pub mod fetch;
pub mod filter;
pub mod normalize;
pub mod rank;
pub mod service;
pub mod similarity;

pub use cache::MemoryCache;
pub use fetch::{NewsApiClient, NewsSource};
pub use service::{NewsQuery, NewsService, RawNewsQuery};
pub use similarity::Thresholds;

pub mod prelude {
    pub use super::{MemoryCache, NewsApiClient, NewsQuery, NewsService, RawNewsQuery};
    pub use copa_core::{Article, NewsItem, NewsPage, Result};
}
