use serde::{Deserialize, Serialize};

/// Article as returned by the upstream news-search API.
///
/// Treated as immutable input: the pipeline compares and selects articles
/// but never rewrites them. `published_at` stays a raw string because
/// upstream timestamps are occasionally missing or malformed and the
/// similarity window has to tolerate that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub source: ArticleSource,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: String,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
    #[serde(rename = "publishedAt", default)]
    pub published_at: String,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Item shape served to the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub cover: Option<String>,
    pub url: String,
    pub source: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
}

/// One deduplicated page of news.
///
/// `total` counts the unique articles found in the fetched batch, before
/// truncation to the requested page size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsPage {
    pub total: usize,
    pub domains: String,
    pub excluded: Vec<String>,
    pub items: Vec<NewsItem>,
}
