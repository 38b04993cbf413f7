use async_trait::async_trait;
use copa_core::{Article, Error, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

const EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";

/// Fixed subject filter; caller free text is ANDed onto it.
pub const BASE_QUERY: &str = "(\"liga feminina\" OR \"seleção feminina\" OR \"copa feminina\" OR \"libertadores feminina\" OR \"campeonato brasileiro feminino\")";

/// Upstream page-size floor and ceiling.
pub const FETCH_SIZE_MIN: u32 = 45;
pub const FETCH_SIZE_MAX: u32 = 100;

/// Over-fetch so the page survives exclusion and dedup losses.
pub fn fetch_size(requested: u32) -> u32 {
    (requested.saturating_mul(3)).clamp(FETCH_SIZE_MIN, FETCH_SIZE_MAX)
}

/// Effective upstream query, already validated and defaulted.
#[derive(Debug, Clone)]
pub struct FetchParams {
    pub query: String,
    pub language: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: u32,
    pub page_size: u32,
    /// Include whitelist forwarded to upstream; empty means unrestricted
    pub domains: String,
}

/// Seam over the upstream news-search API, so the pipeline can run
/// against a stub in tests.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn everything(&self, params: &FetchParams) -> Result<Vec<Article>>;
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(rename = "totalResults")]
    #[allow(dead_code)]
    total_results: Option<u32>,
    articles: Option<Vec<Article>>,
    message: Option<String>,
}

/// NewsAPI.org client for the `/v2/everything` endpoint.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: Client,
    api_key: String,
}

impl NewsApiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn everything(&self, params: &FetchParams) -> Result<Vec<Article>> {
        let mut query: Vec<(&str, String)> = vec![
            ("q", params.query.clone()),
            ("language", params.language.clone()),
            ("sortBy", "publishedAt".to_string()),
            ("page", params.page.to_string()),
            ("pageSize", params.page_size.to_string()),
        ];
        if let Some(from) = &params.from {
            query.push(("from", from.clone()));
        }
        if let Some(to) = &params.to {
            query.push(("to", to.clone()));
        }
        if !params.domains.is_empty() {
            query.push(("domains", params.domains.clone()));
        }

        debug!(
            page = params.page,
            page_size = params.page_size,
            "querying news upstream"
        );

        // every failure mode collapses into one taxonomy value; callers
        // never see raw upstream errors
        let resp = self
            .client
            .get(EVERYTHING_URL)
            .header("X-Api-Key", &self.api_key)
            .query(&query)
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::UpstreamUnavailable(e.to_string()))?;

        let body: EverythingResponse = resp
            .json()
            .await
            .map_err(|e| Error::UpstreamUnavailable(e.to_string()))?;

        if body.status != "ok" {
            warn!(status = %body.status, "news upstream rejected the query");
            return Err(Error::UpstreamUnavailable(
                body.message.unwrap_or(body.status),
            ));
        }

        Ok(body.articles.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_size_triples_with_bounds() {
        assert_eq!(fetch_size(12), 45); // 36 lifted to the floor
        assert_eq!(fetch_size(20), 60);
        assert_eq!(fetch_size(50), 100); // 150 capped at the ceiling
        assert_eq!(fetch_size(1), 45);
    }

    #[test]
    fn error_payload_decodes() {
        let raw = r#"{"status":"error","code":"apiKeyInvalid","message":"bad key"}"#;
        let body: EverythingResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(body.status, "error");
        assert_eq!(body.message.as_deref(), Some("bad key"));
        assert!(body.articles.is_none());
    }
}
