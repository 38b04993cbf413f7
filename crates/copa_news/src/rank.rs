use chrono::DateTime;
use copa_core::Article;
use std::collections::HashMap;

use crate::normalize::host_of;

/// Unlisted domains all share the worst rank.
const UNRANKED: usize = 99;

/// Domain preference taken from the include list: the first entry ranks
/// best.
#[derive(Debug, Clone, Default)]
pub struct DomainRank {
    rank: HashMap<String, usize>,
}

impl DomainRank {
    pub fn new(include_csv: &str) -> Self {
        let mut rank = HashMap::new();
        for (i, entry) in include_csv
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .enumerate()
        {
            let domain = entry.to_lowercase();
            let domain = domain.strip_prefix("www.").unwrap_or(&domain).to_string();
            rank.insert(domain, i);
        }
        Self { rank }
    }

    fn index_of(&self, host: &str) -> usize {
        self.rank.get(host).copied().unwrap_or(UNRANKED)
    }
}

fn has_text(s: &Option<String>) -> bool {
    s.as_deref().is_some_and(|v| !v.is_empty())
}

fn recency_score(a: &Article) -> f64 {
    match DateTime::parse_from_rfc3339(&a.published_at) {
        // small monotonic nudge toward newer articles
        Ok(t) => t.timestamp_millis() as f64 / 1e11,
        Err(_) => 0.0,
    }
}

fn score(a: &Article, rank: &DomainRank) -> f64 {
    let domain = 100.0 - rank.index_of(&host_of(&a.url)) as f64;
    let image = if has_text(&a.url_to_image) { 3.0 } else { 0.0 };
    let description = if has_text(&a.description) { 1.0 } else { 0.0 };
    domain + image + description + recency_score(a)
}

/// The better of two duplicate articles: preferred domain, then image,
/// then description, then recency. `a` wins exact ties.
pub fn pick_better(a: Article, b: Article, rank: &DomainRank) -> Article {
    if score(&a, rank) >= score(&b, rank) {
        a
    } else {
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copa_core::ArticleSource;

    fn article(url: &str, published_at: &str) -> Article {
        Article {
            source: ArticleSource {
                id: None,
                name: None,
            },
            author: None,
            title: Some("t".into()),
            description: None,
            url: url.to_string(),
            url_to_image: None,
            published_at: published_at.to_string(),
            content: None,
        }
    }

    #[test]
    fn ranked_domain_beats_unranked() {
        let rank = DomainRank::new("ge.globo.com,terra.com.br");
        let preferred = article("https://ge.globo.com/x", "2025-08-01T00:00:00Z");
        let other = article("https://obscure.example.com/x", "2025-08-01T00:00:00Z");
        let winner = pick_better(other.clone(), preferred.clone(), &rank);
        assert_eq!(winner.url, preferred.url);
    }

    #[test]
    fn image_beats_bare_article_on_same_domain() {
        let rank = DomainRank::new("");
        let with_image = Article {
            url_to_image: Some("https://x.com/img.jpg".into()),
            ..article("https://x.com/a", "2025-08-01T00:00:00Z")
        };
        let bare = article("https://x.com/b", "2025-08-01T00:00:00Z");
        let winner = pick_better(bare, with_image.clone(), &rank);
        assert_eq!(winner.url, with_image.url);
    }

    #[test]
    fn empty_image_url_counts_as_absent() {
        let rank = DomainRank::new("");
        let blank_image = Article {
            url_to_image: Some(String::new()),
            ..article("https://x.com/a", "2025-08-01T00:00:00Z")
        };
        let described = Article {
            description: Some("tem resumo".into()),
            ..article("https://x.com/b", "2025-08-01T00:00:00Z")
        };
        let winner = pick_better(blank_image, described.clone(), &rank);
        assert_eq!(winner.url, described.url);
    }

    #[test]
    fn recency_breaks_otherwise_equal_scores() {
        let rank = DomainRank::new("");
        let older = article("https://x.com/old", "2025-08-01T00:00:00Z");
        let newer = article("https://x.com/new", "2025-08-03T00:00:00Z");
        let winner = pick_better(older, newer.clone(), &rank);
        assert_eq!(winner.url, newer.url);
    }

    #[test]
    fn first_argument_wins_exact_ties() {
        let rank = DomainRank::new("");
        let a = article("https://x.com/a", "2025-08-01T00:00:00Z");
        let b = article("https://x.com/b", "2025-08-01T00:00:00Z");
        let winner = pick_better(a.clone(), b, &rank);
        assert_eq!(winner.url, a.url);
    }

    #[test]
    fn rank_list_strips_www_and_case() {
        let rank = DomainRank::new(" WWW.GE.globo.com , terra.com.br ");
        assert_eq!(rank.index_of("ge.globo.com"), 0);
        assert_eq!(rank.index_of("terra.com.br"), 1);
        assert_eq!(rank.index_of("uol.com.br"), UNRANKED);
    }
}
