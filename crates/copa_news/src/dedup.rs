use copa_core::Article;
use tracing::debug;

use crate::rank::{pick_better, DomainRank};
use crate::similarity::{is_duplicate, Thresholds};

/// Collapse a batch into unique representatives.
///
/// Articles arrive most-recent-first. Each one is scanned against the
/// current representatives and merges into the first duplicate it meets,
/// keeping the better version of the pair; otherwise it becomes a new
/// representative. One merge per incoming article: with three or more
/// mutually-similar articles this can miss the globally best grouping,
/// an accepted trade for linear-scan latency on batches capped at 100.
pub fn dedup_articles(batch: Vec<Article>, th: &Thresholds, rank: &DomainRank) -> Vec<Article> {
    let total = batch.len();
    let mut uniques: Vec<Article> = Vec::new();
    for article in batch {
        match uniques.iter().position(|b| is_duplicate(&article, b, th)) {
            Some(i) => {
                let existing = uniques[i].clone();
                uniques[i] = pick_better(article, existing, rank);
            }
            None => uniques.push(article),
        }
    }
    debug!(total, uniques = uniques.len(), "dedup pass complete");
    uniques
}

#[cfg(test)]
mod tests {
    use super::*;
    use copa_core::ArticleSource;

    fn article(url: &str, title: &str, published_at: &str) -> Article {
        Article {
            source: ArticleSource {
                id: None,
                name: None,
            },
            author: None,
            title: Some(title.to_string()),
            description: None,
            url: url.to_string(),
            url_to_image: None,
            published_at: published_at.to_string(),
            content: None,
        }
    }

    #[test]
    fn output_contains_no_duplicate_pair() {
        let th = Thresholds::default();
        let rank = DomainRank::new("");
        let batch = vec![
            // image bonus keeps this one as the surviving representative
            Article {
                url_to_image: Some("https://a.com/final.jpg".into()),
                ..article(
                    "https://a.com/final",
                    "Seleção feminina vence a final",
                    "2025-08-01T12:00:00Z",
                )
            },
            article(
                "https://b.com/final",
                "Seleção feminina vence a final - UOL",
                "2025-08-01T13:00:00Z",
            ),
            article(
                "https://c.com/rodada",
                "Rodada do brasileirão feminino tem goleada",
                "2025-08-01T10:00:00Z",
            ),
            article(
                "https://a.com/final?utm_source=tw",
                "Qualquer outro título",
                "2025-08-01T09:00:00Z",
            ),
        ];
        let uniques = dedup_articles(batch, &th, &rank);
        assert_eq!(uniques.len(), 2);
        for (i, a) in uniques.iter().enumerate() {
            for b in uniques.iter().skip(i + 1) {
                assert!(!is_duplicate(a, b, &th));
            }
        }
    }

    #[test]
    fn merge_keeps_the_better_version() {
        let th = Thresholds::default();
        let rank = DomainRank::new("ge.globo.com");
        let unranked = article(
            "https://other.com/final",
            "Seleção feminina vence a final",
            "2025-08-01T12:00:00Z",
        );
        let preferred = article(
            "https://ge.globo.com/final",
            "Seleção feminina vence a final - ge",
            "2025-08-01T11:00:00Z",
        );
        let uniques = dedup_articles(vec![unranked, preferred.clone()], &th, &rank);
        assert_eq!(uniques.len(), 1);
        assert_eq!(uniques[0].url, preferred.url);
    }

    #[test]
    fn distinct_articles_all_survive() {
        let th = Thresholds::default();
        let rank = DomainRank::new("");
        let batch = vec![
            article("https://a.com/1", "Arbitragem define escala da semifinal", ""),
            article("https://b.com/2", "Ingressos esgotados para o clássico", ""),
            article("https://c.com/3", "Treinadora convoca três novidades", ""),
        ];
        let uniques = dedup_articles(batch, &th, &rank);
        assert_eq!(uniques.len(), 3);
    }
}
