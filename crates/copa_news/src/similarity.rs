use chrono::DateTime;
use copa_core::Article;
use std::collections::BTreeSet;

use crate::normalize::{bigrams, canonical_key, normalize_text, tokens};

pub const SIM_TITLE_DEFAULT: f64 = 0.56;
pub const SIM_TITLE_MIN: f64 = 0.50;
pub const SIM_TITLE_MAX: f64 = 0.70;
pub const SIM_BIGRAM: f64 = 0.48;

/// Articles published further apart than this are never merged by the
/// token/bigram rules, keeping recurring topics (annual previews etc.)
/// apart.
pub const MERGE_WINDOW_DAYS: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub sim_title: f64,
    pub sim_bigram: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            sim_title: SIM_TITLE_DEFAULT,
            sim_bigram: SIM_BIGRAM,
        }
    }
}

impl Thresholds {
    /// Thresholds from the caller-supplied aggressiveness knob. Absent or
    /// non-numeric values fall back to the default; numeric values clamp
    /// into [0.50, 0.70]. The bigram threshold is fixed.
    pub fn from_knob(sim: Option<&str>) -> Self {
        let sim_title = sim
            .and_then(|s| s.trim().parse::<f64>().ok())
            .unwrap_or(SIM_TITLE_DEFAULT)
            .clamp(SIM_TITLE_MIN, SIM_TITLE_MAX);
        Self {
            sim_title,
            sim_bigram: SIM_BIGRAM,
        }
    }
}

/// Jaccard similarity of two sets; 0 when either set is empty.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let inter = a.intersection(b).count() as f64;
    inter / (a.len() as f64 + b.len() as f64 - inter)
}

/// Whether two publish timestamps lie within `days` of each other.
/// Malformed or missing timestamps count as within-window: merging on
/// bad upstream metadata beats fragmenting results.
pub fn within_days(a: &str, b: &str, days: i64) -> bool {
    let (Ok(ta), Ok(tb)) = (DateTime::parse_from_rfc3339(a), DateTime::parse_from_rfc3339(b))
    else {
        return true;
    };
    (ta - tb).num_seconds().abs() <= days * 86_400
}

fn comparison_text(a: &Article) -> String {
    format!(
        "{} {}",
        a.title.as_deref().unwrap_or(""),
        a.description.as_deref().unwrap_or("")
    )
}

/// Whether two articles cover the same story. Checks run in fixed order
/// and the first hit wins; every check is symmetric in its arguments.
pub fn is_duplicate(a: &Article, b: &Article, th: &Thresholds) -> bool {
    // 1) syndicated copies share a canonical URL
    if canonical_key(&a.url) == canonical_key(&b.url) {
        return true;
    }

    // 2) same headline, or a truncated/expanded variant of it
    let ta = normalize_text(a.title.as_deref().unwrap_or(""));
    let tb = normalize_text(b.title.as_deref().unwrap_or(""));
    if ta.is_empty() || tb.is_empty() {
        return false;
    }
    if ta == tb {
        return true;
    }
    if ta.len() > 18 && tb.len() > 18 && (ta.contains(&tb) || tb.contains(&ta)) {
        return true;
    }

    // 3) word overlap of title+description, inside the merge window
    let tok_a = tokens(&comparison_text(a));
    let tok_b = tokens(&comparison_text(b));
    let set_a: BTreeSet<String> = tok_a.iter().cloned().collect();
    let set_b: BTreeSet<String> = tok_b.iter().cloned().collect();
    if jaccard(&set_a, &set_b) >= th.sim_title
        && within_days(&a.published_at, &b.published_at, MERGE_WINDOW_DAYS)
    {
        return true;
    }

    // 4) adjacent-pair overlap catches rephrased word order
    if jaccard(&bigrams(&tok_a), &bigrams(&tok_b)) >= th.sim_bigram
        && within_days(&a.published_at, &b.published_at, MERGE_WINDOW_DAYS)
    {
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use copa_core::ArticleSource;

    fn article(url: &str, title: &str, description: &str, published_at: &str) -> Article {
        Article {
            source: ArticleSource {
                id: None,
                name: Some("test".into()),
            },
            author: None,
            title: Some(title.to_string()),
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
            url: url.to_string(),
            url_to_image: None,
            published_at: published_at.to_string(),
            content: None,
        }
    }

    #[test]
    fn knob_clamps_into_range() {
        assert_eq!(Thresholds::from_knob(Some("0.1")).sim_title, 0.50);
        assert_eq!(Thresholds::from_knob(Some("0.99")).sim_title, 0.70);
        assert_eq!(Thresholds::from_knob(Some("0.6")).sim_title, 0.6);
        assert_eq!(Thresholds::from_knob(None).sim_title, SIM_TITLE_DEFAULT);
        assert_eq!(
            Thresholds::from_knob(Some("aggressive")).sim_title,
            SIM_TITLE_DEFAULT
        );
    }

    #[test]
    fn jaccard_of_empty_sets_is_zero() {
        let empty = BTreeSet::new();
        let full: BTreeSet<String> = ["gol".to_string()].into_iter().collect();
        assert_eq!(jaccard(&empty, &full), 0.0);
        assert_eq!(jaccard(&empty, &empty), 0.0);
        assert_eq!(jaccard(&full, &full), 1.0);
    }

    #[test]
    fn malformed_timestamps_count_as_within_window() {
        assert!(within_days("not-a-date", "2025-08-01T00:00:00Z", 4));
        assert!(within_days("", "", 4));
        assert!(!within_days(
            "2025-08-01T00:00:00Z",
            "2025-08-10T00:00:00Z",
            4
        ));
    }

    #[test]
    fn tracking_params_make_exact_duplicates() {
        let a = article("https://x.com/a?utm_source=fb", "Primeira", "", "");
        let b = article("https://x.com/a", "Segunda coisa totalmente diferente", "", "");
        assert!(is_duplicate(&a, &b, &Thresholds::default()));
    }

    #[test]
    fn suffixed_headline_variants_are_duplicates() {
        let a = article(
            "https://x.com/a",
            "Seleção feminina vence a final",
            "",
            "2025-08-01T12:00:00Z",
        );
        let b = article(
            "https://y.com/b",
            "Seleção feminina vence a final - UOL",
            "",
            "2025-08-01T13:00:00Z",
        );
        assert!(is_duplicate(&a, &b, &Thresholds::default()));
        assert!(is_duplicate(&b, &a, &Thresholds::default()));
    }

    #[test]
    fn recurring_topic_a_year_apart_is_not_merged() {
        let a = article(
            "https://x.com/2024",
            "Copa feminina começa hoje com seis jogos",
            "Rodada de estreia da copa feminina",
            "2024-08-01T00:00:00Z",
        );
        // one word differs so the equality rule stays out of the way and
        // the decision lands on rules 3/4, whose window guard must reject
        let b = article(
            "https://y.com/2025",
            "Copa feminina começa amanhã com seis jogos",
            "Rodada de estreia da copa feminina",
            "2025-08-02T00:00:00Z",
        );
        assert!(!is_duplicate(&a, &b, &Thresholds::default()));
    }

    #[test]
    fn empty_titles_never_match_by_text() {
        let a = article("https://x.com/a", "", "", "");
        let b = article("https://y.com/b", "", "", "");
        assert!(!is_duplicate(&a, &b, &Thresholds::default()));
    }

    #[test]
    fn short_titles_need_exact_equality() {
        // "final da copa" is contained in the longer title, but at 13
        // normalized chars the containment rule must not fire; the year
        // gap keeps rules 3/4 out as well
        let a = article(
            "https://x.com/a",
            "Final da copa",
            "",
            "2024-08-01T00:00:00Z",
        );
        let b = article(
            "https://y.com/b",
            "Final da copa em São Paulo",
            "",
            "2025-08-01T00:00:00Z",
        );
        assert!(!is_duplicate(&a, &b, &Thresholds::default()));
    }

    #[test]
    fn long_title_containment_merges_regardless_of_dates() {
        let a = article(
            "https://x.com/a",
            "Seleção feminina vence a final",
            "",
            "2024-08-01T00:00:00Z",
        );
        let b = article(
            "https://y.com/b",
            "Urgente: Seleção feminina vence a final no Maracanã",
            "",
            "2025-08-01T00:00:00Z",
        );
        assert!(is_duplicate(&a, &b, &Thresholds::default()));
    }

    #[test]
    fn token_overlap_within_window_merges() {
        let a = article(
            "https://x.com/a",
            "Corinthians vence clássico da liga feminina",
            "Vitória no clássico paulista pela liga feminina",
            "2025-08-01T00:00:00Z",
        );
        let b = article(
            "https://y.com/b",
            "Liga feminina: Corinthians vence o clássico paulista",
            "Corinthians leva a vitória no clássico",
            "2025-08-02T00:00:00Z",
        );
        let th = Thresholds::default();
        assert!(is_duplicate(&a, &b, &th));
        assert!(is_duplicate(&b, &a, &th));
    }
}
