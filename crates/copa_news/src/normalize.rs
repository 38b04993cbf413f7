use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;
use url::Url;

lazy_static! {
    /// Trailing publisher suffix: " - UOL", " | Metrópoles" and friends.
    static ref TITLE_SUFFIX: Regex = Regex::new(r"\s+[-–—|]\s+.*$").unwrap();
    /// Query parameters that only carry tracking state.
    static ref TRACKING_PARAM: Regex =
        Regex::new(r"(?i)^(utm_|gclid|fbclid|icid|cmp|cmpid|source|ref)").unwrap();
}

/// Host of a URL, lowercased and without a leading "www.". Unparseable
/// input yields an empty host, which no exclusion list matches.
pub fn host_of(u: &str) -> String {
    match Url::parse(u) {
        Ok(url) => {
            let host = url.host_str().unwrap_or("").to_lowercase();
            host.strip_prefix("www.").unwrap_or(&host).to_string()
        }
        Err(_) => String::new(),
    }
}

/// Canonical duplicate key for a URL: lowercase `host + path`, plus any
/// non-tracking query parameters in sorted order. Two syndicated copies
/// of one article differ only in tracking parameters and `www.`, so they
/// collapse to the same key. Unparseable URLs fall back to the raw
/// string.
pub fn canonical_key(u: &str) -> String {
    let Ok(url) = Url::parse(u) else {
        return u.to_string();
    };
    let host = url.host_str().unwrap_or("").to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    let mut kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !TRACKING_PARAM.is_match(k))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    kept.sort();

    let mut key = format!("{}{}", host, url.path()).to_lowercase();
    if !kept.is_empty() {
        let query = kept
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        key.push('?');
        key.push_str(&query.to_lowercase());
    }
    key
}

/// Lowercase, accent-stripped text with the trailing publisher suffix
/// removed and punctuation flattened to single spaces.
pub fn normalize_text(s: &str) -> String {
    let lower = s.to_lowercase();
    // NFD then drop the combining marks, so "seleção" folds to "selecao"
    let stripped: String = lower
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect();
    let no_suffix = TITLE_SUFFIX.replace(&stripped, "");
    let cleaned: String = no_suffix
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_ascii_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Useful words of a text: normalized, at least 3 chars, not purely
/// numeric. Order is preserved for bigram extraction.
pub fn tokens(s: &str) -> Vec<String> {
    normalize_text(s)
        .split(' ')
        .filter(|w| w.len() >= 3 && !w.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

/// Adjacent word pairs, joined by a single space.
pub fn bigrams(tokens: &[String]) -> BTreeSet<String> {
    tokens
        .windows(2)
        .map(|w| format!("{} {}", w[0], w[1]))
        .collect()
}
