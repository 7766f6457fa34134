//! Confidence scoring for a (candidate URL, institution name) pair.

use crate::domain::host_of;
use crate::types::ConfidenceTier;
use regex::Regex;
use std::sync::OnceLock;

/// Words too common in institution names to say anything about a domain.
const STOPWORDS: &[&str] = &["of", "the", "and", "for", "institute", "university", "college"];

fn official_suffixes() -> &'static [Regex] {
    static SUFFIXES: OnceLock<Vec<Regex>> = OnceLock::new();
    SUFFIXES.get_or_init(|| {
        [r"\.ac\.in$", r"\.edu\.in$", r"\.edu$", r"\.org\.in$", r"\.res\.in$"]
            .iter()
            .map(|p| Regex::new(p).expect("suffix regex is valid"))
            .collect()
    })
}

/// Name tokens longer than three characters that are not stopwords.
pub fn significant_tokens(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() > 3 && !STOPWORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Score how likely `url` is the official site of `name`.
///
/// Education/country suffixes are high outright. Otherwise the number of
/// significant name tokens found inside the host decides: two or more is
/// high, one is medium, none is low.
pub fn score_confidence(url: &str, name: &str) -> ConfidenceTier {
    let host = host_of(url).unwrap_or_else(|| url.to_lowercase());

    if official_suffixes().iter().any(|re| re.is_match(&host)) {
        return ConfidenceTier::High;
    }

    let matches = significant_tokens(name)
        .iter()
        .filter(|t| host.contains(t.as_str()))
        .count();
    match matches {
        0 => ConfidenceTier::Low,
        1 => ConfidenceTier::Medium,
        _ => ConfidenceTier::High,
    }
}
