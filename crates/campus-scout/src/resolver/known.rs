//! Known-entity lookup against the reference catalogs.
//!
//! Runs before any web search. Exact keys win outright; otherwise the
//! curated catalog is scanned fuzzily, and only when that finds nothing is
//! the much larger registry scored.

use crate::catalog::{normalize_key, Catalogs, RegistryEntry};
use crate::types::{ConfidenceTier, InstitutionCandidate, SourceTag};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Maximum candidates returned by a fuzzy scan.
pub const MAX_FUZZY_MATCHES: usize = 5;
/// After this many strong (≥80) registry scores, token overlap is skipped.
const STRONG_MATCH_BUDGET: usize = 10;
const STRONG_SCORE: u32 = 80;

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+").expect("word regex is valid"))
}

/// All word tokens of `text`.
fn words(text: &str) -> HashSet<&str> {
    word_re().find_iter(text).map(|m| m.as_str()).collect()
}

/// Query tokens that are long enough to be meaningful.
pub fn query_tokens(name: &str) -> HashSet<String> {
    word_re()
        .find_iter(name)
        .map(|m| m.as_str())
        .filter(|w| w.chars().count() > 3)
        .map(str::to_string)
        .collect()
}

fn shared_tokens(query: &HashSet<String>, key: &str) -> usize {
    let key_words = words(key);
    query.iter().filter(|q| key_words.contains(q.as_str())).count()
}

/// Score a registry key against a normalized query.
///
/// Prefix → 90, substring → 80, otherwise 60 plus the shared token count
/// when at least two tokens overlap. `score_tokens` turns the overlap check
/// off once enough strong matches have been seen.
pub fn registry_score(
    key: &str,
    name: &str,
    query: &HashSet<String>,
    score_tokens: bool,
) -> Option<u32> {
    if key.starts_with(name) {
        return Some(90);
    }
    if key.contains(name) {
        return Some(STRONG_SCORE);
    }
    if score_tokens {
        let common = shared_tokens(query, key);
        if common >= 2 {
            return Some(60 + common as u32);
        }
    }
    None
}

fn registry_candidate(
    entry: &RegistryEntry,
    confidence: ConfidenceTier,
) -> InstitutionCandidate {
    let locality = entry.locality();
    InstitutionCandidate {
        name: entry.name.clone(),
        url: String::new(),
        confidence,
        source: SourceTag::Registry,
        details: (!locality.is_empty()).then_some(locality),
    }
}

/// Look a name up in the catalogs. Returns best-first candidates, possibly
/// none.
pub fn lookup_known(catalogs: &Catalogs, raw_name: &str) -> Vec<InstitutionCandidate> {
    let name = normalize_key(raw_name);
    if name.is_empty() {
        return Vec::new();
    }

    // 1. Exact curated key
    if let Some(entry) = catalogs.curated.get(&name) {
        return vec![InstitutionCandidate {
            name: entry.name.clone(),
            url: entry.url.clone(),
            confidence: ConfidenceTier::High,
            source: SourceTag::Curated,
            details: None,
        }];
    }

    // 2. Exact registry key: identity known, address unknown
    if let Some(entry) = catalogs.registry.get(&name) {
        return vec![registry_candidate(entry, ConfidenceTier::High)];
    }

    let query = query_tokens(&name);

    // 3. Fuzzy curated scan
    let mut matches: Vec<InstitutionCandidate> = catalogs
        .curated
        .iter()
        .filter_map(|(key, entry)| {
            let confidence = if name.contains(key) || key.contains(name.as_str()) {
                ConfidenceTier::High
            } else if shared_tokens(&query, key) >= 2 {
                ConfidenceTier::Medium
            } else {
                return None;
            };
            Some(InstitutionCandidate {
                name: entry.name.clone(),
                url: entry.url.clone(),
                confidence,
                source: SourceTag::Curated,
                details: None,
            })
        })
        .collect();

    if !matches.is_empty() {
        matches.sort_by_key(|c| c.confidence);
        matches.truncate(MAX_FUZZY_MATCHES);
        return matches;
    }

    // 4. Scored registry scan
    let mut scored: Vec<(u32, &RegistryEntry)> = Vec::new();
    let mut strong = 0usize;
    for (key, entry) in catalogs.registry.iter() {
        if let Some(score) = registry_score(key, &name, &query, strong < STRONG_MATCH_BUDGET) {
            if score >= STRONG_SCORE {
                strong += 1;
            }
            scored.push((score, entry));
        }
    }
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(MAX_FUZZY_MATCHES)
        .map(|(_, entry)| registry_candidate(entry, ConfidenceTier::Medium))
        .collect()
}
