//! Institution name → ranked candidate official sites.
//!
//! The catalogs are consulted first. A curated hit with a URL answers the
//! request outright; a registry hit (identity without URL) sharpens the web
//! search query with its locality. Everything else goes through the search
//! chain and the confidence scorer.

pub mod confidence;
pub mod known;

use crate::catalog::Catalogs;
use crate::domain::{base_domain, host_of, is_excluded_domain, origin_of};
use crate::error::{ScoutError, ScoutResult};
use crate::search::SearchChain;
use crate::types::{InstitutionCandidate, SearchResult, SourceTag};
use std::collections::HashSet;
use tracing::info;

pub use confidence::score_confidence;
pub use known::lookup_known;

/// Shortest institution name accepted, after trimming.
pub const MIN_NAME_CHARS: usize = 3;

/// Default number of candidates returned.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Resolves institution names against the catalogs and the search chain.
pub struct CandidateResolver<'a> {
    catalogs: &'a Catalogs,
    search: &'a SearchChain,
}

impl<'a> CandidateResolver<'a> {
    pub fn new(catalogs: &'a Catalogs, search: &'a SearchChain) -> Self {
        Self { catalogs, search }
    }

    /// Ranked candidates for `name`, best first, at most `max_results`.
    ///
    /// An empty list means nothing was found. Names shorter than three
    /// characters are rejected.
    pub async fn resolve(
        &self,
        name: &str,
        force_web_search: bool,
        max_results: usize,
    ) -> ScoutResult<Vec<InstitutionCandidate>> {
        let name = name.trim();
        if name.chars().count() < MIN_NAME_CHARS {
            return Err(ScoutError::InvalidInput(format!(
                "institution name {name:?} is shorter than {MIN_NAME_CHARS} characters"
            )));
        }
        if max_results == 0 {
            return Ok(Vec::new());
        }

        let mut search_name = name.to_string();
        let mut institution = name.to_string();
        if force_web_search {
            info!("web search forced for {name:?}, skipping catalogs");
        } else {
            let known = lookup_known(self.catalogs, name);
            if known.iter().any(InstitutionCandidate::has_url) {
                info!("found {} catalog match(es) for {name:?}", known.len());
                return Ok(known
                    .into_iter()
                    .filter(InstitutionCandidate::has_url)
                    .take(max_results)
                    .collect());
            }
            if let Some(best) = known.first() {
                if best.source == SourceTag::Registry {
                    search_name = refined_name(best);
                    institution = best.name.clone();
                    info!("registry match {:?}, searching for its website", best.name);
                }
            }
        }

        let query = format!("{search_name} official website");
        info!("searching web: {query}");
        let hits = self.search.search(&query, max_results * 2).await;

        let candidates = rank_hits(&hits, &institution, max_results);
        info!("found {} candidate(s) for {name:?}", candidates.len());
        Ok(candidates)
    }
}

/// `"{name} {locality}"` for a registry hit.
fn refined_name(best: &InstitutionCandidate) -> String {
    match best.details.as_deref() {
        Some(details) if !details.is_empty() => format!("{} {}", best.name, details),
        _ => best.name.clone(),
    }
}

/// Turn raw hits into ranked candidates.
///
/// Hits are reduced to their origin, deduplicated by organisational
/// domain (first hit wins), scored against `institution`, stably sorted by
/// tier and only then capped.
pub fn rank_hits(
    hits: &[SearchResult],
    institution: &str,
    max_results: usize,
) -> Vec<InstitutionCandidate> {
    let mut seen = HashSet::new();
    let mut candidates: Vec<InstitutionCandidate> = hits
        .iter()
        .filter_map(|hit| {
            let origin = origin_of(&hit.url)?;
            let host = host_of(&origin)?;
            if is_excluded_domain(&host) || !seen.insert(base_domain(&host)) {
                return None;
            }
            let title = hit.title.trim();
            Some(InstitutionCandidate {
                name: if title.is_empty() {
                    format!("{institution} - {host}")
                } else {
                    title.to_string()
                },
                confidence: score_confidence(&origin, institution),
                url: origin,
                source: SourceTag::WebSearch,
                details: None,
            })
        })
        .collect();

    candidates.sort_by_key(|c| c.confidence);
    candidates.truncate(max_results);
    candidates
}
