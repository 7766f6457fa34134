//! Core value types passed between the resolver, the search chain and the
//! retrieval pipeline.

use crate::topic::Topic;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How likely a candidate URL is the institution's official site.
///
/// The derived ordering sorts best-first: `High < Medium < Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn rank(&self) -> u8 {
        match self {
            ConfidenceTier::High => 0,
            ConfidenceTier::Medium => 1,
            ConfidenceTier::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    Curated,
    Registry,
    WebSearch,
}

/// A possible official web presence for a named institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionCandidate {
    pub name: String,
    /// Empty only for registry hits that still need a web search.
    pub url: String,
    pub confidence: ConfidenceTier,
    pub source: SourceTag,
    /// Locality string ("District, State") for registry hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl InstitutionCandidate {
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

/// One hit from a search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    /// Name of the provider that produced the hit.
    pub provider: String,
}

/// Whether content came from the institution itself or a third party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Official,
    Aggregator,
}

/// Extracted text for one topic, ready for the storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContentRecord {
    /// Topic the caller asked for.
    pub topic: Topic,
    /// What the content actually covers: the requested topic, or `General`
    /// when only the unspecific homepage fallback produced text.
    pub page_type: Topic,
    pub text: String,
    /// Set when the extractor hit its character cap.
    pub truncated: bool,
    pub source_url: String,
    pub origin: Origin,
    pub fetched_at: DateTime<Utc>,
}

impl PageContentRecord {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
