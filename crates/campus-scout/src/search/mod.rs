//! Web search backends and the ordered chain that queries them.
//!
//! Providers are tried in priority order. The first provider whose response
//! is non-empty (after the exclusion filter, unless it is disabled) ends the
//! chain; errors, timeouts and empty responses fall through to the next one.
//! Results are never merged across providers.

pub mod browser;
pub mod duckduckgo;
pub mod searxng;
pub mod startpage;

use crate::domain::{host_of, is_excluded_domain};
use crate::types::SearchResult;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub use browser::BrowserSearch;
pub use duckduckgo::DuckDuckGoLite;
pub use searxng::SearxngSearch;
pub use startpage::StartpageSearch;

/// Broad class of a search backend, used to narrow the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Meta-search over public SearXNG instances.
    MetaSearch,
    /// Proxied engine results scraped from HTML.
    ProxyText,
    /// Lightweight HTML results page.
    LightText,
    /// Full browser automation; slowest.
    Browser,
}

/// Which hits a provider keeps while it collects results. Filtering
/// happens before the result limit is applied, so excluded hits never use
/// up a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitFilter {
    /// Drop hits on excluded domains.
    Official,
    /// Keep every hit.
    All,
}

impl HitFilter {
    pub fn keeps(&self, url: &str) -> bool {
        match self {
            HitFilter::Official => !is_excluded_hit(url),
            HitFilter::All => true,
        }
    }
}

/// A single web search backend.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short name recorded on every hit.
    fn name(&self) -> &str;

    fn kind(&self) -> ProviderKind;

    /// Run `query`, returning at most `max_results` hits that pass `filter`.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        filter: HitFilter,
    ) -> Result<Vec<SearchResult>>;
}

/// Ordered list of providers with a per-call timeout.
#[derive(Clone)]
pub struct SearchChain {
    providers: Vec<Arc<dyn SearchProvider>>,
    timeout: Duration,
}

impl SearchChain {
    pub fn new(providers: Vec<Arc<dyn SearchProvider>>, timeout_ms: u64) -> Self {
        Self {
            providers,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Provider names in priority order.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// A chain holding only the providers of the given kinds, in their
    /// original order.
    pub fn restricted_to(&self, kinds: &[ProviderKind]) -> SearchChain {
        SearchChain {
            providers: self
                .providers
                .iter()
                .filter(|p| kinds.contains(&p.kind()))
                .cloned()
                .collect(),
            timeout: self.timeout,
        }
    }

    /// Query the chain, dropping hits on excluded domains.
    pub async fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        self.run(query, max_results, HitFilter::Official).await
    }

    /// Query the chain without the exclusion filter.
    pub async fn search_unfiltered(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        self.run(query, max_results, HitFilter::All).await
    }

    async fn run(&self, query: &str, max_results: usize, filter: HitFilter) -> Vec<SearchResult> {
        for provider in &self.providers {
            let name = provider.name();
            let outcome = tokio::time::timeout(
                self.timeout,
                provider.search(query, max_results, filter),
            )
            .await;

            let hits = match outcome {
                Ok(Ok(hits)) => hits,
                Ok(Err(e)) => {
                    warn!("search provider {name} failed: {e:#}");
                    continue;
                }
                Err(_) => {
                    warn!(
                        "search provider {name} timed out after {}ms",
                        self.timeout.as_millis()
                    );
                    continue;
                }
            };

            let mut hits: Vec<SearchResult> =
                hits.into_iter().filter(|h| filter.keeps(&h.url)).collect();
            hits.truncate(max_results);

            if hits.is_empty() {
                debug!("search provider {name} returned nothing usable for {query:?}");
                continue;
            }

            info!("search provider {name} returned {} results", hits.len());
            return hits;
        }

        warn!("all search providers failed for {query:?}");
        Vec::new()
    }
}

/// A hit is excluded when its host is on the exclusion list or cannot be
/// determined at all.
pub fn is_excluded_hit(url: &str) -> bool {
    match host_of(url) {
        Some(host) => is_excluded_domain(&host),
        None => true,
    }
}
