//! SearXNG meta-search over a list of public instances.

use super::{HitFilter, ProviderKind, SearchProvider};
use crate::acquisition::HttpClient;
use crate::types::SearchResult;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

const NAME: &str = "searxng";

#[derive(Deserialize)]
struct SearxngResponse {
    #[serde(default)]
    results: Vec<SearxngHit>,
}

#[derive(Deserialize)]
struct SearxngHit {
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
}

/// Parse a SearXNG JSON response, keeping absolute http(s) hits that pass
/// `filter`.
pub fn parse_results(
    body: &str,
    max_results: usize,
    filter: HitFilter,
) -> Result<Vec<SearchResult>> {
    let parsed: SearxngResponse =
        serde_json::from_str(body).context("SearXNG response is not valid JSON")?;
    Ok(parsed
        .results
        .into_iter()
        .filter(|h| h.url.starts_with("http") && filter.keeps(&h.url))
        .take(max_results)
        .map(|h| SearchResult {
            url: h.url,
            title: h.title.trim().to_string(),
            provider: NAME.to_string(),
        })
        .collect())
}

/// Queries each instance in turn until one answers with hits.
pub struct SearxngSearch {
    client: HttpClient,
    instances: Vec<String>,
}

impl SearxngSearch {
    pub fn new(client: HttpClient, instances: Vec<String>) -> Self {
        Self { client, instances }
    }

    async fn query_instance(
        &self,
        instance: &str,
        query: &str,
        max_results: usize,
        filter: HitFilter,
    ) -> Result<Vec<SearchResult>> {
        let url = format!("{}/search", instance.trim_end_matches('/'));
        let resp = self
            .client
            .get(
                &url,
                &[("q", query), ("format", "json"), ("categories", "general")],
            )
            .await?
            .ensure_success()?
            .ensure_content(&["json"])?;
        parse_results(&resp.body, max_results, filter)
    }
}

#[async_trait]
impl SearchProvider for SearxngSearch {
    fn name(&self) -> &str {
        NAME
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::MetaSearch
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
        filter: HitFilter,
    ) -> Result<Vec<SearchResult>> {
        let mut failures = 0usize;
        for instance in &self.instances {
            match self.query_instance(instance, query, max_results, filter).await {
                Ok(hits) if !hits.is_empty() => {
                    debug!("searxng instance {instance} returned {} hits", hits.len());
                    return Ok(hits);
                }
                Ok(_) => debug!("searxng instance {instance} returned no hits"),
                Err(e) => {
                    failures += 1;
                    warn!("searxng instance {instance} failed: {e:#}");
                }
            }
        }
        if failures > 0 && failures == self.instances.len() {
            bail!("all {failures} SearXNG instances failed");
        }
        Ok(Vec::new())
    }
}
