//! Search through a rendered engine results page. Most reliable, slowest.

use super::{HitFilter, ProviderKind, SearchProvider};
use crate::domain::{host_of, strip_www};
use crate::renderer::Renderer;
use crate::types::SearchResult;
use anyhow::{Context, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const NAME: &str = "browser";

/// Unwrap `/url?q=<target>&...` result links.
fn unwrap_result_link(href: &str) -> Option<String> {
    if let Some(rest) = href.strip_prefix("/url?") {
        return url::form_urlencoded::parse(rest.as_bytes())
            .find(|(k, _)| k == "q")
            .map(|(_, v)| v.into_owned());
    }
    Some(href.to_string())
}

/// Hosts that look like an education site.
fn looks_educational(host: &str) -> bool {
    host.contains(".edu") || host.contains(".ac.in") || host.contains("college")
}

/// Extract result links from a rendered results page: absolute links on
/// education-like hosts that pass `filter`, one per host.
pub fn parse_results(html: &str, max_results: usize, filter: HitFilter) -> Vec<SearchResult> {
    let doc = Html::parse_document(html);
    let Ok(anchor_sel) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut hits = Vec::new();
    for a in doc.select(&anchor_sel) {
        let Some(url) = a.value().attr("href").and_then(unwrap_result_link) else {
            continue;
        };
        if !url.starts_with("http") || !filter.keeps(&url) {
            continue;
        }
        let Some(host) = host_of(&url) else { continue };
        let host = strip_www(&host).to_string();
        if !looks_educational(&host) || !seen.insert(host.clone()) {
            continue;
        }
        let text = a.text().collect::<String>().trim().to_string();
        hits.push(SearchResult {
            url,
            title: if text.is_empty() { host } else { text },
            provider: NAME.to_string(),
        });
        if hits.len() >= max_results {
            break;
        }
    }
    hits
}

/// Renders the configured engine's results page in a fresh context.
pub struct BrowserSearch {
    renderer: Arc<dyn Renderer>,
    endpoint: String,
    timeout_ms: u64,
    settle_ms: u64,
}

impl BrowserSearch {
    pub fn new(
        renderer: Arc<dyn Renderer>,
        endpoint: impl Into<String>,
        timeout_ms: u64,
        settle_ms: u64,
    ) -> Self {
        Self {
            renderer,
            endpoint: endpoint.into(),
            timeout_ms,
            settle_ms,
        }
    }

    fn results_url(&self, query: &str) -> Result<String> {
        let url = Url::parse_with_params(&self.endpoint, &[("q", query)])
            .with_context(|| format!("invalid browser search endpoint {}", self.endpoint))?;
        Ok(url.to_string())
    }
}

#[async_trait]
impl SearchProvider for BrowserSearch {
    fn name(&self) -> &str {
        NAME
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Browser
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
        filter: HitFilter,
    ) -> Result<Vec<SearchResult>> {
        let url = self.results_url(query)?;
        let mut ctx = self.renderer.new_context().await?;

        let html = async {
            ctx.navigate(&url, self.timeout_ms).await?;
            tokio::time::sleep(Duration::from_millis(self.settle_ms)).await;
            ctx.get_html().await
        }
        .await;
        let _ = ctx.close().await;

        Ok(parse_results(&html?, max_results, filter))
    }
}
