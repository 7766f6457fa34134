//! DuckDuckGo Lite: a table of plain result links, cheap to fetch.

use super::{HitFilter, ProviderKind, SearchProvider};
use crate::acquisition::HttpClient;
use crate::types::SearchResult;
use anyhow::Result;
use async_trait::async_trait;
use scraper::{Html, Selector};
use url::Url;

const NAME: &str = "duckduckgo_lite";

/// Resolve a result href, unwrapping `/l/?uddg=<target>` redirect links.
pub fn unwrap_redirect(href: &str) -> Option<String> {
    let base = Url::parse("https://duckduckgo.com/").ok()?;
    let resolved = base.join(href).ok()?;
    if let Some((_, target)) = resolved.query_pairs().find(|(k, _)| k == "uddg") {
        return Some(target.into_owned());
    }
    Some(resolved.to_string())
}

/// Parse the Lite results table.
pub fn parse_results(html: &str, max_results: usize, filter: HitFilter) -> Vec<SearchResult> {
    let doc = Html::parse_document(html);
    let Ok(link_sel) = Selector::parse("a.result-link") else {
        return Vec::new();
    };

    doc.select(&link_sel)
        .filter_map(|a| {
            let url = unwrap_redirect(a.value().attr("href")?)?;
            if !url.starts_with("http") || is_engine_link(&url) || !filter.keeps(&url) {
                return None;
            }
            Some(SearchResult {
                url,
                title: a.text().collect::<String>().trim().to_string(),
                provider: NAME.to_string(),
            })
        })
        .take(max_results)
        .collect()
}

/// Internal DuckDuckGo links (ads, settings) that survive unwrapping.
fn is_engine_link(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.ends_with("duckduckgo.com")))
        .unwrap_or(false)
}

pub struct DuckDuckGoLite {
    client: HttpClient,
    endpoint: String,
}

impl DuckDuckGoLite {
    pub fn new(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoLite {
    fn name(&self) -> &str {
        NAME
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::LightText
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
        filter: HitFilter,
    ) -> Result<Vec<SearchResult>> {
        let resp = self
            .client
            .post_form(&self.endpoint, &[("q", query)])
            .await?
            .ensure_success()?
            .ensure_content(&["html"])?;
        Ok(parse_results(&resp.body, max_results, filter))
    }
}
