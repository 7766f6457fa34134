//! Startpage results scraped from the HTML search page.

use super::{HitFilter, ProviderKind, SearchProvider};
use crate::acquisition::HttpClient;
use crate::types::SearchResult;
use anyhow::Result;
use async_trait::async_trait;
use scraper::{Html, Selector};

const NAME: &str = "startpage";

/// Parse a Startpage results page. A result needs both a link and a heading.
pub fn parse_results(html: &str, max_results: usize, filter: HitFilter) -> Vec<SearchResult> {
    let doc = Html::parse_document(html);
    let (Ok(result_sel), Ok(link_sel), Ok(title_sel)) = (
        Selector::parse(".w-gl__result"),
        Selector::parse("a.w-gl__result-url"),
        Selector::parse("h3"),
    ) else {
        return Vec::new();
    };

    let mut hits = Vec::new();
    for item in doc.select(&result_sel) {
        let Some(href) = item
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };
        let Some(title) = item
            .select(&title_sel)
            .next()
            .map(|h| h.text().collect::<String>().trim().to_string())
        else {
            continue;
        };
        if !href.starts_with("http") || !filter.keeps(href) {
            continue;
        }
        hits.push(SearchResult {
            url: href.to_string(),
            title,
            provider: NAME.to_string(),
        });
        if hits.len() >= max_results {
            break;
        }
    }
    hits
}

pub struct StartpageSearch {
    client: HttpClient,
    endpoint: String,
}

impl StartpageSearch {
    pub fn new(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl SearchProvider for StartpageSearch {
    fn name(&self) -> &str {
        NAME
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::ProxyText
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
        filter: HitFilter,
    ) -> Result<Vec<SearchResult>> {
        let resp = self
            .client
            .post_form(&self.endpoint, &[("query", query)])
            .await?
            .ensure_success()?
            .ensure_content(&["html"])?;
        Ok(parse_results(&resp.body, max_results, filter))
    }
}
