//! Shared doubles for the integration tests: an in-memory site served
//! through the renderer traits and a scripted search provider.

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use campus_scout::renderer::{NavigationResult, RenderContext, Renderer};
use campus_scout::search::{HitFilter, ProviderKind, SearchProvider};
use campus_scout::{ScoutConfig, SearchResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Config with every delay removed.
pub fn fast_config() -> ScoutConfig {
    ScoutConfig {
        page_timeout_ms: 5_000,
        aggregator_timeout_ms: 5_000,
        snapshot_timeout_ms: 5_000,
        search_timeout_ms: 5_000,
        search_budget_ms: 5_000,
        settle_ms: 0,
        snapshot_settle_ms: 0,
        interaction_pause_ms: 0,
        ..Default::default()
    }
}

/// `count` distinct lines of roughly sixty characters about `subject`.
pub fn lines(subject: &str, count: usize) -> Vec<String> {
    (1..=count)
        .map(|i| format!("{subject} detail {i:02}: figures published for the current academic year"))
        .collect()
}

/// A page whose body holds one paragraph per line plus the given extra
/// markup (links, frames).
pub fn page(body_lines: &[String], extra: &str) -> String {
    let paragraphs: String = body_lines
        .iter()
        .map(|l| format!("<p>{l}</p>"))
        .collect();
    format!(
        "<html><head><title>Test</title><script>var x = 1;</script></head>\
         <body><nav><a href=\"/\">Home</a></nav><main>{paragraphs}{extra}</main></body></html>"
    )
}

#[derive(Default)]
struct Site {
    pages: HashMap<String, (u16, String)>,
    navigations: Vec<String>,
}

/// Renderer serving a fixed map of URL → (status, html). Unknown URLs fail
/// to navigate like an unreachable host.
#[derive(Clone, Default)]
pub struct StaticRenderer {
    site: Arc<Mutex<Site>>,
    open: Arc<AtomicUsize>,
}

impl StaticRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, html: String) -> Self {
        self.with_status(url, 200, html)
    }

    pub fn with_status(self, url: &str, status: u16, html: String) -> Self {
        self.site
            .lock()
            .unwrap()
            .pages
            .insert(url.to_string(), (status, html));
        self
    }

    /// Every URL navigated to, in order.
    pub fn navigations(&self) -> Vec<String> {
        self.site.lock().unwrap().navigations.clone()
    }
}

#[async_trait]
impl Renderer for StaticRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        self.open.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StaticContext {
            site: Arc::clone(&self.site),
            open: Arc::clone(&self.open),
            current: None,
        }))
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    fn active_contexts(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }
}

struct StaticContext {
    site: Arc<Mutex<Site>>,
    open: Arc<AtomicUsize>,
    current: Option<(String, String)>,
}

#[async_trait]
impl RenderContext for StaticContext {
    async fn navigate(&mut self, url: &str, _timeout_ms: u64) -> Result<NavigationResult> {
        let mut site = self.site.lock().unwrap();
        site.navigations.push(url.to_string());
        let (status, html) = site
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("net::ERR_NAME_NOT_RESOLVED at {url}"))?;
        self.current = Some((url.to_string(), html));
        Ok(NavigationResult {
            final_url: url.to_string(),
            status,
            load_time_ms: 1,
        })
    }

    async fn execute_js(&self, _script: &str) -> Result<serde_json::Value> {
        Ok(serde_json::json!(0))
    }

    async fn get_html(&self) -> Result<String> {
        self.current
            .as_ref()
            .map(|(_, html)| html.clone())
            .ok_or_else(|| anyhow!("nothing loaded"))
    }

    async fn get_url(&self) -> Result<String> {
        Ok(self
            .current
            .as_ref()
            .map(|(url, _)| url.clone())
            .unwrap_or_else(|| "about:blank".into()))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.open.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Search provider returning the same hits for every query and recording
/// what it was asked.
pub struct StaticProvider {
    name: &'static str,
    kind: ProviderKind,
    urls: Vec<(String, String)>,
    queries: Mutex<Vec<String>>,
}

impl StaticProvider {
    pub fn new(name: &'static str, kind: ProviderKind, hits: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            name,
            kind,
            urls: hits
                .iter()
                .map(|(u, t)| (u.to_string(), t.to_string()))
                .collect(),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for StaticProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
        filter: HitFilter,
    ) -> Result<Vec<SearchResult>> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self
            .urls
            .iter()
            .filter(|(url, _)| filter.keeps(url))
            .take(max_results)
            .map(|(url, title)| SearchResult {
                url: url.clone(),
                title: title.clone(),
                provider: self.name.to_string(),
            })
            .collect())
    }
}
