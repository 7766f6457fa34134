//! The `Scout` facade: one handle bundling the catalogs, the search chain,
//! the renderer and the configuration, exposing every discovery operation.

use crate::adequacy;
use crate::acquisition::HttpClient;
use crate::catalog::Catalogs;
use crate::config::ScoutConfig;
use crate::error::ScoutResult;
use crate::renderer::chromium::ChromiumRenderer;
use crate::renderer::{NoopRenderer, Renderer};
use crate::resolver::CandidateResolver;
use crate::retrieval::{aggregator, snapshot, survey, topic};
use crate::search::{
    BrowserSearch, DuckDuckGoLite, SearchChain, SearchProvider, SearxngSearch, StartpageSearch,
};
use crate::topic::Topic;
use crate::types::{InstitutionCandidate, PageContentRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// When the aggregator fallback runs during [`Scout::gather_topic_content`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregatorPolicy {
    /// Only when the official site yields nothing adequate.
    #[default]
    Gated,
    /// Always, alongside the official content.
    AlwaysMerge,
}

/// Content discovery engine. Cheap to clone and safe to share.
#[derive(Clone)]
pub struct Scout {
    catalogs: Arc<Catalogs>,
    search: SearchChain,
    renderer: Arc<dyn Renderer>,
    config: Arc<ScoutConfig>,
}

impl Scout {
    pub fn new(
        catalogs: Arc<Catalogs>,
        search: SearchChain,
        renderer: Arc<dyn Renderer>,
        config: Arc<ScoutConfig>,
    ) -> Self {
        Self {
            catalogs,
            search,
            renderer,
            config,
        }
    }

    /// Load the catalogs, launch Chromium (or fall back to the no-op
    /// renderer) and build the standard provider chain.
    pub async fn with_defaults(config: ScoutConfig) -> Self {
        let catalogs = Arc::new(Catalogs::load(&config));
        let renderer: Arc<dyn Renderer> = match ChromiumRenderer::new(&config.user_agent).await {
            Ok(r) => {
                info!("chromium renderer ready");
                Arc::new(r)
            }
            Err(e) => {
                warn!("{e:#}; page rendering disabled");
                Arc::new(NoopRenderer)
            }
        };
        let search = default_search_chain(&config, Arc::clone(&renderer));
        Self::new(catalogs, search, renderer, Arc::new(config))
    }

    pub fn config(&self) -> &ScoutConfig {
        &self.config
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn search_chain(&self) -> &SearchChain {
        &self.search
    }

    /// Ranked candidate official sites for an institution name.
    pub async fn resolve(
        &self,
        name: &str,
        force_web_search: bool,
        max_results: usize,
    ) -> ScoutResult<Vec<InstitutionCandidate>> {
        CandidateResolver::new(&self.catalogs, &self.search)
            .resolve(name, force_web_search, max_results)
            .await
    }

    /// Topic content from the institution's own site.
    pub async fn fetch_topic_content(
        &self,
        base_url: &str,
        topic: Topic,
    ) -> ScoutResult<Option<PageContentRecord>> {
        topic::fetch_topic_content(self.renderer.as_ref(), &self.config, base_url, topic).await
    }

    /// Topic content from a third-party aggregator page.
    pub async fn fetch_aggregator_content(
        &self,
        name: &str,
        topic: Topic,
    ) -> ScoutResult<Option<PageContentRecord>> {
        aggregator::fetch_aggregator_content(
            self.renderer.as_ref(),
            &self.search,
            &self.config,
            name,
            topic,
        )
        .await
    }

    pub async fn quick_homepage_snapshot(
        &self,
        url: &str,
    ) -> ScoutResult<Option<PageContentRecord>> {
        snapshot::quick_homepage_snapshot(self.renderer.as_ref(), &self.config, url).await
    }

    pub async fn survey_site(&self, base_url: &str) -> ScoutResult<Vec<PageContentRecord>> {
        survey::survey_site(self.renderer.as_ref(), &self.config, base_url).await
    }

    /// Official content for `topic`, plus aggregator content according to
    /// `policy`. Official records come first.
    pub async fn gather_topic_content(
        &self,
        name: &str,
        base_url: &str,
        topic: Topic,
        policy: AggregatorPolicy,
    ) -> ScoutResult<Vec<PageContentRecord>> {
        let official = self.fetch_topic_content(base_url, topic).await?;

        let want_aggregator = match (policy, &official) {
            (AggregatorPolicy::AlwaysMerge, _) => true,
            (AggregatorPolicy::Gated, Some(record)) => !Self::is_adequate(&record.text, topic),
            (AggregatorPolicy::Gated, None) => true,
        };

        let mut records: Vec<PageContentRecord> = official.into_iter().collect();
        if want_aggregator {
            info!("fetching aggregator content for {name} {topic}");
            if let Some(record) = self.fetch_aggregator_content(name, topic).await? {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Whether `text` is specific enough to answer a `topic` question.
    pub fn is_adequate(text: &str, topic: Topic) -> bool {
        adequacy::is_adequate(text, topic)
    }

    pub async fn shutdown(&self) {
        if let Err(e) = self.renderer.shutdown().await {
            warn!("renderer shutdown failed: {e:#}");
        }
    }
}

/// Providers in priority order: SearXNG, Startpage, DuckDuckGo Lite, then a
/// rendered results page.
pub fn default_search_chain(config: &ScoutConfig, renderer: Arc<dyn Renderer>) -> SearchChain {
    let client = HttpClient::new(&config.user_agent, config.search_timeout_ms);
    let providers: Vec<Arc<dyn SearchProvider>> = vec![
        Arc::new(SearxngSearch::new(
            client.clone(),
            config.searxng_instances.clone(),
        )),
        Arc::new(StartpageSearch::new(
            client.clone(),
            config.startpage_endpoint.clone(),
        )),
        Arc::new(DuckDuckGoLite::new(client, config.duckduckgo_endpoint.clone())),
        Arc::new(BrowserSearch::new(
            renderer,
            config.browser_search_endpoint.clone(),
            config.search_timeout_ms,
            config.interaction_pause_ms,
        )),
    ];
    SearchChain::new(providers, config.search_budget_ms)
}
