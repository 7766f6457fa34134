//! Staged retrieval of one topic from an institution's own site.
//!
//! The run walks a fixed sequence of stages. Each stage either produces a
//! record or fails, and failure always moves to the next stage:
//!
//! ```text
//! HomepageScan ─▶ StandardPathProbe ─▶ DiscoveryFallbackOnBase ─▶ Failed
//!       │                 │                       │
//!       └─────────────────┴───────────────────────┴──▶ Succeeded
//! ```

use super::{parse_base_url, PageSession, RenderedPage};
use crate::config::ScoutConfig;
use crate::error::ScoutResult;
use crate::renderer::interaction::light_portal_plan;
use crate::renderer::Renderer;
use crate::topic::Topic;
use crate::types::{Origin, PageContentRecord};
use tracing::{debug, info};
use url::Url;

/// Position of a topic retrieval run.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    HomepageScan,
    StandardPathProbe,
    DiscoveryFallbackOnBase,
    Succeeded(Box<PageContentRecord>),
    Failed,
}

impl Stage {
    /// The single transition taken when a stage produces nothing.
    pub fn on_failure(&self) -> Stage {
        match self {
            Stage::HomepageScan => Stage::StandardPathProbe,
            Stage::StandardPathProbe => Stage::DiscoveryFallbackOnBase,
            _ => Stage::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Succeeded(_) | Stage::Failed)
    }
}

struct TopicRun<'a> {
    session: PageSession<'a>,
    base: Url,
    topic: Topic,
    /// Homepage render from the scan, reused by the base fallback.
    homepage: Option<RenderedPage>,
}

impl TopicRun<'_> {
    fn official(&self, text: super::PageText, page_type: Topic) -> PageContentRecord {
        text.into_record(self.topic, page_type, Origin::Official)
    }

    async fn homepage_scan(&mut self) -> Option<PageContentRecord> {
        let base = self.base.to_string();
        info!("scanning homepage {base} for {} portals", self.topic);

        let home = self.session.try_render(&base, &[]).await?;
        let portals = crate::discovery::discover_portals(&home.html, &home.final_url, self.topic);
        self.homepage = Some(home);

        let min = self.session.config().topic_min_chars;
        let plan = light_portal_plan(self.session.config().interaction_pause_ms);
        for portal in portals.into_iter().filter(|p| p.url_matches(self.topic)) {
            info!("found matching portal {}", portal.url);
            let Some(page) = self.session.try_render(&portal.url, &plan).await else {
                continue;
            };
            if let Some(text) = self.session.refine(&page, self.topic).await {
                if text.char_count() > min {
                    return Some(self.official(text, self.topic));
                }
            }
        }
        None
    }

    async fn probe_paths(&mut self) -> Option<PageContentRecord> {
        let min = self.session.config().topic_min_chars;
        for path in self.topic.standard_paths() {
            let Ok(url) = self.base.join(path) else {
                continue;
            };
            debug!("probing {url}");
            let Some(page) = self.session.try_render(url.as_str(), &[]).await else {
                continue;
            };
            if let Some(text) = self.session.refine(&page, self.topic).await {
                if text.char_count() > min {
                    return Some(self.official(text, self.topic));
                }
            }
        }
        None
    }

    async fn fallback_on_base(&mut self) -> Option<PageContentRecord> {
        info!("no {} page found, falling back to {}", self.topic, self.base);
        let page = match self.homepage.take() {
            Some(page) => page,
            None => self.session.try_render(self.base.as_str(), &[]).await?,
        };
        let min = self.session.config().general_min_chars;
        let text = self.session.refine(&page, self.topic).await?;
        (text.char_count() > min).then(|| self.official(text, Topic::General))
    }
}

/// Retrieve content about `topic` from the site at `base_url`.
///
/// Returns `Ok(None)` when no stage finds enough text, or when no browser
/// context can be opened. Only a malformed `base_url` is an error.
pub async fn fetch_topic_content(
    renderer: &dyn Renderer,
    config: &ScoutConfig,
    base_url: &str,
    topic: Topic,
) -> ScoutResult<Option<PageContentRecord>> {
    let base = parse_base_url(base_url)?;
    let Some(session) = PageSession::open(renderer, config).await else {
        return Ok(None);
    };

    let mut run = TopicRun {
        session,
        base,
        topic,
        homepage: None,
    };

    let mut stage = Stage::HomepageScan;
    while !stage.is_terminal() {
        let produced = match stage {
            Stage::HomepageScan => run.homepage_scan().await,
            Stage::StandardPathProbe => run.probe_paths().await,
            Stage::DiscoveryFallbackOnBase => run.fallback_on_base().await,
            Stage::Succeeded(_) | Stage::Failed => None,
        };
        stage = match produced {
            Some(record) => Stage::Succeeded(Box::new(record)),
            None => stage.on_failure(),
        };
    }

    run.session.close().await;

    match stage {
        Stage::Succeeded(record) => {
            info!(
                "retrieved {} chars of {} content from {}",
                record.char_count(),
                record.page_type,
                record.source_url
            );
            Ok(Some(*record))
        }
        _ => {
            info!("no {topic} content found at {base_url}");
            Ok(None)
        }
    }
}
