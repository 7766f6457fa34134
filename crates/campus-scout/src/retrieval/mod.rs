//! Rendered-page retrieval: the staged topic scraper, the aggregator
//! fallback, the quick homepage snapshot and the site survey.
//!
//! Every operation owns one [`PageSession`] (a single browser tab) for its
//! whole run and closes it on the way out. Failures of individual pages are
//! logged and skipped; only contract violations reach the caller.

pub mod aggregator;
pub mod snapshot;
pub mod survey;
pub mod topic;

use crate::config::ScoutConfig;
use crate::discovery::discover_portals;
use crate::error::{ScoutError, ScoutResult};
use crate::extract::{extract_text, ExtractedText};
use crate::renderer::interaction::light_portal_plan;
use crate::renderer::{perform, Interaction, RenderContext, Renderer};
use crate::topic::Topic;
use crate::types::{Origin, PageContentRecord};
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Markup of one rendered page.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// URL that was requested.
    pub url: String,
    /// URL after redirects.
    pub final_url: String,
    pub html: String,
}

/// Extracted text together with the URL it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    pub text: String,
    pub truncated: bool,
    pub source_url: String,
}

impl PageText {
    fn from_extracted(extracted: ExtractedText, source_url: &str) -> Self {
        Self {
            text: extracted.text,
            truncated: extracted.truncated,
            source_url: source_url.to_string(),
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn into_record(self, topic: Topic, page_type: Topic, origin: Origin) -> PageContentRecord {
        PageContentRecord {
            topic,
            page_type,
            text: self.text,
            truncated: self.truncated,
            source_url: self.source_url,
            origin,
            fetched_at: Utc::now(),
        }
    }
}

/// Parse and validate a caller-supplied absolute http(s) URL.
pub(crate) fn parse_base_url(raw: &str) -> ScoutResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ScoutError::InvalidInput(format!("invalid URL {raw:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ScoutError::InvalidInput(format!(
            "unsupported URL scheme {other:?} in {raw:?}"
        ))),
    }
}

/// One browser tab used for the duration of a retrieval operation.
pub struct PageSession<'a> {
    ctx: Box<dyn RenderContext>,
    config: &'a ScoutConfig,
}

impl<'a> PageSession<'a> {
    /// Open a fresh context. A renderer that cannot provide one (no
    /// browser installed, crashed process) yields `None`.
    pub async fn open(renderer: &dyn Renderer, config: &'a ScoutConfig) -> Option<Self> {
        match renderer.new_context().await {
            Ok(ctx) => Some(Self { ctx, config }),
            Err(e) => {
                warn!("no render context available: {e:#}");
                None
            }
        }
    }

    pub fn config(&self) -> &ScoutConfig {
        self.config
    }

    /// Navigate, wait `settle_ms`, run `plan`, then capture the markup.
    pub async fn render_with(
        &mut self,
        url: &str,
        timeout_ms: u64,
        settle_ms: u64,
        plan: &[Interaction],
    ) -> ScoutResult<RenderedPage> {
        let nav = match tokio::time::timeout(
            Duration::from_millis(timeout_ms),
            self.ctx.navigate(url, timeout_ms),
        )
        .await
        {
            Ok(Ok(nav)) => nav,
            Ok(Err(e)) => return Err(ScoutError::transient(url, format!("{e:#}"))),
            Err(_) => {
                return Err(ScoutError::Timeout {
                    url: url.to_string(),
                    timeout_ms,
                })
            }
        };
        if nav.status >= 400 {
            return Err(ScoutError::HttpStatus {
                url: url.to_string(),
                status: nav.status,
            });
        }

        if settle_ms > 0 {
            tokio::time::sleep(Duration::from_millis(settle_ms)).await;
        }
        if !plan.is_empty() {
            let clicked = perform(self.ctx.as_ref(), plan).await;
            debug!("interaction plan on {url} clicked {clicked} elements");
        }

        let html = self
            .ctx
            .get_html()
            .await
            .map_err(|e| ScoutError::transient(url, format!("{e:#}")))?;

        Ok(RenderedPage {
            url: url.to_string(),
            final_url: nav.final_url,
            html,
        })
    }

    /// Render with the page timeout and the standard settle delay.
    pub async fn render(&mut self, url: &str) -> ScoutResult<RenderedPage> {
        let (timeout, settle) = (self.config.page_timeout_ms, self.config.settle_ms);
        self.render_with(url, timeout, settle, &[]).await
    }

    /// Like [`render`](Self::render), but skips the page on failure.
    pub async fn try_render(&mut self, url: &str, plan: &[Interaction]) -> Option<RenderedPage> {
        let (timeout, settle) = (self.config.page_timeout_ms, self.config.settle_ms);
        match self.render_with(url, timeout, settle, plan).await {
            Ok(page) => Some(page),
            Err(e) => {
                log_skip(&e);
                None
            }
        }
    }

    pub fn extract(&self, page: &RenderedPage) -> PageText {
        PageText::from_extracted(extract_text(&page.html, self.config.content_cap), &page.url)
    }

    /// Extract `page`; when it is thin, try the portals it links to and
    /// keep the longest text. Text shorter than the minimum page size
    /// counts as nothing.
    pub async fn refine(&mut self, page: &RenderedPage, topic: Topic) -> Option<PageText> {
        let mut best = self.extract(page);
        let low = self.config.low_content_chars;

        if best.char_count() < low {
            info!(
                "low content ({} chars) at {}, discovering portals",
                best.char_count(),
                page.url
            );
            let portals = discover_portals(&page.html, &page.final_url, topic);
            let plan = light_portal_plan(self.config.interaction_pause_ms);
            for portal in portals {
                debug!("trying portal {} ({:?})", portal.url, portal.source);
                let Some(portal_page) = self.try_render(&portal.url, &plan).await else {
                    continue;
                };
                let candidate = self.extract(&portal_page);
                if candidate.char_count() > best.char_count() {
                    info!(
                        "portal {} gave {} chars",
                        portal.url,
                        candidate.char_count()
                    );
                    best = candidate;
                }
                if best.char_count() >= low {
                    break;
                }
            }
        }

        if best.char_count() < self.config.min_page_chars {
            debug!(
                "too little content ({} chars) from {}",
                best.char_count(),
                page.url
            );
            return None;
        }
        Some(best)
    }

    pub async fn close(self) {
        if let Err(e) = self.ctx.close().await {
            debug!("closing render context failed: {e:#}");
        }
    }
}

/// Log a skipped candidate at a level matching how unusual the failure is.
pub(crate) fn log_skip(e: &ScoutError) {
    match e {
        ScoutError::HttpStatus { .. } | ScoutError::MalformedContent { .. } => {
            debug!("skipping page: {e}")
        }
        _ => warn!("skipping page: {e}"),
    }
}
