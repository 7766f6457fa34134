//! Single-render homepage snapshot used to confirm a candidate site.

use super::{log_skip, parse_base_url, PageSession};
use crate::config::ScoutConfig;
use crate::error::ScoutResult;
use crate::renderer::Renderer;
use crate::topic::Topic;
use crate::types::{Origin, PageContentRecord};
use tracing::info;

/// Render `url` once, without portal discovery, and keep its text when it
/// is long enough to be a real page.
pub async fn quick_homepage_snapshot(
    renderer: &dyn Renderer,
    config: &ScoutConfig,
    url: &str,
) -> ScoutResult<Option<PageContentRecord>> {
    let base = parse_base_url(url)?;
    let Some(mut session) = PageSession::open(renderer, config).await else {
        return Ok(None);
    };

    info!("quick homepage snapshot of {base}");
    let text = match session
        .render_with(
            base.as_str(),
            config.snapshot_timeout_ms,
            config.snapshot_settle_ms,
            &[],
        )
        .await
    {
        Ok(page) => Some(session.extract(&page)),
        Err(e) => {
            log_skip(&e);
            None
        }
    };
    session.close().await;

    Ok(text
        .filter(|t| t.char_count() > config.snapshot_min_chars)
        .map(|t| t.into_record(Topic::General, Topic::General, Origin::Official)))
}
