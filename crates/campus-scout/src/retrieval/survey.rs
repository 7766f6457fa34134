//! Bounded multi-page snapshot of the pages students ask about most.

use super::{log_skip, parse_base_url, PageSession};
use crate::config::ScoutConfig;
use crate::error::ScoutResult;
use crate::renderer::Renderer;
use crate::topic::{Topic, PRIORITY_TOPICS};
use crate::types::{Origin, PageContentRecord};
use std::collections::HashSet;
use tracing::{debug, info};
use url::Url;

/// Paths visited in order; the empty path is the homepage.
pub const SURVEY_PATHS: &[&str] = &[
    "/placements",
    "/placement",
    "/careers",
    "/career",
    "/training-placements",
    "/placement-cell",
    "/placements.php",
    "/fees",
    "/fee-structure",
    "/fee",
    "/tuition",
    "/admissions",
    "/admission",
    "/apply",
    "/about",
    "/about-us",
    "",
];

/// Page type of a surveyed URL, judged by its path only.
fn page_type(url: &Url, base: &Url) -> Topic {
    if url.path() == base.path() && url.query().is_none() {
        return Topic::General;
    }
    Topic::classify_url(url.path())
}

/// Visit the survey paths under `base_url` in one context.
///
/// A page type already captured is not fetched again (general pages
/// excepted); pages below the survey minimum are dropped. Stops once every
/// priority topic is covered or the page budget is spent.
pub async fn survey_site(
    renderer: &dyn Renderer,
    config: &ScoutConfig,
    base_url: &str,
) -> ScoutResult<Vec<PageContentRecord>> {
    let base = parse_base_url(base_url)?;
    let Some(mut session) = PageSession::open(renderer, config).await else {
        return Ok(Vec::new());
    };

    info!("surveying {base}");
    let mut pages: Vec<PageContentRecord> = Vec::new();
    let mut visited = HashSet::new();
    let mut captured: HashSet<Topic> = HashSet::new();

    for path in SURVEY_PATHS {
        if pages.len() >= config.survey_max_pages {
            break;
        }
        let url = if path.is_empty() {
            base.clone()
        } else {
            match base.join(path) {
                Ok(u) => u,
                Err(_) => continue,
            }
        };
        if !visited.insert(url.to_string()) {
            continue;
        }

        let kind = page_type(&url, &base);
        if kind != Topic::General && captured.contains(&kind) {
            continue;
        }

        debug!("survey {kind}: {url}");
        let page = match session
            .render_with(
                url.as_str(),
                config.page_timeout_ms,
                config.snapshot_settle_ms,
                &[],
            )
            .await
        {
            Ok(page) => page,
            Err(e) => {
                log_skip(&e);
                continue;
            }
        };
        let text = session.extract(&page);
        if text.char_count() < config.survey_min_chars {
            continue;
        }

        info!("survey captured {kind} ({} chars) from {url}", text.char_count());
        captured.insert(kind);
        pages.push(text.into_record(kind, kind, Origin::Official));

        if PRIORITY_TOPICS.iter().all(|t| captured.contains(t)) {
            info!("all priority pages found");
            break;
        }
    }

    session.close().await;
    Ok(pages)
}
