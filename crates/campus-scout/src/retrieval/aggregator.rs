//! Fallback to third-party aggregator pages when the official site has
//! nothing adequate.

use super::{log_skip, PageSession};
use crate::config::ScoutConfig;
use crate::domain::{is_aggregator_url, AGGREGATOR_DOMAINS};
use crate::error::{ScoutError, ScoutResult};
use crate::renderer::interaction::aggregator_plan;
use crate::renderer::Renderer;
use crate::search::{ProviderKind, SearchChain};
use crate::topic::Topic;
use crate::types::{Origin, PageContentRecord, SearchResult};
use tracing::info;

/// Hits requested per aggregator query.
const HITS_PER_QUERY: usize = 3;

/// URL fragments that mark an aggregator page as topic-specific.
const RELATED_FRAGMENTS: &[&str] = &["placement", "fees", "admission", "hostel", "infra"];

/// Search query targeting one aggregator domain.
pub fn aggregator_query(domain: &str, name: &str, topic: Topic) -> String {
    format!("site:{domain} {name} {topic}")
}

/// First hit hosted on an aggregator whose URL looks topic-specific.
pub fn pick_aggregator_hit(hits: &[SearchResult], topic: Topic) -> Option<&SearchResult> {
    hits.iter().find(|hit| {
        let lower = hit.url.to_lowercase();
        is_aggregator_url(&hit.url)
            && (lower.contains(topic.as_str()) || RELATED_FRAGMENTS.iter().any(|f| lower.contains(f)))
    })
}

/// Search the aggregators for `name` + `topic`, then scrape the best hit.
///
/// Unsupported topics and searches without a usable hit return `Ok(None)`.
pub async fn fetch_aggregator_content(
    renderer: &dyn Renderer,
    search: &SearchChain,
    config: &ScoutConfig,
    name: &str,
    topic: Topic,
) -> ScoutResult<Option<PageContentRecord>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ScoutError::InvalidInput(
            "institution name must not be empty".into(),
        ));
    }
    if !topic.aggregator_supported() {
        info!("aggregators carry no {topic} pages");
        return Ok(None);
    }

    let chain = search.restricted_to(&[ProviderKind::MetaSearch, ProviderKind::LightText]);
    let mut found: Option<String> = None;
    for domain in AGGREGATOR_DOMAINS {
        let query = aggregator_query(domain, name, topic);
        info!("searching aggregators: {query}");
        let hits = chain.search_unfiltered(&query, HITS_PER_QUERY).await;
        if let Some(hit) = pick_aggregator_hit(&hits, topic) {
            info!("found aggregator page {}", hit.url);
            found = Some(hit.url.clone());
            break;
        }
    }
    let Some(url) = found else {
        info!("no relevant aggregator links for {name} {topic}");
        return Ok(None);
    };

    let Some(mut session) = PageSession::open(renderer, config).await else {
        return Ok(None);
    };
    let plan = aggregator_plan(config.interaction_pause_ms);
    let text = match session
        .render_with(&url, config.aggregator_timeout_ms, config.settle_ms, &plan)
        .await
    {
        Ok(page) => Some(session.extract(&page)),
        Err(e) => {
            log_skip(&e);
            None
        }
    };
    session.close().await;
    let Some(text) = text else {
        return Ok(None);
    };

    if text.char_count() <= config.aggregator_min_chars {
        info!(
            "low content from aggregator ({} chars) at {url}",
            text.char_count()
        );
        return Ok(None);
    }
    info!("got {} chars from aggregator {url}", text.char_count());
    Ok(Some(text.into_record(topic, topic, Origin::Aggregator)))
}
