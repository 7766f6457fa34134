//! Declarative browser interaction plans.
//!
//! A plan is an ordered list of best-effort steps run against an open
//! context. A step that fails (missing element, script error) is logged and
//! skipped; the rest of the plan still runs.

use super::RenderContext;
use anyhow::Result;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// An element to click: a CSS selector, optionally narrowed to elements
/// whose visible text contains `text` (case-insensitive).
#[derive(Debug, Clone, PartialEq)]
pub struct ClickTarget {
    pub css: String,
    pub text: Option<String>,
}

impl ClickTarget {
    pub fn css(css: &str) -> Self {
        Self {
            css: css.to_string(),
            text: None,
        }
    }

    pub fn with_text(css: &str, text: &str) -> Self {
        Self {
            css: css.to_string(),
            text: Some(text.to_lowercase()),
        }
    }
}

/// One step of an interaction plan.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Wait { ms: u64 },
    Scroll { dy: i64 },
    /// Click the first visible match of the first target that has one.
    ClickFirst {
        targets: Vec<ClickTarget>,
        pause_ms: u64,
    },
    /// Click up to `limit` visible matches of one target.
    ClickEach {
        target: ClickTarget,
        limit: usize,
        pause_ms: u64,
    },
}

/// Plan for a discovered portal: open its statistics view if one is
/// offered.
pub fn light_portal_plan(pause_ms: u64) -> Vec<Interaction> {
    vec![Interaction::ClickFirst {
        targets: vec![
            ClickTarget::with_text("a", "stats"),
            ClickTarget::with_text("a", "statistics"),
            ClickTarget::with_text("button", "placement"),
            ClickTarget::css(".nav-link"),
        ],
        pause_ms,
    }]
}

/// Plan for an aggregator page: scroll to trigger lazy sections, then
/// expand collapsed "read more" blocks.
pub fn aggregator_plan(pause_ms: u64) -> Vec<Interaction> {
    let expand = |target: ClickTarget| Interaction::ClickEach {
        target,
        limit: 3,
        pause_ms: pause_ms / 2,
    };
    vec![
        Interaction::Scroll { dy: 1000 },
        Interaction::Wait { ms: pause_ms },
        Interaction::Scroll { dy: 2000 },
        Interaction::Wait { ms: pause_ms },
        expand(ClickTarget::css(".read-more")),
        expand(ClickTarget::css(".view-more")),
        expand(ClickTarget::with_text("button", "read more")),
        expand(ClickTarget::with_text("span", "read more")),
    ]
}

/// Script that clicks up to `limit` visible, not yet clicked matches of
/// `target` and returns how many it clicked.
pub fn click_script(target: &ClickTarget, limit: usize) -> String {
    let spec = json!({ "css": target.css, "text": target.text, "limit": limit });
    format!(
        r#"(() => {{
  const spec = {spec};
  let clicked = 0;
  for (const el of document.querySelectorAll(spec.css)) {{
    if (clicked >= spec.limit) break;
    if (el.dataset.scoutClicked) continue;
    const r = el.getBoundingClientRect();
    if (r.width === 0 && r.height === 0) continue;
    if (spec.text && !(el.innerText || '').toLowerCase().includes(spec.text)) continue;
    el.dataset.scoutClicked = '1';
    el.click();
    clicked++;
  }}
  return clicked;
}})()"#
    )
}

async fn click(ctx: &dyn RenderContext, target: &ClickTarget, limit: usize) -> Result<usize> {
    let clicked = ctx.execute_js(&click_script(target, limit)).await?;
    Ok(clicked.as_u64().unwrap_or(0) as usize)
}

async fn pause(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

/// Run `plan` against `ctx`. Returns the number of elements clicked.
pub async fn perform(ctx: &dyn RenderContext, plan: &[Interaction]) -> usize {
    let mut total = 0;
    for step in plan {
        match step {
            Interaction::Wait { ms } => pause(*ms).await,
            Interaction::Scroll { dy } => {
                if let Err(e) = ctx.execute_js(&format!("window.scrollBy(0, {dy})")).await {
                    debug!("scroll by {dy} failed: {e:#}");
                }
            }
            Interaction::ClickFirst { targets, pause_ms } => {
                for target in targets {
                    match click(ctx, target, 1).await {
                        Ok(0) => {}
                        Ok(n) => {
                            total += n;
                            pause(*pause_ms).await;
                            break;
                        }
                        Err(e) => debug!("click on {} failed: {e:#}", target.css),
                    }
                }
            }
            Interaction::ClickEach {
                target,
                limit,
                pause_ms,
            } => match click(ctx, target, *limit).await {
                Ok(0) => {}
                Ok(n) => {
                    total += n;
                    pause(*pause_ms).await;
                }
                Err(e) => debug!("click on {} failed: {e:#}", target.css),
            },
        }
    }
    total
}
