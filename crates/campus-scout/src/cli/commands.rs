//! Subcommand runners. Each builds a [`Scout`], runs one operation, prints
//! the result as JSON and shuts the browser down.

use super::{print_json, GlobalOpts};
use crate::scout::{AggregatorPolicy, Scout};
use crate::topic::Topic;
use anyhow::Result;
use serde_json::json;

async fn scout(opts: &GlobalOpts) -> Result<Scout> {
    Ok(Scout::with_defaults(opts.load_config()?).await)
}

pub async fn resolve(opts: &GlobalOpts, name: &str, force_web: bool, max: usize) -> Result<()> {
    let scout = scout(opts).await?;
    let result = scout.resolve(name, force_web, max).await;
    scout.shutdown().await;
    print_json(&result?)
}

pub async fn fetch(opts: &GlobalOpts, url: &str, topic: Topic) -> Result<()> {
    let scout = scout(opts).await?;
    let result = scout.fetch_topic_content(url, topic).await;
    scout.shutdown().await;
    print_json(&result?)
}

pub async fn aggregator(opts: &GlobalOpts, name: &str, topic: Topic) -> Result<()> {
    let scout = scout(opts).await?;
    let result = scout.fetch_aggregator_content(name, topic).await;
    scout.shutdown().await;
    print_json(&result?)
}

pub async fn snapshot(opts: &GlobalOpts, url: &str) -> Result<()> {
    let scout = scout(opts).await?;
    let result = scout.quick_homepage_snapshot(url).await;
    scout.shutdown().await;
    print_json(&result?)
}

pub async fn survey(opts: &GlobalOpts, url: &str) -> Result<()> {
    let scout = scout(opts).await?;
    let result = scout.survey_site(url).await;
    scout.shutdown().await;
    print_json(&result?)
}

pub async fn gather(
    opts: &GlobalOpts,
    name: &str,
    url: &str,
    topic: Topic,
    always_merge: bool,
) -> Result<()> {
    let policy = if always_merge {
        AggregatorPolicy::AlwaysMerge
    } else {
        AggregatorPolicy::Gated
    };
    let scout = scout(opts).await?;
    let result = scout.gather_topic_content(name, url, topic, policy).await;
    scout.shutdown().await;
    let records = result?;
    let adequate: Vec<bool> = records
        .iter()
        .map(|r| Scout::is_adequate(&r.text, topic))
        .collect();
    print_json(&json!({
        "policy": policy,
        "records": records,
        "adequate": adequate,
    }))
}

/// Topics a question routes to. Needs no browser.
pub fn detect(question: &str) -> Result<()> {
    print_json(&Topic::detect(question))
}
