//! Candidate resolution through the catalogs and the search chain.

mod common;

use campus_scout::renderer::NoopRenderer;
use campus_scout::search::{ProviderKind, SearchChain, SearchProvider};
use campus_scout::{Catalogs, ConfidenceTier, Scout, ScoutError, SourceTag};
use common::{fast_config, StaticProvider};
use std::sync::Arc;
use tempfile::TempDir;

const CURATED: &str = r#"{
  "colleges": [
    {"key": "iit hyderabad", "name": "Indian Institute of Technology Hyderabad", "url": "https://iith.ac.in"},
    {"key": "bits pilani", "name": "Birla Institute of Technology and Science", "url": "https://www.bits-pilani.ac.in"}
  ]
}"#;

const REGISTRY: &str = r#"[
  {"college": "Acme Institute of Technology (Id: C-4411)", "university": "Osmania University",
   "state": "Telangana", "district": "Hyderabad", "college_type": "Affiliated College"}
]"#;

fn catalogs(dir: &TempDir) -> Catalogs {
    let curated = dir.path().join("colleges.json");
    let registry = dir.path().join("all_institutions.json");
    std::fs::write(&curated, CURATED).unwrap();
    std::fs::write(&registry, REGISTRY).unwrap();
    Catalogs::load_from(&curated, &registry)
}

fn build_scout(catalogs: Catalogs, provider: Arc<StaticProvider>) -> Scout {
    let providers: Vec<Arc<dyn SearchProvider>> = vec![provider];
    Scout::new(
        Arc::new(catalogs),
        SearchChain::new(providers, 5_000),
        Arc::new(NoopRenderer),
        Arc::new(fast_config()),
    )
}

fn web_hits() -> Arc<StaticProvider> {
    StaticProvider::new(
        "web",
        ProviderKind::MetaSearch,
        &[
            ("https://blog.example.com/acme-review", "Review"),
            ("https://www.acmetech.ac.in/about", "Acme Institute of Technology"),
            ("https://www.shiksha.com/college/acme", "Acme on Shiksha"),
            ("https://exams.acmetech.ac.in/", "Acme exams"),
            ("https://en.wikipedia.org/wiki/Acme", "Acme - Wikipedia"),
        ],
    )
}

#[tokio::test]
async fn test_curated_exact_match_skips_search() {
    let dir = TempDir::new().unwrap();
    let provider = web_hits();
    let scout = build_scout(catalogs(&dir), provider.clone());

    let out = scout.resolve("IIT Hyderabad", false, 5).await.unwrap();

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].url, "https://iith.ac.in");
    assert_eq!(out[0].confidence, ConfidenceTier::High);
    assert_eq!(out[0].source, SourceTag::Curated);
    assert!(provider.queries().is_empty());
}

#[tokio::test]
async fn test_registry_match_refines_query() {
    let dir = TempDir::new().unwrap();
    let provider = web_hits();
    let scout = build_scout(catalogs(&dir), provider.clone());

    let out = scout
        .resolve("Acme Institute of Technology", false, 5)
        .await
        .unwrap();

    assert_eq!(
        provider.queries(),
        vec!["Acme Institute of Technology Hyderabad, Telangana official website"]
    );
    assert_eq!(out[0].url, "https://www.acmetech.ac.in");
    assert_eq!(out[0].confidence, ConfidenceTier::High);
    assert_eq!(out[0].source, SourceTag::WebSearch);
}

#[tokio::test]
async fn test_forced_search_ignores_catalogs() {
    let dir = TempDir::new().unwrap();
    let provider = web_hits();
    let scout = build_scout(catalogs(&dir), provider.clone());

    let out = scout.resolve("IIT Hyderabad", true, 5).await.unwrap();

    assert_eq!(provider.queries(), vec!["IIT Hyderabad official website"]);
    assert!(out.iter().all(|c| c.source == SourceTag::WebSearch));
}

#[tokio::test]
async fn test_results_are_filtered_deduped_and_ordered() {
    let dir = TempDir::new().unwrap();
    let scout = build_scout(catalogs(&dir), web_hits());

    let out = scout
        .resolve("Acme Institute of Technology", true, 5)
        .await
        .unwrap();

    for c in &out {
        assert!(!c.url.contains("shiksha.com"));
        assert!(!c.url.contains("wikipedia.org"));
    }
    let acme = out.iter().filter(|c| c.url.contains("acmetech.ac.in")).count();
    assert_eq!(acme, 1);
    let tiers: Vec<ConfidenceTier> = out.iter().map(|c| c.confidence).collect();
    let mut sorted = tiers.clone();
    sorted.sort();
    assert_eq!(tiers, sorted);
}

#[tokio::test]
async fn test_max_results_caps_output() {
    let dir = TempDir::new().unwrap();
    let scout = build_scout(catalogs(&dir), web_hits());
    let out = scout
        .resolve("Acme Institute of Technology", true, 1)
        .await
        .unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].url, "https://www.acmetech.ac.in");

    let none = scout.resolve("Acme Institute", true, 0).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_short_name_is_invalid() {
    let dir = TempDir::new().unwrap();
    let scout = build_scout(catalogs(&dir), web_hits());
    let err = scout.resolve("IT", false, 5).await.unwrap_err();
    assert!(matches!(err, ScoutError::InvalidInput(_)));
}

#[tokio::test]
async fn test_missing_catalogs_fall_back_to_search() {
    let dir = TempDir::new().unwrap();
    let catalogs = Catalogs::load_from(
        &dir.path().join("missing.json"),
        &dir.path().join("also-missing.json"),
    );
    assert!(catalogs.curated.is_empty());

    let provider = web_hits();
    let scout = build_scout(catalogs, provider.clone());
    let out = scout.resolve("IIT Hyderabad", false, 5).await.unwrap();
    assert_eq!(provider.queries().len(), 1);
    assert!(!out.is_empty());
}
