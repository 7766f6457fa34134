//! Configuration loading and resolution.

use crate::error::{ScoutError, ScoutResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CURATED_FILE: &str = "colleges.json";
const REGISTRY_FILE: &str = "all_institutions.json";

/// Tunables for the discovery engine. Every field has a default, so a config
/// file only needs the values it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Curated name→URL catalog. Defaults to `<data dir>/colleges.json`.
    pub curated_catalog_path: Option<PathBuf>,
    /// National registry of names. Defaults to `<data dir>/all_institutions.json`.
    pub registry_path: Option<PathBuf>,

    pub page_timeout_ms: u64,
    pub aggregator_timeout_ms: u64,
    pub snapshot_timeout_ms: u64,
    /// Single search request.
    pub search_timeout_ms: u64,
    /// Whole provider call, including every instance it tries.
    pub search_budget_ms: u64,

    /// Pause after navigation so client-side rendering can finish.
    pub settle_ms: u64,
    pub snapshot_settle_ms: u64,
    /// Pause after each scroll or click.
    pub interaction_pause_ms: u64,

    /// Maximum characters kept from one page.
    pub content_cap: usize,
    /// Topic page accepted by the homepage scan or the path probe.
    pub topic_min_chars: usize,
    /// Homepage accepted as the unspecific fallback.
    pub general_min_chars: usize,
    /// Below this, a page triggers portal discovery on itself.
    pub low_content_chars: usize,
    /// Anything shorter counts as no content at all.
    pub min_page_chars: usize,
    pub aggregator_min_chars: usize,
    pub snapshot_min_chars: usize,
    pub survey_min_chars: usize,
    pub survey_max_pages: usize,

    pub searxng_instances: Vec<String>,
    pub startpage_endpoint: String,
    pub duckduckgo_endpoint: String,
    pub browser_search_endpoint: String,
    pub user_agent: String,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            curated_catalog_path: None,
            registry_path: None,
            page_timeout_ms: 25_000,
            aggregator_timeout_ms: 30_000,
            snapshot_timeout_ms: 25_000,
            search_timeout_ms: 15_000,
            search_budget_ms: 30_000,
            settle_ms: 2_000,
            snapshot_settle_ms: 1_500,
            interaction_pause_ms: 1_000,
            content_cap: 12_000,
            topic_min_chars: 300,
            general_min_chars: 200,
            low_content_chars: 500,
            min_page_chars: 100,
            aggregator_min_chars: 500,
            snapshot_min_chars: 100,
            survey_min_chars: 200,
            survey_max_pages: 8,
            searxng_instances: vec![
                "https://searx.tiekoetter.com".into(),
                "https://searx.fmac.aa.net.uk".into(),
                "https://search.ononoki.org".into(),
                "https://opnxng.com".into(),
                "https://search.sapti.me".into(),
            ],
            startpage_endpoint: "https://www.startpage.com/sp/search".into(),
            duckduckgo_endpoint: "https://lite.duckduckgo.com/lite/".into(),
            browser_search_endpoint: "https://www.google.com/search".into(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                         AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/122.0.0.0 Safari/537.36"
                .into(),
        }
    }
}

impl ScoutConfig {
    /// Load configuration: JSON file (explicit path or `SCOUT_CONFIG`), then
    /// `SCOUT_*` environment overrides on top.
    pub fn load(explicit: Option<&str>) -> ScoutResult<Self> {
        let path = explicit
            .map(str::to_string)
            .or_else(|| std::env::var("SCOUT_CONFIG").ok());

        let mut config = match path {
            Some(p) => Self::from_file(Path::new(&p))?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ScoutResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ScoutError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            ScoutError::Configuration(format!("cannot parse {}: {e}", path.display()))
        })
    }

    /// Apply `SCOUT_*` environment overrides. Unparseable numbers are ignored.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(p) = lookup("SCOUT_CATALOG_PATH") {
            self.curated_catalog_path = Some(PathBuf::from(p));
        }
        if let Some(p) = lookup("SCOUT_REGISTRY_PATH") {
            self.registry_path = Some(PathBuf::from(p));
        }
        let num = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        if let Some(v) = num("SCOUT_PAGE_TIMEOUT_MS") {
            self.page_timeout_ms = v;
        }
        if let Some(v) = num("SCOUT_SEARCH_TIMEOUT_MS") {
            self.search_timeout_ms = v;
        }
        if let Some(v) = num("SCOUT_SEARCH_BUDGET_MS") {
            self.search_budget_ms = v;
        }
        if let Some(v) = num("SCOUT_SETTLE_MS") {
            self.settle_ms = v;
        }
        if let Some(v) = num("SCOUT_CONTENT_CAP") {
            self.content_cap = v as usize;
        }
        if let Some(list) = lookup("SCOUT_SEARXNG_INSTANCES") {
            let instances: Vec<String> = list
                .split(',')
                .map(|s| s.trim().trim_end_matches('/').to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !instances.is_empty() {
                self.searxng_instances = instances;
            }
        }
    }

    /// Point unset catalog paths at `dir`.
    pub fn use_data_dir(&mut self, dir: &Path) {
        if self.curated_catalog_path.is_none() {
            self.curated_catalog_path = Some(dir.join(CURATED_FILE));
        }
        if self.registry_path.is_none() {
            self.registry_path = Some(dir.join(REGISTRY_FILE));
        }
    }

    /// Curated catalog path, falling back to the resolved data directory.
    pub fn curated_path(&self) -> PathBuf {
        self.curated_catalog_path
            .clone()
            .unwrap_or_else(|| resolve_data_dir(None).join(CURATED_FILE))
    }

    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(|| resolve_data_dir(None).join(REGISTRY_FILE))
    }
}

/// Resolve the directory holding the reference catalogs.
pub fn resolve_data_dir(explicit: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    if let Ok(env_path) = std::env::var("SCOUT_DATA_DIR") {
        return PathBuf::from(env_path);
    }

    let cwd_data = PathBuf::from("data");
    if cwd_data.join(CURATED_FILE).exists() || cwd_data.join(REGISTRY_FILE).exists() {
        return cwd_data;
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".campus-scout")
        .join("data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_retrieval_thresholds() {
        let c = ScoutConfig::default();
        assert_eq!(c.page_timeout_ms, 25_000);
        assert_eq!(c.aggregator_timeout_ms, 30_000);
        assert_eq!(c.search_budget_ms, 30_000);
        assert!(c.search_timeout_ms <= c.search_budget_ms);
        assert_eq!(c.topic_min_chars, 300);
        assert_eq!(c.general_min_chars, 200);
        assert_eq!(c.low_content_chars, 500);
        assert_eq!(c.content_cap, 12_000);
        assert_eq!(c.searxng_instances.len(), 5);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scout.json");
        std::fs::write(&path, r#"{"settle_ms": 0, "content_cap": 4000}"#).unwrap();

        let c = ScoutConfig::from_file(&path).unwrap();
        assert_eq!(c.settle_ms, 0);
        assert_eq!(c.content_cap, 4000);
        assert_eq!(c.page_timeout_ms, 25_000);
    }

    #[test]
    fn test_corrupt_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scout.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            ScoutConfig::from_file(&path),
            Err(ScoutError::Configuration(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("SCOUT_PAGE_TIMEOUT_MS", "5000"),
            ("SCOUT_SETTLE_MS", "oops"),
            ("SCOUT_SEARXNG_INSTANCES", "http://a.test/, http://b.test"),
            ("SCOUT_CATALOG_PATH", "/srv/colleges.json"),
        ]
        .into_iter()
        .collect();

        let mut c = ScoutConfig::default();
        c.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(c.page_timeout_ms, 5000);
        assert_eq!(c.settle_ms, 2_000);
        assert_eq!(c.searxng_instances, vec!["http://a.test", "http://b.test"]);
        assert_eq!(c.curated_path(), PathBuf::from("/srv/colleges.json"));
    }

    #[test]
    fn test_use_data_dir_keeps_explicit_paths() {
        let mut c = ScoutConfig {
            registry_path: Some(PathBuf::from("/srv/registry.json")),
            ..Default::default()
        };
        c.use_data_dir(Path::new("/opt/scout"));
        assert_eq!(c.curated_path(), PathBuf::from("/opt/scout/colleges.json"));
        assert_eq!(c.registry_path(), PathBuf::from("/srv/registry.json"));
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        assert_eq!(resolve_data_dir(Some("/opt/scout")), PathBuf::from("/opt/scout"));
    }
}
