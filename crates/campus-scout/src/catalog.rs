//! Reference catalogs: the curated name→URL table and the national registry.
//!
//! Both are loaded once at startup and never mutated. A missing or corrupt
//! file degrades that tier to an empty table and logs a warning; it never
//! stops the process.

use crate::config::ScoutConfig;
use crate::error::{ScoutError, ScoutResult};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};

/// A curated institution with a known official URL.
#[derive(Debug, Clone, PartialEq)]
pub struct CuratedEntry {
    pub name: String,
    pub url: String,
}

/// A registry institution: identity and locality, no URL.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegistryEntry {
    pub name: String,
    pub university: String,
    pub state: String,
    pub district: String,
    pub kind: String,
}

impl RegistryEntry {
    /// "District, State", skipping empty parts.
    pub fn locality(&self) -> String {
        [self.district.trim(), self.state.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Lowercase-keyed table preserving insertion order for deterministic scans.
#[derive(Debug, Clone)]
pub struct Table<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Table<T> {
    /// Insert under the normalized key. A repeated key replaces the earlier
    /// value in place.
    pub fn insert(&mut self, key: &str, value: T) {
        let key = normalize_key(key);
        if key.is_empty() {
            return;
        }
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub type CuratedCatalog = Table<CuratedEntry>;
pub type Registry = Table<RegistryEntry>;

/// Lowercase, trimmed lookup key.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// ── File formats ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CuratedFile {
    #[serde(default)]
    colleges: Vec<CuratedRow>,
}

#[derive(Deserialize)]
struct CuratedRow {
    #[serde(default)]
    key: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
}

#[derive(Deserialize)]
struct RegistryRow {
    #[serde(default)]
    college: String,
    #[serde(default)]
    university: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    district: String,
    #[serde(default)]
    college_type: String,
}

fn registry_id_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\(Id:.*?\)").expect("registry id regex is valid"))
}

/// Parse the curated catalog JSON (`{"colleges": [{"key", "name", "url"}]}`).
pub fn parse_curated(json: &str) -> ScoutResult<CuratedCatalog> {
    let file: CuratedFile = serde_json::from_str(json)?;
    let mut table = CuratedCatalog::default();
    for row in file.colleges {
        table.insert(
            &row.key,
            CuratedEntry {
                name: row.name,
                url: row.url,
            },
        );
    }
    Ok(table)
}

/// Parse the registry JSON (a list of `{"college", "university", "state",
/// "district", "college_type"}` objects). Trailing `(Id: …)` markers are
/// stripped from names before keying.
pub fn parse_registry(json: &str) -> ScoutResult<Registry> {
    let rows: Vec<RegistryRow> = serde_json::from_str(json)?;
    let mut table = Registry::default();
    for row in rows {
        let clean = registry_id_suffix().replace_all(&row.college, "").trim().to_string();
        if clean.is_empty() {
            continue;
        }
        table.insert(
            &clean,
            RegistryEntry {
                name: clean.clone(),
                university: row.university,
                state: row.state,
                district: row.district,
                kind: row.college_type,
            },
        );
    }
    Ok(table)
}

fn read_catalog<T>(
    path: &Path,
    label: &str,
    parse: impl Fn(&str) -> ScoutResult<Table<T>>,
) -> ScoutResult<Table<T>> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ScoutError::Configuration(format!("{label} not readable at {}: {e}", path.display()))
    })?;
    parse(&raw).map_err(|e| {
        ScoutError::Configuration(format!("{label} at {} is corrupt: {e}", path.display()))
    })
}

/// Both reference tables, immutable after loading.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub curated: CuratedCatalog,
    pub registry: Registry,
}

impl Catalogs {
    pub fn new(curated: CuratedCatalog, registry: Registry) -> Self {
        Self { curated, registry }
    }

    /// Load both catalogs from the configured paths. Each tier degrades to
    /// empty on its own.
    pub fn load(config: &ScoutConfig) -> Self {
        Self::load_from(&config.curated_path(), &config.registry_path())
    }

    pub fn load_from(curated_path: &Path, registry_path: &Path) -> Self {
        let curated = match read_catalog(curated_path, "curated catalog", parse_curated) {
            Ok(table) => {
                info!("loaded {} curated institutions", table.len());
                table
            }
            Err(e) => {
                warn!("{e}; curated lookups disabled");
                CuratedCatalog::default()
            }
        };
        let registry = match read_catalog(registry_path, "registry", parse_registry) {
            Ok(table) => {
                info!("loaded {} registry institutions", table.len());
                table
            }
            Err(e) => {
                warn!("{e}; registry lookups disabled");
                Registry::default()
            }
        };
        Self { curated, registry }
    }
}
