//! Operator CLI: subcommand runners and process-level setup.

pub mod commands;
pub mod doctor;

use crate::config::{resolve_data_dir, ScoutConfig};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOpts {
    pub config: Option<String>,
    pub data_dir: Option<String>,
}

impl GlobalOpts {
    /// Config from file and environment, with catalog paths pointed at the
    /// resolved data directory.
    pub fn load_config(&self) -> Result<ScoutConfig> {
        let mut config = ScoutConfig::load(self.config.as_deref())
            .context("failed to load configuration")?;
        config.use_data_dir(&resolve_data_dir(self.data_dir.as_deref()));
        Ok(config)
    }
}

/// Initialise the tracing subscriber. Logs go to stderr so stdout stays
/// clean JSON.
pub fn init_tracing(verbose: bool, json: bool) -> Result<()> {
    let directive = if verbose {
        "campus_scout=debug"
    } else {
        "campus_scout=info"
    };
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

/// Pretty-print `value` as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_fills_catalog_paths() {
        let dir = tempfile::tempdir().unwrap();
        let opts = GlobalOpts {
            config: None,
            data_dir: Some(dir.path().to_string_lossy().into_owned()),
        };
        let config = opts.load_config().unwrap();
        assert_eq!(config.curated_path(), dir.path().join("colleges.json"));
        assert_eq!(
            config.registry_path(),
            dir.path().join("all_institutions.json")
        );
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let opts = GlobalOpts {
            config: Some("/nonexistent/scout.json".into()),
            data_dir: None,
        };
        assert!(opts.load_config().is_err());
    }
}
