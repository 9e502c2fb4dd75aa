use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File};
use engine::{DashboardOptions, OverflowPolicy, PersistPolicy};
use serde::Deserialize;
use tracing::debug;

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "bankboard.toml";

/// Application configuration.
///
/// Sources in increasing priority: built-in defaults, the configuration file,
/// `BANKBOARD_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// JSON file backing the key/value store.
    pub storage_path: PathBuf,
    /// Optional catalog document replacing the built-in banking catalog.
    pub catalog_path: Option<PathBuf>,
    pub columns: u32,
    pub overflow: OverflowPolicy,
    /// Save the layout after every change instead of only on `layout save`.
    pub autosave_layout: bool,
    /// Used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Simulated latency of the mock feeds.
    pub feed_latency_ms: u64,
}

impl AppConfig {
    /// Loads the configuration. An explicitly given file must exist; the
    /// default one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (file, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        debug!(file = %file.display(), required, "Loading configuration");

        let settings = Config::builder()
            .set_default("storage_path", "bankboard-store.json")?
            .set_default("columns", 12_i64)?
            .set_default("overflow", "next_row")?
            .set_default("autosave_layout", false)?
            .set_default("log_filter", "bankboard=info,engine=info")?
            .set_default("feed_latency_ms", 500_i64)?
            .add_source(File::from(file.as_path()).required(required))
            .add_source(Environment::with_prefix("BANKBOARD").try_parsing(true))
            .build()
            .with_context(|| format!("Failed to read configuration from {}", file.display()))?;

        let config: AppConfig = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            bail!("columns must be at least 1");
        }
        if self.storage_path.as_os_str().is_empty() {
            bail!("storage_path must not be empty");
        }
        Ok(())
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            columns: self.columns,
            overflow: self.overflow,
            persist: if self.autosave_layout {
                PersistPolicy::Immediate
            } else {
                PersistPolicy::Deferred
            },
        }
    }
}
