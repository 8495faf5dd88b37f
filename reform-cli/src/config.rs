//! Command-line configuration.
//!
//! Settings come from an optional TOML file and can be overridden by flags.
//! Anything left unset falls back to the data embedded in the crates.
//!
//! ```toml
//! rate_table = "data/rate_rules.csv"
//! ncm_json = "data/ncm.json"
//! log_level = "debug"
//!
//! [scenario]
//! commerce_rate = "0.12"
//! services_rate = "0.09"
//! zero_rate_situations = ["06"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reform_core::RateTable;
use reform_core::calculations::ScenarioConfig;
use reform_data::{RateRuleLoader, ReferenceCatalog};
use serde::Deserialize;
use tracing::debug;

/// Log filter used when neither the config file nor a flag sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// CSV file with rate rules; the builtin table is used when unset.
    pub rate_table: Option<PathBuf>,

    /// NCM JSON document; the builtin NCM list is used when unset.
    pub ncm_json: Option<PathBuf>,

    /// Any `EnvFilter` directive, e.g. `warn` or `reform_core=debug`.
    pub log_level: Option<String>,

    pub scenario: ScenarioConfig,
}

/// Values given on the command line. `Some` replaces the file's setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub rate_table: Option<PathBuf>,
    pub ncm_json: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Loads `path` when given, otherwise starts from the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn with_overrides(
        mut self,
        overrides: Overrides,
    ) -> Self {
        if overrides.rate_table.is_some() {
            self.rate_table = overrides.rate_table;
        }
        if overrides.ncm_json.is_some() {
            self.ncm_json = overrides.ncm_json;
        }
        if overrides.log_level.is_some() {
            self.log_level = overrides.log_level;
        }
        self
    }

    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn rate_table(&self) -> Result<RateTable> {
        match &self.rate_table {
            Some(path) => RateRuleLoader::load_from_file(path)
                .with_context(|| format!("Failed to load rate rules: {}", path.display())),
            None => {
                debug!("using builtin rate table");
                Ok(RateTable::builtin())
            }
        }
    }

    pub fn catalog(&self) -> Result<ReferenceCatalog> {
        match &self.ncm_json {
            Some(path) => ReferenceCatalog::load_ncm_file(path)
                .with_context(|| format!("Failed to load NCM data: {}", path.display())),
            None => {
                debug!("using builtin reference catalog");
                Ok(ReferenceCatalog::builtin())
            }
        }
    }
}
