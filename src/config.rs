// Mon Oct 19 2026 - Alex

use crate::linkmap::EligibilityFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_EXCLUDED_LIBRARY: &str = "GoogleMobileAds";
pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "warning", "info", "debug", "trace"];

/// Order of the symbols written after the remaining-symbols marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainingOrder {
    /// Whatever order the symbol table yields. Not stable across runs.
    #[default]
    Unspecified,
    /// Ascending static address.
    Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub excluded_library_prefixes: Vec<String>,
    pub remaining_order: RemainingOrder,
    /// Used when `--log-level` is not given.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            excluded_library_prefixes: vec![DEFAULT_EXCLUDED_LIBRARY.to_string()],
            remaining_order: RemainingOrder::Unspecified,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Using default config: {}", e);
                Self::default()
            }
        }
    }

    pub fn with_excluded_library_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.excluded_library_prefixes.push(prefix.into());
        self
    }

    pub fn without_excluded_libraries(mut self) -> Self {
        self.excluded_library_prefixes.clear();
        self
    }

    pub fn with_remaining_order(mut self, order: RemainingOrder) -> Self {
        self.remaining_order = order;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn eligibility_filter(&self) -> EligibilityFilter {
        EligibilityFilter::new(self.excluded_library_prefixes.clone())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.excluded_library_prefixes.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::Invalid("excluded library prefixes must not be empty".to_string()));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!("unknown log level: {}", self.log_level)));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
