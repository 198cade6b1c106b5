//! Widget configuration.
//!
//! # Responsibility
//! - Provide defaults for root lookup, search debounce and logging.
//! - Load overrides from JSON or `NOTEPAD_*` environment variables.
//!
//! # Invariants
//! - A validated config has a non-empty root selector and a debounce window
//!   of at most `MAX_DEBOUNCE_MS`.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ROOT_SELECTOR: &str = "#app";
pub const DEFAULT_DEBOUNCE_MS: u64 = 50;
pub const MAX_DEBOUNCE_MS: u64 = 10_000;

pub const ENV_ROOT: &str = "NOTEPAD_ROOT";
pub const ENV_DEBOUNCE_MS: &str = "NOTEPAD_DEBOUNCE_MS";
pub const ENV_LOG_LEVEL: &str = "NOTEPAD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "NOTEPAD_LOG_DIR";

/// Configuration load/validation error.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    InvalidValue { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::InvalidValue { key, message } => write!(f, "invalid config `{key}`: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Runtime configuration for one app instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Selector of the widget root element.
    pub root_selector: String,
    /// Quiet window before a search input is applied.
    pub search_debounce_ms: u64,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logs.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root_selector: DEFAULT_ROOT_SELECTOR.to_string(),
            search_debounce_ms: DEFAULT_DEBOUNCE_MS,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Parses a JSON document; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `NOTEPAD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(root) = lookup(ENV_ROOT) {
            self.root_selector = root;
        }
        if let Some(raw) = lookup(ENV_DEBOUNCE_MS) {
            self.search_debounce_ms =
                raw.trim()
                    .parse()
                    .map_err(|err| ConfigError::InvalidValue {
                        key: "search_debounce_ms",
                        message: format!("`{raw}` is not a millisecond count: {err}"),
                    })?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(dir) = lookup(ENV_LOG_DIR).filter(|dir| !dir.trim().is_empty()) {
            self.log_dir = Some(PathBuf::from(dir));
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_selector.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "root_selector",
                message: "must not be empty".to_string(),
            });
        }
        if self.search_debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::InvalidValue {
                key: "search_debounce_ms",
                message: format!(
                    "{} exceeds maximum {MAX_DEBOUNCE_MS}",
                    self.search_debounce_ms
                ),
            });
        }
        Ok(())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
