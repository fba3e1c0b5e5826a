//! Application configuration.
//!
//! # Responsibility
//! - Load user-level settings from TOML with per-field defaults.
//! - Reject settings that would make the session misbehave.
//!
//! # Invariants
//! - A missing field always falls back to its default.
//! - `calorie_target`, when set, is finite and positive.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_USER_ID: &str = "local";

/// User-level settings shared by the CLI and the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Owner key for stored records.
    pub user_id: String,
    /// SQLite file holding daily records.
    pub db_path: Option<PathBuf>,
    /// One of `trace|debug|info|warn|error`; build default when unset.
    pub log_level: Option<String>,
    /// Absolute log directory; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    /// Daily calorie target in kcal. Enables calorie feedback when set.
    pub calorie_target: Option<f64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_id: DEFAULT_USER_ID.to_string(),
            db_path: None,
            log_level: None,
            log_dir: None,
            calorie_target: None,
        }
    }
}

impl AppConfig {
    /// Parses and validates configuration text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks cross-field value rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user_id.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "user_id",
                reason: "cannot be blank".to_string(),
            });
        }
        if let Some(target) = self.calorie_target {
            if !target.is_finite() || target <= 0.0 {
                return Err(ConfigError::Invalid {
                    field: "calorie_target",
                    reason: format!("must be a positive number, got {target}"),
                });
            }
        }
        Ok(())
    }
}

/// Configuration loading failures.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid config `{field}`: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}
