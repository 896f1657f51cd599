//! Configuration for SIFT.
//!
//! Config file resolution order:
//! 1. Explicit path passed to Config::load_from()
//! 2. SIFT_CONFIG environment variable
//! 3. Default: <config dir>/sift/sift.toml
//!
//! A missing file yields the defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// What to do with a date operand that is not valid RFC 3339.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPolicy {
    /// Pass the raw text through and let the backend decide
    #[default]
    Lenient,
    /// Reject the request with `Error::UnparseableTimestamp`
    Strict,
}

/// Translation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Handling of unparseable date operands.
    #[serde(default)]
    pub timestamps: TimestampPolicy,

    /// Escape regex metacharacters in document patterns.
    #[serde(default = "default_escape_patterns")]
    pub escape_patterns: bool,

    /// Table alias prepended to SQL field names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_alias: Option<String>,
}

fn default_escape_patterns() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timestamps: TimestampPolicy::default(),
            escape_patterns: default_escape_patterns(),
            table_alias: None,
        }
    }
}

impl Config {
    /// Strict-timestamp variant of the defaults.
    pub fn strict() -> Self {
        Self {
            timestamps: TimestampPolicy::Strict,
            ..Self::default()
        }
    }

    /// Load config using the default resolution order.
    pub fn load() -> Result<Self> {
        match resolve_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save config to a specific file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("SIFT_CONFIG") {
        return Some(PathBuf::from(path));
    }

    ProjectDirs::from("", "", "sift").map(|dirs| dirs.config_dir().join("sift.toml"))
}
