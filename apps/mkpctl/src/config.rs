//! # Configuration File
//!
//! Optional TOML settings for one run.
//!
//! ```toml
//! [validation]
//! top_limit = 5
//! module_predicates = ["MENTIONS", "USES"]
//!
//! [helper]
//! program = "publish-report"
//! args = ["--channel", "nightly"]
//! ```
//!
//! Lookup: `--config <path>` if given, else `<root>/mkp.toml` if present,
//! else built-in defaults.

use mkp_core::{MkpError, ValidationConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File looked up in the dataset root when no `--config` is given.
pub const CONFIG_FILE: &str = "mkp.toml";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MkpConfig {
    pub validation: ValidationConfig,
    pub helper: Option<HelperConfig>,
}

/// External program that receives the JSON report after a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HelperConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl MkpConfig {
    /// Parse TOML text.
    pub fn from_toml(text: &str) -> Result<Self, MkpError> {
        toml::from_str(text)
            .map_err(|e| MkpError::load_unreadable(format!("Invalid configuration: {}", e)))
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, MkpError> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                MkpError::load_missing(format!("Config file not found: {}", path.display()))
            }
            _ => MkpError::load_unreadable(format!(
                "Cannot read config file {}: {}",
                path.display(),
                e
            )),
        })?;

        Self::from_toml(&text).map_err(|e| {
            MkpError::load_unreadable(format!("{}: {}", path.display(), e))
        })
    }

    /// Resolve the configuration for a dataset at `root`.
    pub fn resolve(explicit: Option<&Path>, root: &Path) -> Result<Self, MkpError> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config");
            return Self::load(path);
        }

        let implicit = root.join(CONFIG_FILE);
        if implicit.is_file() {
            tracing::debug!(path = %implicit.display(), "loading config");
            Self::load(&implicit)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply a `--limit` override.
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        if let Some(limit) = limit {
            self.validation.top_limit = limit;
        }
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================
