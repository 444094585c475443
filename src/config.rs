//! Catalog configuration.
//!
//! Loaded from JSON; every key is optional and falls back to the defaults
//! below.
//!
//! ```json
//! { "disallowed_categories": ["romance", "horror"], "strict_borrow": true }
//! ```

use std::{collections::BTreeSet, fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category rejected when no configuration is supplied
pub const DEFAULT_DISALLOWED_CATEGORY: &str = "romance";

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunable catalog behaviour
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Categories that make `add` fail
    pub disallowed_categories: BTreeSet<String>,
    /// Reject borrowing a book that is already borrowed
    pub strict_borrow: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            disallowed_categories: BTreeSet::from([DEFAULT_DISALLOWED_CATEGORY.to_string()]),
            strict_borrow: false,
        }
    }
}

impl CatalogConfig {
    /// Parse a configuration from JSON text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the text is not a valid configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::Read` if the file cannot be read and a
    /// `ConfigError::Parse` if its contents are not a valid configuration.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;
        tracing::debug!(path = %path.display(), "Loaded catalog config");
        Self::from_json_str(&contents)
    }

    /// Builder-style toggle for strict borrowing
    #[must_use]
    pub fn with_strict_borrow(mut self, strict: bool) -> Self {
        self.strict_borrow = strict;
        self
    }

    /// Builder-style replacement of the disallowed set
    #[must_use]
    pub fn with_disallowed<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disallowed_categories = categories.into_iter().map(Into::into).collect();
        self
    }
}
