//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `NEST_DATA_DIR` - Directory holding the saved cart (default: `.falcons-nest`)
//! - `NEST_CART_KEY` - Key the cart is saved under (default: `falconsNestCart`)
//! - `NEST_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)
//! - `RUST_LOG` - Standard tracing filter, overrides the default levels

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::persistence::{DEFAULT_CART_KEY, FileStore, validate_key};

const DEFAULT_DATA_DIR: &str = ".falcons-nest";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory for the file-backed cart slot
    pub data_dir: PathBuf,
    /// Key the cart is saved under
    pub cart_key: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = PathBuf::from(get_or_default(&lookup, "NEST_DATA_DIR", DEFAULT_DATA_DIR));

        let cart_key = get_or_default(&lookup, "NEST_CART_KEY", DEFAULT_CART_KEY);
        validate_key(&cart_key)
            .map_err(|e| ConfigError::InvalidEnvVar("NEST_CART_KEY".to_string(), e.to_string()))?;

        let log_format = get_or_default(&lookup, "NEST_LOG_FORMAT", "pretty")
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::InvalidEnvVar("NEST_LOG_FORMAT".to_string(), e))?;

        Ok(Self {
            data_dir,
            cart_key,
            log_format,
        })
    }

    /// A file store rooted at the configured data directory.
    #[must_use]
    pub fn file_store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }
}

/// Get a variable, falling back to `default` when unset or empty.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.cart_key, "falconsNestCart");
        assert_eq!(config.data_dir, PathBuf::from(".falcons-nest"));
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("NEST_DATA_DIR", "/var/lib/nest"),
            ("NEST_CART_KEY", "kioskCart"),
            ("NEST_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/nest"));
        assert_eq!(config.cart_key, "kioskCart");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.file_store().dir(), config.data_dir.as_path());
    }

    #[test]
    fn test_empty_value_uses_default() {
        let config = StoreConfig::from_lookup(lookup_from(&[("NEST_CART_KEY", "")])).unwrap();
        assert_eq!(config.cart_key, DEFAULT_CART_KEY);
    }

    #[test]
    fn test_invalid_cart_key() {
        let err =
            StoreConfig::from_lookup(lookup_from(&[("NEST_CART_KEY", "../cart")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref name, _) if name == "NEST_CART_KEY"));
    }

    #[test]
    fn test_invalid_log_format() {
        let err =
            StoreConfig::from_lookup(lookup_from(&[("NEST_LOG_FORMAT", "xml")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid environment variable NEST_LOG_FORMAT: expected 'pretty' or 'json', got 'xml'"
        );
    }
}
