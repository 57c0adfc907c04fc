//! Shop configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `POCKET_SHOP_DATA_DIR` - Directory holding durable storage (default: .pocket-shop)
//! - `POCKET_SHOP_TAX_RATE` - Tax rate as a decimal fraction in [0, 1] (default: 0.07)
//! - `POCKET_SHOP_LOG_FORMAT` - `text` or `json` (default: text)
//!
//! Log verbosity follows the standard `RUST_LOG` filter.

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use pocket_shop_core::TAX_RATE;

const DEFAULT_DATA_DIR: &str = ".pocket-shop";
const DURABLE_FILE_NAME: &str = "durable.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// Shop configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Directory holding durable storage
    pub data_dir: PathBuf,
    /// Tax applied to cart subtotals
    pub tax_rate: Decimal,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            tax_rate: TAX_RATE,
            log_format: LogFormat::Text,
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup("POCKET_SHOP_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map_or(defaults.data_dir, PathBuf::from);

        let tax_rate = match lookup("POCKET_SHOP_TAX_RATE") {
            Some(raw) => parse_tax_rate(&raw)?,
            None => defaults.tax_rate,
        };

        let log_format = match lookup("POCKET_SHOP_LOG_FORMAT") {
            Some(raw) => raw.parse().map_err(|e| {
                ConfigError::InvalidEnvVar("POCKET_SHOP_LOG_FORMAT".to_string(), e)
            })?,
            None => defaults.log_format,
        };

        Ok(Self {
            data_dir,
            tax_rate,
            log_format,
        })
    }

    /// Path of the durable storage file.
    #[must_use]
    pub fn durable_store_path(&self) -> PathBuf {
        self.data_dir.join(DURABLE_FILE_NAME)
    }
}

fn parse_tax_rate(raw: &str) -> Result<Decimal, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("POCKET_SHOP_TAX_RATE".to_string(), reason);

    let rate = raw
        .trim()
        .parse::<Decimal>()
        .map_err(|e| invalid(e.to_string()))?;
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(invalid(format!("{rate} is outside [0, 1]")));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ShopConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".pocket-shop"));
        assert_eq!(config.tax_rate, TAX_RATE);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(
            config.durable_store_path(),
            PathBuf::from(".pocket-shop/durable.json")
        );
    }

    #[test]
    fn test_overrides() {
        let config = ShopConfig::from_lookup(lookup(&[
            ("POCKET_SHOP_DATA_DIR", "/tmp/shop"),
            ("POCKET_SHOP_TAX_RATE", "0.21"),
            ("POCKET_SHOP_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/shop"));
        assert_eq!(config.tax_rate, Decimal::new(21, 2));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_tax_rate() {
        for raw in ["abc", "-0.1", "1.5"] {
            let err = ShopConfig::from_lookup(lookup(&[("POCKET_SHOP_TAX_RATE", raw)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "POCKET_SHOP_TAX_RATE"));
        }
    }

    #[test]
    fn test_invalid_log_format() {
        let result = ShopConfig::from_lookup(lookup(&[("POCKET_SHOP_LOG_FORMAT", "xml")]));
        assert!(result.is_err());
    }
}
