//! Quote tool configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use sticker_core::{CoreError, PricingEngine, PricingTables};

/// Default log filter when `STICKER_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Quote tool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// JSON pricing tables to use instead of the standard price list
    pub tables_path: Option<PathBuf>,

    /// tracing-subscriber filter directive
    pub log_filter: String,
}

impl QuoteConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tables_path = match lookup("STICKER_PRICING_TABLES") {
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::InvalidValue("STICKER_PRICING_TABLES".to_string()))
            }
            Some(path) => Some(PathBuf::from(path)),
            None => None,
        };

        let log_filter = lookup("STICKER_LOG")
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(QuoteConfig {
            tables_path,
            log_filter,
        })
    }

    /// Builds the engine: standard tables, or the configured file.
    pub fn engine(&self) -> Result<PricingEngine, ConfigError> {
        let Some(path) = &self.tables_path else {
            return Ok(PricingEngine::standard().clone());
        };

        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::TablesUnreadable {
            path: path.display().to_string(),
            source,
        })?;
        let tables = PricingTables::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            sizes = tables.base_prices.len(),
            tiers = tables.quantity_tiers.len(),
            "Loaded pricing tables"
        );
        Ok(PricingEngine::new(tables)?)
    }
}

impl Default for QuoteConfig {
    fn default() -> Self {
        QuoteConfig {
            tables_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Cannot read pricing tables at {path}: {source}")]
    TablesUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Pricing tables rejected: {0}")]
    Tables(#[from] CoreError),
}
