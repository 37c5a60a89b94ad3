//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file; every field has a default,
//! so an empty file yields a working setup.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::engine::FeeSchedule;
use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Fee schedule applied at order entry and settlement.
    #[serde(default)]
    pub fees: FeeSchedule,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format: "pretty" or "json".
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the file cannot be read or parsed,
    /// or when a value fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.logging.level.is_empty() {
            return Err(ConfigError::MissingField {
                field: "logging.level",
            }
            .into());
        }
        if self.fees.trading_fee_rate < Decimal::ZERO || self.fees.house_fee_rate < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "fees",
                reason: "fee rates must not be negative".to_string(),
            }
            .into());
        }
        if !self.fees.is_solvent() {
            return Err(ConfigError::InvalidValue {
                field: "fees",
                reason: format!(
                    "combined round-trip rate {} exceeds the pool",
                    self.fees.combined_round_trip_rate()
                ),
            }
            .into());
        }
        Ok(())
    }

    /// Install the global tracing subscriber from the logging section.
    ///
    /// `RUST_LOG` takes precedence over the configured level when set.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}
