use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub betting: BettingConfig,
    #[serde(default)]
    pub odds: OddsConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            betting: BettingConfig::default(),
            odds: OddsConfig::default(),
            wallet: WalletConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BettingConfig {
    /// Minimum accepted stake in SOL
    #[serde(default = "default_min_stake")]
    pub min_stake: Decimal,
    /// Maximum matches shown in a listing
    #[serde(default = "default_max_listed_matches")]
    pub max_listed_matches: usize,
    /// Number of history entries shown per request
    #[serde(default = "default_history_display")]
    pub history_display: usize,
}

fn default_min_stake() -> Decimal {
    dec!(0.001)
}

fn default_max_listed_matches() -> usize {
    5
}

fn default_history_display() -> usize {
    5
}

impl Default for BettingConfig {
    fn default() -> Self {
        Self {
            min_stake: default_min_stake(),
            max_listed_matches: default_max_listed_matches(),
            history_display: default_history_display(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OddsConfig {
    /// Seconds before the cached match list is considered stale
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for OddsConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    /// Balance the simulated wallet starts with, in SOL
    #[serde(default = "default_starting_balance")]
    pub starting_balance: Decimal,
    /// Whether the simulated wallet starts connected
    #[serde(default)]
    pub start_connected: bool,
}

fn default_starting_balance() -> Decimal {
    dec!(1.0)
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            starting_balance: default_starting_balance(),
            start_connected: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(
                File::from(config_dir.join(
                    std::env::var("TOUCHLINE_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (TOUCHLINE_BETTING__MIN_STAKE, etc.)
            .add_source(
                Environment::with_prefix("TOUCHLINE")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.betting.min_stake <= Decimal::ZERO {
            errors.push("betting.min_stake must be positive".to_string());
        }

        if self.betting.max_listed_matches == 0 {
            errors.push("betting.max_listed_matches must be at least 1".to_string());
        }

        if self.betting.history_display == 0 {
            errors.push("betting.history_display must be at least 1".to_string());
        }

        if self.wallet.starting_balance < Decimal::ZERO {
            errors.push("wallet.starting_balance cannot be negative".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.betting.min_stake, dec!(0.001));
        assert_eq!(config.betting.max_listed_matches, 5);
        assert_eq!(config.odds.cache_ttl_secs, 300);
    }

    #[test]
    fn test_validate_collects_all_violations() {
        let mut config = AppConfig::default();
        config.betting.min_stake = dec!(0);
        config.betting.max_listed_matches = 0;
        config.wallet.starting_balance = dec!(-1);

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
