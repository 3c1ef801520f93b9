//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Ledger configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Ledger configuration.
///
/// Per-channel transaction minimums are configuration, not hardcoded
/// constants; products carry their own balance floors separately.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Minimum amount accepted for a teller cash deposit, in IDR.
    #[serde(default = "default_teller_minimum_deposit")]
    pub teller_minimum_deposit: Decimal,
    /// Minimum amount accepted for a teller cash withdrawal, if any.
    #[serde(default)]
    pub teller_minimum_withdrawal: Option<Decimal>,
}

fn default_teller_minimum_deposit() -> Decimal {
    Decimal::new(10_000, 0)
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            teller_minimum_deposit: default_teller_minimum_deposit(),
            teller_minimum_withdrawal: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MINIBANK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ledger_config_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.teller_minimum_deposit, dec!(10_000));
        assert!(config.teller_minimum_withdrawal.is_none());
    }

    #[test]
    fn test_database_config_defaults() {
        let config: DatabaseConfig =
            serde_json::from_str(r#"{"url": "postgres://localhost/minibank"}"#).unwrap();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
    }
}
