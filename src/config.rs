//! Configuration module for loading and parsing TOML configuration files.

use chains_client::{ChainsQuery, ClientConfig, ContractType, StrikeRange, Strategy};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the configuration file path.
pub const CONFIG_PATH_VAR: &str = "CHAINS_CONFIG";
/// Configuration file read when [`CONFIG_PATH_VAR`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "chains.toml";

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Broker API configuration.
    pub api: ApiConfig,
    /// Chains query configuration.
    pub query: QueryConfig,
}

/// Broker API configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL the endpoint paths are resolved against.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Bearer token, if the API requires one.
    pub access_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: ClientConfig::default().base_url,
            timeout_secs: 30,
            access_token: None,
        }
    }
}

impl ApiConfig {
    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the HTTP client configuration.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: self.timeout(),
            access_token: self.access_token.clone(),
            ..Default::default()
        }
    }
}

/// Chains query configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Underlying symbol.
    pub symbol: String,
    /// Contract type filter, e.g. `"CALL"`.
    pub contract_type: Option<ContractType>,
    /// Strikes above and below the money.
    pub strike_count: Option<u32>,
    /// Chain strategy, e.g. `"SINGLE"`.
    pub strategy: Option<Strategy>,
    /// Moneyness range, e.g. `"NTM"`.
    pub range: Option<StrikeRange>,
    /// Include an underlying quote.
    pub include_quotes: Option<bool>,
    /// Earliest expiration.
    pub from_date: Option<String>,
    /// Latest expiration.
    pub to_date: Option<String>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            symbol: "AAPL".to_string(),
            contract_type: None,
            strike_count: None,
            strategy: None,
            range: None,
            include_quotes: None,
            from_date: None,
            to_date: None,
        }
    }
}

impl QueryConfig {
    /// Builds the request query.
    #[must_use]
    pub fn to_query(&self) -> ChainsQuery {
        ChainsQuery {
            contract_type: self.contract_type,
            strike_count: self.strike_count,
            strategy: self.strategy,
            range: self.range,
            include_quotes: self.include_quotes,
            from_date: self.from_date.clone(),
            to_date: self.to_date.clone(),
            ..ChainsQuery::new(self.symbol.clone())
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Arguments
    /// * `content` - TOML content as string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration the way the binary does.
    ///
    /// Reads the file named by `CHAINS_CONFIG` (or `chains.toml`), falling back
    /// to defaults when it does not exist, then applies `CHAINS_BASE_URL`,
    /// `CHAINS_ACCESS_TOKEN` and `CHAINS_SYMBOL` overrides.
    ///
    /// # Errors
    /// Returns error if an existing file cannot be read or parsed, or the final
    /// configuration is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config: Config = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(e.into()),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides looked up by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("CHAINS_BASE_URL") {
            self.api.base_url = base_url;
        }
        if let Some(token) = lookup("CHAINS_ACCESS_TOKEN") {
            self.api.access_token = Some(token);
        }
        if let Some(symbol) = lookup("CHAINS_SYMBOL") {
            self.query.symbol = symbol;
        }
    }

    /// Validates the configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "api base_url cannot be empty".to_string(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "api timeout_secs must be positive".to_string(),
            ));
        }
        if self.query.symbol.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "query symbol cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[api]
base_url = "https://broker.test/v1/"
timeout_secs = 10
access_token = "abc"

[query]
symbol = "MSFT"
contract_type = "PUT"
strike_count = 6
strategy = "SINGLE"
range = "OTM"
include_quotes = true
from_date = "2024-01-01"
to_date = "2024-02-01"
"#;

        let config = Config::parse(toml_content).expect("should parse");
        assert_eq!(config.api.base_url, "https://broker.test/v1/");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.api.access_token.as_deref(), Some("abc"));
        assert_eq!(config.query.symbol, "MSFT");
        assert_eq!(config.query.contract_type, Some(ContractType::Put));
        assert_eq!(config.query.range, Some(StrikeRange::OutOfTheMoney));
        assert_eq!(config.query.strike_count, Some(6));
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = Config::parse("").expect("should parse");

        assert_eq!(config.api.base_url, ClientConfig::default().base_url);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.query.symbol, "AAPL");
        assert!(config.query.contract_type.is_none());
    }

    #[test]
    fn test_parse_unknown_enum_value() {
        let result = Config::parse("[query]\ncontract_type = \"STRADDLE\"\n");

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_to_query() {
        let config = Config::parse(
            "[query]\nsymbol = \"SPY\"\ncontract_type = \"CALL\"\nstrike_count = 3\n",
        )
        .unwrap();

        let query = config.query.to_query();
        assert_eq!(
            query,
            ChainsQuery::new("SPY")
                .contract_type(ContractType::Call)
                .strike_count(3)
        );
    }

    #[test]
    fn test_client_config() {
        let config = Config::parse("[api]\nbase_url = \"http://localhost:9000\"\ntimeout_secs = 5\n")
            .unwrap();

        let client_config = config.api.client_config();
        assert_eq!(client_config.base_url, "http://localhost:9000");
        assert_eq!(client_config.timeout, Duration::from_secs(5));
        assert!(client_config.access_token.is_none());
    }

    #[test]
    fn test_apply_overrides() {
        let env = HashMap::from([
            ("CHAINS_BASE_URL", "http://override.test/"),
            ("CHAINS_SYMBOL", "TSLA"),
        ]);
        let mut config = Config::default();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://override.test/");
        assert_eq!(config.query.symbol, "TSLA");
        assert!(config.api.access_token.is_none());
    }

    #[test]
    fn test_validation_empty_symbol() {
        let result = Config::parse("[query]\nsymbol = \"\"\n");

        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/chains.toml");

        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
