//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,

    /// Listen address
    pub bind_addr: String,

    /// Secret key for signing bearer tokens
    pub jwt_secret: String,

    /// Token lifetime in seconds
    pub jwt_lifetime_secs: i64,

    /// Argon2 time cost (iterations). Defaults to Argon2's own default of 2;
    /// this is not a bcrypt cost, so bcrypt's usual 10 does not carry over.
    pub password_hash_cost: u32,

    /// Load the development data set at start-up
    pub seed_data: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            port: 4000,
            bind_addr: "0.0.0.0".to_string(),
            // In production, this MUST be set via environment variable
            jwt_secret: "test-secret".to_string(),
            jwt_lifetime_secs: 7 * 24 * 60 * 60,
            password_hash_cost: argon2::Params::DEFAULT_T_COST,
            seed_data: true,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            port: parse_var("PORT", defaults.port)?,
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_lifetime_secs: parse_var("JWT_LIFETIME_SECS", defaults.jwt_lifetime_secs)?,
            password_hash_cost: parse_var("PASSWORD_HASH_COST", defaults.password_hash_cost)?,
            seed_data: parse_var("SEED_DATA", defaults.seed_data)?,
        };

        if config.jwt_lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue("JWT_LIFETIME_SECS".to_string()));
        }
        if config.password_hash_cost == 0 {
            return Err(ConfigError::InvalidValue("PASSWORD_HASH_COST".to_string()));
        }
        if config.jwt_secret.is_empty() {
            return Err(ConfigError::MissingRequired("JWT_SECRET".to_string()));
        }

        Ok(config)
    }

    /// `host:port` the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Reads `name`, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 4000);
        assert_eq!(config.jwt_lifetime_secs, 604_800);
        assert_eq!(config.bind_address(), "0.0.0.0:4000");
        assert!(config.seed_data);
        assert_eq!(config.password_hash_cost, 2);
        assert_eq!(config.password_hash_cost, argon2::Params::DEFAULT_T_COST);
    }

    #[test]
    fn test_parse_var_falls_back_when_unset() {
        let value: u16 = parse_var("BAZAAR_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }
}
