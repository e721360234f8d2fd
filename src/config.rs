//! Application configuration
//!
//! Host, port, CORS, and auth settings. Loadable from a JSON file; the JWT
//! signing secret may be overridden through `DEMANDCAST_JWT_SECRET` so it
//! never has to live on disk.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the JWT signing secret.
pub const JWT_SECRET_ENV: &str = "DEMANDCAST_JWT_SECRET";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means permissive (development)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Whether bearer-token authentication is enforced
    #[serde(default = "default_true")]
    pub authentication_enabled: bool,

    /// HS256 signing secret for issued tokens
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// Lifetime of issued tokens, in seconds (default: 30 days)
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_true() -> bool {
    true
}

fn default_jwt_secret() -> String {
    "CHANGE_THIS_SECRET_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> i64 {
    60 * 60 * 24 * 30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            authentication_enabled: true,
            jwt_secret: default_jwt_secret(),
            token_ttl_secs: default_token_ttl(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut config: AppConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        config.apply_env();
        Ok(config)
    }

    /// Default configuration with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(secret) = std::env::var(JWT_SECRET_ENV) {
            if !secret.is_empty() {
                self.jwt_secret = secret;
            }
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert!(config.authentication_enabled);
        assert_eq!(config.token_ttl_secs, 2_592_000);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            port: 8080,
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.authentication_enabled);
    }
}
