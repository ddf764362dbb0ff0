//! Process configuration, read once from the environment at startup.

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use axum::http::HeaderValue;
use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Storage connection string.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_host")]
    pub api_host: String,

    #[serde(default = "default_api_port")]
    pub api_port: u16,

    #[serde(default = "default_host")]
    pub gui_host: String,

    #[serde(default = "default_gui_port")]
    pub gui_port: u16,

    /// HTML document returned by the GUI service.
    #[serde(default = "default_gui_page")]
    pub gui_page: PathBuf,

    /// How many times a connection is attempted before a request gives up.
    #[serde(default = "default_connect_attempts")]
    pub db_connect_attempts: u32,

    /// Fixed pause between connection attempts.
    #[serde(default = "default_retry_delay_secs")]
    pub db_connect_retry_delay_secs: u64,

    /// Unset means one connection per request.
    #[serde(default)]
    pub db_pool_size: Option<u32>,

    /// Create the database and the expenses table on API startup.
    #[serde(default = "default_true")]
    pub db_bootstrap_schema: bool,

    /// Unset allows any origin.
    #[serde(default)]
    pub cors_allowed_origin: Option<String>,
}

fn default_database_url() -> String {
    "sqlite://expenses.db".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_api_port() -> u16 {
    8081
}

fn default_gui_port() -> u16 {
    5000
}

fn default_gui_page() -> PathBuf {
    PathBuf::from("static/listExpense.html")
}

fn default_connect_attempts() -> u32 {
    10
}

fn default_retry_delay_secs() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            api_host: default_host(),
            api_port: default_api_port(),
            gui_host: default_host(),
            gui_port: default_gui_port(),
            gui_page: default_gui_page(),
            db_connect_attempts: default_connect_attempts(),
            db_connect_retry_delay_secs: default_retry_delay_secs(),
            db_pool_size: None,
            db_bootstrap_schema: true,
            cors_allowed_origin: None,
        }
    }
}

impl Config {
    /// Load configuration from the environment. Binaries read `.env` into the
    /// environment before calling this.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Config = envy::from_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid("DATABASE_URL must not be empty".to_string()));
        }
        if self.db_connect_attempts == 0 {
            return Err(ConfigError::Invalid(
                "DB_CONNECT_ATTEMPTS must be at least 1".to_string(),
            ));
        }
        if self.db_pool_size == Some(0) {
            return Err(ConfigError::Invalid(
                "DB_POOL_SIZE must be at least 1 when set".to_string(),
            ));
        }
        if let Some(origin) = &self.cors_allowed_origin {
            if origin.parse::<HeaderValue>().is_err() {
                return Err(ConfigError::Invalid(format!(
                    "CORS_ALLOWED_ORIGIN is not a valid header value: {:?}",
                    origin
                )));
            }
        }
        Ok(())
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.db_connect_retry_delay_secs)
    }

    pub fn api_addr(&self) -> Result<SocketAddr, ConfigError> {
        socket_addr(&self.api_host, self.api_port)
    }

    pub fn gui_addr(&self) -> Result<SocketAddr, ConfigError> {
        socket_addr(&self.gui_host, self.gui_port)
    }
}

fn socket_addr(host: &str, port: u16) -> Result<SocketAddr, ConfigError> {
    format!("{}:{}", host, port)
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("invalid listen address {}:{}", host, port)))
}
