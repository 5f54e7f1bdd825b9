//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the `DOID`
//! prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use doid::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod database;
mod error;
mod redis;
mod server;
mod sso;
mod webhook;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};
pub use sso::SsoConfig;
pub use webhook::WebhookConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Redis configuration (nonce store)
    pub redis: RedisConfig,

    /// SSO token configuration (signing secret, TTL)
    pub sso: SsoConfig,

    /// Webhook delivery configuration (secret, endpoints, retry)
    pub webhook: WebhookConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `DOID` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `DOID__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `DOID__SSO__SECRET=...` -> `sso.secret = ...`
    /// - `DOID__WEBHOOK__ENDPOINTS=svc=https://...` -> `webhook.endpoints`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("DOID").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.redis.validate()?;
        self.sso.validate()?;
        self.webhook.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
