//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("SSO secret must be at least 32 bytes")]
    SsoSecretTooShort,

    #[error("Invalid SSO token TTL (must be 30..=3600 seconds)")]
    InvalidTokenTtl,

    #[error("Webhook secret must be at least 32 bytes")]
    WebhookSecretTooShort,

    #[error("Invalid webhook endpoint entry: {0}")]
    InvalidWebhookEndpoint(String),

    #[error("Invalid webhook retry settings")]
    InvalidRetrySettings,
}
