//! SSO token configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// SSO token configuration (HS256 signing secret and TTL)
#[derive(Debug, Clone, Deserialize)]
pub struct SsoConfig {
    /// Shared HMAC secret for token signing and verification
    pub secret: SecretString,

    /// Token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,
}

impl SsoConfig {
    /// Validate SSO configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.secret.expose_secret().len() < 32 {
            return Err(ValidationError::SsoSecretTooShort);
        }
        if !(30..=3600).contains(&self.token_ttl_secs) {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

fn default_token_ttl() -> i64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, ttl: i64) -> SsoConfig {
        SsoConfig {
            secret: SecretString::new(secret.to_string()),
            token_ttl_secs: ttl,
        }
    }

    #[test]
    fn short_secret_is_rejected() {
        assert!(config("too-short", 120).validate().is_err());
        assert!(config(&"x".repeat(32), 120).validate().is_ok());
    }

    #[test]
    fn ttl_must_be_within_bounds() {
        let secret = "x".repeat(32);
        assert!(config(&secret, 0).validate().is_err());
        assert!(config(&secret, 10_000).validate().is_err());
        assert!(config(&secret, 300).validate().is_ok());
    }
}
