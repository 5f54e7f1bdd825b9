//! Webhook delivery configuration

use std::collections::HashMap;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::ServiceCode;
use crate::domain::webhook::RetryPolicy;

use super::error::ValidationError;

/// Webhook delivery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Shared HMAC secret for payload signatures
    pub secret: SecretString,

    /// `X-Webhook-Source` value identifying this deployment
    #[serde(default = "default_source")]
    pub source: String,

    /// Receiver endpoints as `service=url` pairs, comma-separated
    #[serde(default)]
    pub endpoints: String,

    /// Per-request delivery timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Delivery attempts per event, including the first
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,

    /// Exponential backoff base in milliseconds
    #[serde(default = "default_retry_backoff_base_ms")]
    pub retry_backoff_base_ms: u64,
}

impl WebhookConfig {
    /// Get delivery timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the retry policy from the configured attempt cap and base.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_max_attempts,
            Duration::from_millis(self.retry_backoff_base_ms),
        )
    }

    /// Parse the endpoint list into a service -> URL map.
    pub fn endpoint_map(&self) -> Result<HashMap<ServiceCode, String>, ValidationError> {
        let mut map = HashMap::new();
        for entry in self.endpoints.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let (service, url) = entry
                .split_once('=')
                .ok_or_else(|| ValidationError::InvalidWebhookEndpoint(entry.to_string()))?;
            let code = ServiceCode::new(service.trim())
                .map_err(|_| ValidationError::InvalidWebhookEndpoint(entry.to_string()))?;
            let url = url.trim();
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidWebhookEndpoint(entry.to_string()));
            }
            map.insert(code, url.to_string());
        }
        Ok(map)
    }

    /// Validate webhook configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.secret.expose_secret().len() < 32 {
            return Err(ValidationError::WebhookSecretTooShort);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.retry_max_attempts == 0 || self.retry_max_attempts > 10 {
            return Err(ValidationError::InvalidRetrySettings);
        }
        self.endpoint_map()?;
        Ok(())
    }
}

fn default_source() -> String {
    "doid-platform".to_string()
}

fn default_timeout() -> u64 {
    15
}

fn default_retry_max_attempts() -> u32 {
    3
}

fn default_retry_backoff_base_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoints: &str) -> WebhookConfig {
        WebhookConfig {
            secret: SecretString::new("x".repeat(32)),
            source: default_source(),
            endpoints: endpoints.to_string(),
            timeout_secs: default_timeout(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_base_ms: default_retry_backoff_base_ms(),
        }
    }

    #[test]
    fn endpoint_map_parses_comma_separated_pairs() {
        let config = config(
            "smart_review=https://sr.example.com/webhooks/license, \
             editorial=https://ed.example.com/webhooks/license",
        );
        let map = config.endpoint_map().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(
            map[&ServiceCode::new("smart_review").unwrap()],
            "https://sr.example.com/webhooks/license"
        );
    }

    #[test]
    fn empty_endpoint_list_is_allowed() {
        assert!(config("").endpoint_map().unwrap().is_empty());
    }

    #[test]
    fn malformed_entries_are_rejected() {
        assert!(config("smart_review").endpoint_map().is_err());
        assert!(config("smart_review=ftp://nope").endpoint_map().is_err());
        assert!(config("Not A Slug=https://x.example.com").endpoint_map().is_err());
    }

    #[test]
    fn retry_policy_uses_configured_values() {
        let mut cfg = config("");
        cfg.retry_max_attempts = 5;
        cfg.retry_backoff_base_ms = 250;
        let policy = cfg.retry_policy();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.base, Duration::from_millis(250));
    }

    #[test]
    fn validation_bounds_timeout_and_attempts() {
        let mut cfg = config("");
        cfg.timeout_secs = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = config("");
        cfg.retry_max_attempts = 0;
        assert!(cfg.validate().is_err());

        assert!(config("").validate().is_ok());
    }
}
