//! Webhook transport port - outbound HTTP with bounded timeouts.

use async_trait::async_trait;
use std::time::Duration;

/// Headers attached to a signed webhook POST.
#[derive(Debug, Clone)]
pub struct WebhookHeaders {
    /// `X-DOID-Event` value.
    pub event: String,

    /// `X-DOID-Signature` value (hex HMAC-SHA256 of the body).
    pub signature: String,

    /// `X-DOID-Timestamp` value (Unix seconds).
    pub timestamp: i64,

    /// `X-Webhook-Source` value identifying this deployment.
    pub source: String,
}

/// Response observed from the downstream service.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    /// 2xx means the downstream service accepted the event.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound HTTP used by the delivery worker and health checker.
///
/// A timed-out call returns `Err`, which the worker treats as a delivery
/// failure, never as success.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// POSTs the signed payload bytes to the service webhook URL.
    async fn post(
        &self,
        url: &str,
        headers: &WebhookHeaders,
        body: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, String>;

    /// GETs a health-check URL, returning the HTTP status.
    async fn health_check(&self, url: &str, timeout: Duration) -> Result<u16, String>;
}
