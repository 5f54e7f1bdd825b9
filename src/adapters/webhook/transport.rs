//! Outbound HTTP transport backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::domain::webhook::{HEADER_EVENT, HEADER_SIGNATURE, HEADER_SOURCE, HEADER_TIMESTAMP};
use crate::ports::{TransportResponse, WebhookHeaders, WebhookTransport};

/// reqwest-backed webhook transport.
///
/// Every call carries an explicit per-request timeout; a timed-out call is
/// an `Err` and the worker counts it as a failed attempt.
pub struct HttpWebhookTransport {
    client: reqwest::Client,
}

impl HttpWebhookTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WebhookTransport for HttpWebhookTransport {
    async fn post(
        &self,
        url: &str,
        headers: &WebhookHeaders,
        body: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, String> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(HEADER_EVENT, &headers.event)
            .header(HEADER_SIGNATURE, &headers.signature)
            .header(HEADER_TIMESTAMP, headers.timestamp.to_string())
            .header(HEADER_SOURCE, &headers.source)
            .timeout(timeout)
            .body(body.to_vec())
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Ok(TransportResponse { status, body })
    }

    async fn health_check(&self, url: &str, timeout: Duration) -> Result<u16, String> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        Ok(response.status().as_u16())
    }
}
