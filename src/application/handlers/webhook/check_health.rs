//! CheckWebhookHealthHandler - probes downstream webhook receivers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::ServiceCode;
use crate::domain::webhook::WebhookError;
use crate::ports::WebhookTransport;

/// Health of one configured webhook receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceHealth {
    pub service: ServiceCode,
    pub url: String,
    pub healthy: bool,
    /// HTTP status observed, when the probe got a response at all.
    pub status: Option<u16>,
}

/// Handler probing the sibling `/health` path of every configured webhook
/// URL with a bounded timeout. A timeout or non-2xx counts as unhealthy;
/// probing never affects delivery.
pub struct CheckWebhookHealthHandler {
    transport: Arc<dyn WebhookTransport>,
    endpoints: HashMap<ServiceCode, String>,
    timeout: Duration,
}

impl CheckWebhookHealthHandler {
    pub fn new(
        transport: Arc<dyn WebhookTransport>,
        endpoints: HashMap<ServiceCode, String>,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            endpoints,
            timeout,
        }
    }

    pub async fn handle(&self) -> Result<Vec<ServiceHealth>, WebhookError> {
        let mut report = Vec::with_capacity(self.endpoints.len());
        for (service, webhook_url) in &self.endpoints {
            let url = health_url(webhook_url);
            let status = self.transport.health_check(&url, self.timeout).await.ok();
            report.push(ServiceHealth {
                service: service.clone(),
                url,
                healthy: status.is_some_and(|s| (200..300).contains(&s)),
                status,
            });
        }
        report.sort_by(|a, b| a.service.as_str().cmp(b.service.as_str()));
        Ok(report)
    }
}

/// Sibling `/health` path of a webhook URL: the last path segment is
/// replaced, so `https://x/webhooks/license` probes `https://x/webhooks/health`.
fn health_url(webhook_url: &str) -> String {
    let trimmed = webhook_url.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((base, _)) if base.contains("://") => format!("{}/health", base),
        _ => format!("{}/health", trimmed),
    }
}
