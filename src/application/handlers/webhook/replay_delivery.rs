//! ReplayDeliveryHandler - manual re-send of a logged delivery.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::domain::foundation::{DeliveryId, Timestamp};
use crate::domain::webhook::{DeliveryOutcome, DeliveryRecord, RetryPolicy, WebhookError};
use crate::ports::{DeliveryLog, WebhookHeaders, WebhookTransport};

/// Command to replay a logged delivery by id.
#[derive(Debug, Clone)]
pub struct ReplayDeliveryCommand {
    pub delivery_id: DeliveryId,
}

/// Handler re-sending the exact payload bytes of a logged delivery.
///
/// The stored payload and signature are reused verbatim, so the receiver
/// sees the same body and the same valid signature as the original attempt.
/// Each replay appends a fresh log record; the original is never mutated.
pub struct ReplayDeliveryHandler {
    log: Arc<dyn DeliveryLog>,
    transport: Arc<dyn WebhookTransport>,
    policy: RetryPolicy,
    timeout: Duration,
    source: String,
}

impl ReplayDeliveryHandler {
    pub fn new(
        log: Arc<dyn DeliveryLog>,
        transport: Arc<dyn WebhookTransport>,
        policy: RetryPolicy,
        timeout: Duration,
        source: String,
    ) -> Self {
        Self {
            log,
            transport,
            policy,
            timeout,
            source,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReplayDeliveryCommand,
    ) -> Result<DeliveryRecord, WebhookError> {
        let original = self
            .log
            .get(&cmd.delivery_id)
            .await?
            .ok_or(WebhookError::DeliveryNotFound(cmd.delivery_id))?;

        // The timestamp header must match the signed payload, not the clock.
        let timestamp = serde_json::from_str::<serde_json::Value>(&original.payload)
            .ok()
            .and_then(|v| v.get("timestamp").and_then(|t| t.as_i64()))
            .unwrap_or_else(|| original.created_at.as_unix_secs());

        let headers = WebhookHeaders {
            event: original.event_type.clone(),
            signature: original.signature.clone(),
            timestamp,
            source: self.source.clone(),
        };

        let mut http_status = None;
        let mut response_snippet;
        let mut attempt = 0u32;
        let outcome = loop {
            attempt += 1;
            match self
                .transport
                .post(
                    &original.target_url,
                    &headers,
                    original.payload.as_bytes(),
                    self.timeout,
                )
                .await
            {
                Ok(response) if response.is_success() => {
                    http_status = Some(response.status);
                    response_snippet = Some(DeliveryRecord::snippet_of(&response.body));
                    break DeliveryOutcome::Succeeded;
                }
                Ok(response) => {
                    warn!(
                        delivery_id = %original.id,
                        status = response.status,
                        attempt,
                        "Replay rejected by downstream"
                    );
                    http_status = Some(response.status);
                    response_snippet = Some(DeliveryRecord::snippet_of(&response.body));
                }
                Err(err) => {
                    warn!(delivery_id = %original.id, attempt, error = %err, "Replay attempt failed");
                    response_snippet = Some(DeliveryRecord::snippet_of(&err));
                }
            }
            match self.policy.delay_after(attempt) {
                Some(delay) => tokio::time::sleep(delay).await,
                None => break DeliveryOutcome::Failed,
            }
        };

        let record = DeliveryRecord {
            id: DeliveryId::new(),
            event_type: original.event_type,
            action: original.action,
            service_code: original.service_code,
            target_url: original.target_url,
            payload_hash: original.payload_hash,
            payload: original.payload,
            signature: original.signature,
            outcome,
            http_status,
            response_snippet,
            attempt_count: attempt,
            created_at: Timestamp::now(),
        };
        self.log.append(&record).await?;
        Ok(record)
    }
}
