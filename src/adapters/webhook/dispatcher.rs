//! Webhook dispatcher and background delivery worker.
//!
//! `WebhookDispatcher` is the `EventDispatcher` adapter the command handlers
//! see: it serializes the event exactly once, signs those bytes, and queues
//! a job. `DeliveryWorker` owns the receiving end, POSTs with retry and
//! backoff, and writes exactly one terminal `DeliveryRecord` per job. The
//! signature always covers the queued bytes; retries re-send them verbatim.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

use crate::domain::foundation::{DeliveryId, ServiceCode, Timestamp};
use crate::domain::webhook::{
    payload_hash, DeliveryOutcome, DeliveryRecord, LicenseAction, LicenseEvent, RetryPolicy,
    WebhookError, WebhookSigner,
};
use crate::ports::{DeliveryLog, EventDispatcher, WebhookHeaders, WebhookTransport};

/// Queue depth before `dispatch` starts applying backpressure.
const QUEUE_CAPACITY: usize = 256;

/// One signed payload awaiting delivery.
#[derive(Debug)]
struct DispatchJob {
    event_type: String,
    action: LicenseAction,
    service_code: ServiceCode,
    target_url: String,
    payload: String,
    signature: String,
    timestamp: i64,
}

/// Sending side of the delivery pipeline.
pub struct WebhookDispatcher {
    signer: WebhookSigner,
    endpoints: HashMap<ServiceCode, String>,
    tx: mpsc::Sender<DispatchJob>,
}

#[async_trait]
impl EventDispatcher for WebhookDispatcher {
    async fn dispatch(&self, event: LicenseEvent) -> Result<(), WebhookError> {
        let target_url = self
            .endpoints
            .get(&event.service)
            .cloned()
            .ok_or_else(|| WebhookError::EndpointNotConfigured(event.service.clone()))?;

        // Serialized once; the signature covers exactly these bytes.
        let payload = serde_json::to_string(&event)
            .map_err(|e| WebhookError::Serialization(e.to_string()))?;
        let signature = self.signer.sign(payload.as_bytes());

        let job = DispatchJob {
            event_type: event.event,
            action: event.action,
            service_code: event.service,
            target_url,
            payload,
            signature,
            timestamp: event.timestamp,
        };
        self.tx.send(job).await.map_err(|_| WebhookError::QueueClosed)
    }
}

/// Receiving side: drains the queue, delivers with retry, writes the log.
pub struct DeliveryWorker {
    rx: mpsc::Receiver<DispatchJob>,
    transport: Arc<dyn WebhookTransport>,
    log: Arc<dyn DeliveryLog>,
    policy: RetryPolicy,
    timeout: Duration,
    source: String,
    shutdown: watch::Receiver<bool>,
}

/// Builds the connected dispatcher/worker pair.
#[allow(clippy::too_many_arguments)]
pub fn delivery_pipeline(
    signer: WebhookSigner,
    endpoints: HashMap<ServiceCode, String>,
    transport: Arc<dyn WebhookTransport>,
    log: Arc<dyn DeliveryLog>,
    policy: RetryPolicy,
    timeout: Duration,
    source: String,
    shutdown: watch::Receiver<bool>,
) -> (WebhookDispatcher, DeliveryWorker) {
    let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
    (
        WebhookDispatcher {
            signer,
            endpoints,
            tx,
        },
        DeliveryWorker {
            rx,
            transport,
            log,
            policy,
            timeout,
            source,
            shutdown,
        },
    )
}

impl DeliveryWorker {
    /// Runs until shutdown is signalled (draining what was already queued)
    /// or every dispatcher handle is dropped.
    pub async fn run(mut self) {
        info!("Webhook delivery worker started");
        loop {
            tokio::select! {
                job = self.rx.recv() => match job {
                    Some(job) => self.deliver(job).await,
                    None => break,
                },
                _ = self.shutdown.changed() => {
                    while let Ok(job) = self.rx.try_recv() {
                        self.deliver(job).await;
                    }
                    break;
                }
            }
        }
        info!("Webhook delivery worker stopped");
    }

    /// Delivers one job to its terminal outcome and records it.
    async fn deliver(&self, job: DispatchJob) {
        let headers = WebhookHeaders {
            event: job.event_type.clone(),
            signature: job.signature.clone(),
            timestamp: job.timestamp,
            source: self.source.clone(),
        };

        let mut http_status = None;
        let mut response_snippet;
        let mut attempt = 0u32;
        let outcome = loop {
            attempt += 1;
            match self
                .transport
                .post(&job.target_url, &headers, job.payload.as_bytes(), self.timeout)
                .await
            {
                Ok(response) if response.is_success() => {
                    http_status = Some(response.status);
                    response_snippet = Some(DeliveryRecord::snippet_of(&response.body));
                    break DeliveryOutcome::Succeeded;
                }
                Ok(response) => {
                    warn!(
                        service = %job.service_code,
                        status = response.status,
                        attempt,
                        "Webhook delivery rejected by downstream"
                    );
                    http_status = Some(response.status);
                    response_snippet = Some(DeliveryRecord::snippet_of(&response.body));
                }
                Err(err) => {
                    warn!(
                        service = %job.service_code,
                        attempt,
                        error = %err,
                        "Webhook delivery attempt failed"
                    );
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
            event_type: job.event_type,
            action: job.action,
            service_code: job.service_code,
            target_url: job.target_url,
            payload_hash: payload_hash(job.payload.as_bytes()),
            payload: job.payload,
            signature: job.signature,
            outcome,
            http_status,
            response_snippet,
            attempt_count: attempt,
            created_at: Timestamp::now(),
        };
        if let Err(err) = self.log.append(&record).await {
            error!(
                delivery_id = %record.id,
                error = %err,
                "Failed to append webhook delivery record"
            );
        }
    }
}
