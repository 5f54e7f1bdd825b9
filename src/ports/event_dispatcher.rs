//! Event dispatcher port - fire-and-forget license event delivery.

use async_trait::async_trait;

use crate::domain::webhook::{LicenseEvent, WebhookError};

/// Hands a license event to the delivery pipeline.
///
/// `dispatch` returns once the event is durably queued; the HTTP delivery,
/// retries and log write happen in a background worker. Callers treat a
/// dispatch failure as an observability problem, never as a reason to fail
/// the triggering business operation.
#[async_trait]
pub trait EventDispatcher: Send + Sync {
    /// Queues the event for delivery to the subscribed service.
    async fn dispatch(&self, event: LicenseEvent) -> Result<(), WebhookError>;
}
