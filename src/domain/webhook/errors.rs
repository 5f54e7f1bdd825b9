//! Webhook-specific error types.
//!
//! Transport failures are recovered locally with retry and backoff; they
//! never propagate to the business operation that triggered the dispatch.
//! These errors surface only through the admin/replay endpoints and the
//! delivery worker's own logging.

use thiserror::Error;

use crate::domain::foundation::{DeliveryId, DomainError, ServiceCode};

/// Errors raised by webhook dispatch, replay and health checking.
#[derive(Debug, Clone, Error)]
pub enum WebhookError {
    #[error("Delivery {0} not found")]
    DeliveryNotFound(DeliveryId),

    #[error("No webhook endpoint configured for service '{0}'")]
    EndpointNotConfigured(ServiceCode),

    #[error("Failed to serialize event payload: {0}")]
    Serialization(String),

    #[error("Delivery queue is closed")]
    QueueClosed,

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl WebhookError {
    /// Creates an infrastructure error from any displayable source.
    pub fn infrastructure(message: impl Into<String>) -> Self {
        WebhookError::Infrastructure(message.into())
    }

    /// Stable machine-readable error code, used by the HTTP layer.
    pub fn code(&self) -> &'static str {
        match self {
            WebhookError::DeliveryNotFound(_) => "DELIVERY_NOT_FOUND",
            WebhookError::EndpointNotConfigured(_) => "ENDPOINT_NOT_CONFIGURED",
            WebhookError::Serialization(_) => "SERIALIZATION_FAILED",
            WebhookError::QueueClosed => "DELIVERY_QUEUE_CLOSED",
            WebhookError::Infrastructure(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for WebhookError {
    fn from(err: DomainError) -> Self {
        WebhookError::Infrastructure(err.to_string())
    }
}
