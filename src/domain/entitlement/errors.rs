//! Entitlement resolution error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ActivityNotFound | 404 |
//! | ServiceNotFound | 404 |
//! | Infrastructure | 500 |
//!
//! "No entitlement" is not an error here: the resolver reports it as an
//! [`super::EntitlementStatus::None`] result so callers can distinguish
//! "service unknown" from "service known, nothing covers it".

use thiserror::Error;

use crate::domain::foundation::{ActivityId, DomainError, ServiceCode};

/// Errors raised while resolving an entitlement.
#[derive(Debug, Clone, Error)]
pub enum EntitlementError {
    #[error("Activity {0} not found")]
    ActivityNotFound(ActivityId),

    #[error("Service '{0}' not found")]
    ServiceNotFound(ServiceCode),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl EntitlementError {
    /// Creates an infrastructure error from any displayable source.
    pub fn infrastructure(message: impl Into<String>) -> Self {
        EntitlementError::Infrastructure(message.into())
    }

    /// Stable machine-readable error code, used by the HTTP layer.
    pub fn code(&self) -> &'static str {
        match self {
            EntitlementError::ActivityNotFound(_) => "ACTIVITY_NOT_FOUND",
            EntitlementError::ServiceNotFound(_) => "SERVICE_NOT_FOUND",
            EntitlementError::Infrastructure(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for EntitlementError {
    fn from(err: DomainError) -> Self {
        EntitlementError::Infrastructure(err.to_string())
    }
}
