//! SSO-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ActivityNotFound / ServiceNotFound | 404 |
//! | Forbidden | 403 |
//! | NoEntitlement | 409 (actionable: offer trial activation) |
//! | InvalidSignature / Malformed | 401 |
//! | TokenExpired | 401 |
//! | TokenReplayed | 401 |
//! | ServiceMismatch | 401 |
//! | Infrastructure | 500 |
//!
//! Token failures are never retried; a replay attempt is a security signal,
//! not a transient fault, and is logged at warn.

use thiserror::Error;

use crate::domain::entitlement::EntitlementError;
use crate::domain::foundation::{ActivityId, DomainError, ServiceCode, UserId};

/// Errors raised during token issuance and verification.
#[derive(Debug, Clone, Error)]
pub enum SsoError {
    #[error("Activity {0} not found")]
    ActivityNotFound(ActivityId),

    #[error("Service '{0}' not found")]
    ServiceNotFound(ServiceCode),

    #[error("User {0} not found")]
    UserNotFound(UserId),

    #[error("User is not a member of the activity")]
    Forbidden,

    #[error("No entitlement for service '{0}'")]
    NoEntitlement(ServiceCode),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token has already been used")]
    TokenReplayed,

    #[error("Token was issued for service '{expected}', presented for '{presented}'")]
    ServiceMismatch {
        expected: ServiceCode,
        presented: ServiceCode,
    },

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl SsoError {
    /// Creates an infrastructure error from any displayable source.
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SsoError::Infrastructure(message.into())
    }

    /// Stable machine-readable error code, used by the HTTP layer.
    pub fn code(&self) -> &'static str {
        match self {
            SsoError::ActivityNotFound(_) => "ACTIVITY_NOT_FOUND",
            SsoError::ServiceNotFound(_) => "SERVICE_NOT_FOUND",
            SsoError::UserNotFound(_) => "USER_NOT_FOUND",
            SsoError::Forbidden => "FORBIDDEN",
            SsoError::NoEntitlement(_) => "NO_ENTITLEMENT",
            SsoError::InvalidSignature => "INVALID_SIGNATURE",
            SsoError::Malformed(_) => "MALFORMED_TOKEN",
            SsoError::TokenExpired => "TOKEN_EXPIRED",
            SsoError::TokenReplayed => "TOKEN_REPLAYED",
            SsoError::ServiceMismatch { .. } => "SERVICE_MISMATCH",
            SsoError::Infrastructure(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this failure should be logged for security monitoring.
    pub fn is_security_signal(&self) -> bool {
        matches!(
            self,
            SsoError::InvalidSignature
                | SsoError::TokenExpired
                | SsoError::TokenReplayed
                | SsoError::ServiceMismatch { .. }
        )
    }
}

impl From<DomainError> for SsoError {
    fn from(err: DomainError) -> Self {
        SsoError::Infrastructure(err.to_string())
    }
}

impl From<EntitlementError> for SsoError {
    fn from(err: EntitlementError) -> Self {
        match err {
            EntitlementError::ActivityNotFound(id) => SsoError::ActivityNotFound(id),
            EntitlementError::ServiceNotFound(code) => SsoError::ServiceNotFound(code),
            EntitlementError::Infrastructure(msg) => SsoError::Infrastructure(msg),
        }
    }
}
