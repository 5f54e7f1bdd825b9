//! Subscription-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ActivityNotFound | 404 |
//! | ServiceNotFound | 404 |
//! | PlanNotFound | 404 |
//! | NotFound | 404 |
//! | Forbidden | 403 |
//! | AlreadySubscribed | 409 |
//! | TrialNotAvailable | 409 |
//! | InvalidState | 409 |
//! | Conflict | 409 (caller may retry) |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{ActivityId, DomainError, ErrorCode, ServiceCode};

/// Errors raised by subscription commands.
#[derive(Debug, Clone, Error)]
pub enum SubscriptionError {
    #[error("Activity {0} not found")]
    ActivityNotFound(ActivityId),

    #[error("Service '{0}' not found")]
    ServiceNotFound(ServiceCode),

    #[error("Plan '{plan_code}' not found for service '{service_code}'")]
    PlanNotFound {
        service_code: ServiceCode,
        plan_code: String,
    },

    #[error("No subscription for activity {activity_id} and service '{service_code}'")]
    NotFound {
        activity_id: ActivityId,
        service_code: ServiceCode,
    },

    #[error("User is not a member of the activity")]
    Forbidden,

    #[error("Activity already holds a current subscription to '{0}'")]
    AlreadySubscribed(ServiceCode),

    #[error("Plan '{0}' does not offer a trial")]
    TrialNotAvailable(String),

    #[error("Invalid subscription state: {0}")]
    InvalidState(String),

    #[error("Subscription was modified concurrently; retry the operation")]
    Conflict,

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl SubscriptionError {
    /// Creates an infrastructure error from any displayable source.
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SubscriptionError::Infrastructure(message.into())
    }

    /// Stable machine-readable error code, used by the HTTP layer.
    pub fn code(&self) -> &'static str {
        match self {
            SubscriptionError::ActivityNotFound(_) => "ACTIVITY_NOT_FOUND",
            SubscriptionError::ServiceNotFound(_) => "SERVICE_NOT_FOUND",
            SubscriptionError::PlanNotFound { .. } => "PLAN_NOT_FOUND",
            SubscriptionError::NotFound { .. } => "SUBSCRIPTION_NOT_FOUND",
            SubscriptionError::Forbidden => "FORBIDDEN",
            SubscriptionError::AlreadySubscribed(_) => "ALREADY_SUBSCRIBED",
            SubscriptionError::TrialNotAvailable(_) => "TRIAL_NOT_AVAILABLE",
            SubscriptionError::InvalidState(_) => "INVALID_STATE_TRANSITION",
            SubscriptionError::Conflict => "CONFLICT",
            SubscriptionError::Infrastructure(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for SubscriptionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Conflict => SubscriptionError::Conflict,
            ErrorCode::InvalidStateTransition => SubscriptionError::InvalidState(err.message),
            _ => SubscriptionError::Infrastructure(err.to_string()),
        }
    }
}
