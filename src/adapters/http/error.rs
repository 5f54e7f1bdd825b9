//! API error envelope and HTTP status mapping.
//!
//! Every error leaving the HTTP layer carries a stable machine-readable
//! code plus a human-readable message. Infrastructure failures are logged
//! server-side and returned as an opaque 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::domain::entitlement::EntitlementError;
use crate::domain::sso::SsoError;
use crate::domain::subscription::SubscriptionError;
use crate::domain::webhook::WebhookError;

/// JSON body returned for every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// An error already mapped to an HTTP status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: String,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// A malformed request value the router accepted but the domain rejects.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION", message)
    }

    /// Logs the underlying failure and returns an opaque 500.
    fn internal(err: impl std::fmt::Display) -> Self {
        error!(error = %err, "request failed with infrastructure error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error",
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(self.code, self.message);
        (self.status, Json(body)).into_response()
    }
}

impl From<SsoError> for ApiError {
    fn from(err: SsoError) -> Self {
        let status = match &err {
            SsoError::ActivityNotFound(_)
            | SsoError::ServiceNotFound(_)
            | SsoError::UserNotFound(_) => StatusCode::NOT_FOUND,
            SsoError::Forbidden => StatusCode::FORBIDDEN,
            SsoError::NoEntitlement(_) => StatusCode::CONFLICT,
            SsoError::InvalidSignature
            | SsoError::Malformed(_)
            | SsoError::TokenExpired
            | SsoError::TokenReplayed
            | SsoError::ServiceMismatch { .. } => StatusCode::UNAUTHORIZED,
            SsoError::Infrastructure(_) => return Self::internal(err),
        };
        Self::new(status, err.code(), err.to_string())
    }
}

impl From<EntitlementError> for ApiError {
    fn from(err: EntitlementError) -> Self {
        let status = match &err {
            EntitlementError::ActivityNotFound(_) | EntitlementError::ServiceNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            EntitlementError::Infrastructure(_) => return Self::internal(err),
        };
        Self::new(status, err.code(), err.to_string())
    }
}

impl From<SubscriptionError> for ApiError {
    fn from(err: SubscriptionError) -> Self {
        let status = match &err {
            SubscriptionError::ActivityNotFound(_)
            | SubscriptionError::ServiceNotFound(_)
            | SubscriptionError::PlanNotFound { .. }
            | SubscriptionError::NotFound { .. } => StatusCode::NOT_FOUND,
            SubscriptionError::Forbidden => StatusCode::FORBIDDEN,
            SubscriptionError::AlreadySubscribed(_)
            | SubscriptionError::TrialNotAvailable(_)
            | SubscriptionError::InvalidState(_)
            | SubscriptionError::Conflict => StatusCode::CONFLICT,
            SubscriptionError::Infrastructure(_) => return Self::internal(err),
        };
        Self::new(status, err.code(), err.to_string())
    }
}

impl From<WebhookError> for ApiError {
    fn from(err: WebhookError) -> Self {
        match &err {
            WebhookError::DeliveryNotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, err.code(), err.to_string())
            }
            _ => Self::internal(err),
        }
    }
}
