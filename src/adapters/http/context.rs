//! Caller context extraction.
//!
//! End-user authentication terminates upstream; the session layer forwards
//! the caller's identity as `X-User-Id` and the activity scope as
//! `X-Activity-Id`. Both are required on user-facing routes.

use std::str::FromStr;

use axum::http::request::Parts;
use axum::http::StatusCode;

use crate::domain::foundation::{ActivityId, UserId};

use super::error::ApiError;

/// The authenticated caller and the activity the request is scoped to.
#[derive(Debug, Clone)]
pub struct CallerContext {
    pub user_id: UserId,
    pub activity_id: ActivityId,
}

fn header_id<T: FromStr>(parts: &Parts, name: &'static str) -> Result<T, ApiError> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::UNAUTHORIZED,
                "AUTHENTICATION_REQUIRED",
                format!("Missing or invalid {} header", name),
            )
        })
}

impl<S> axum::extract::FromRequestParts<S> for CallerContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            Ok(CallerContext {
                user_id: header_id(parts, "X-User-Id")?,
                activity_id: header_id(parts, "X-Activity-Id")?,
            })
        })
    }
}
