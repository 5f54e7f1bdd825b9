//! HTTP handlers for the SSO endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};

use crate::application::handlers::sso::{
    AuthenticateTokenCommand, AuthenticateTokenHandler, IssueTokenCommand, IssueTokenHandler,
};
use crate::domain::foundation::ServiceCode;

use super::super::context::CallerContext;
use super::super::error::ApiError;
use super::dto::{
    AuthenticateRequest, AuthenticateResponse, IssueTokenRequest, IssueTokenResponse,
};

/// Shared state for the SSO routes.
#[derive(Clone)]
pub struct SsoAppState {
    pub issue_token: Arc<IssueTokenHandler>,
    pub authenticate_token: Arc<AuthenticateTokenHandler>,
}

/// `POST /api/sso/token` - mint a token for the caller's activity.
pub async fn issue_token(
    State(state): State<SsoAppState>,
    caller: CallerContext,
    Json(request): Json<IssueTokenRequest>,
) -> Result<Json<IssueTokenResponse>, ApiError> {
    let service_code = ServiceCode::new(&request.service_code)
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let issued = state
        .issue_token
        .handle(IssueTokenCommand {
            user_id: caller.user_id,
            activity_id: caller.activity_id,
            service_code,
        })
        .await?;

    Ok(Json(IssueTokenResponse::from(issued)))
}

/// `POST /api/sso/authenticate` - verify a token presented by a service.
pub async fn authenticate(
    State(state): State<SsoAppState>,
    Json(request): Json<AuthenticateRequest>,
) -> Result<Json<AuthenticateResponse>, ApiError> {
    let presented_by =
        ServiceCode::new(&request.service).map_err(|e| ApiError::validation(e.to_string()))?;

    let session = state
        .authenticate_token
        .handle(AuthenticateTokenCommand {
            token: request.token,
            presented_by,
        })
        .await?;

    Ok(Json(AuthenticateResponse::from(session)))
}
