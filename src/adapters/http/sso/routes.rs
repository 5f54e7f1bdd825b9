//! Axum router for the SSO endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{authenticate, issue_token, SsoAppState};

/// Create the SSO API router.
///
/// - `POST /token` - mint a token for the caller's activity
/// - `POST /authenticate` - verify a token presented by a service
pub fn sso_routes() -> Router<SsoAppState> {
    Router::new()
        .route("/token", post(issue_token))
        .route("/authenticate", post(authenticate))
}
