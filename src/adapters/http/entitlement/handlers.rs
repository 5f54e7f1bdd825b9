//! HTTP handler for the entitlement read endpoint.

use std::sync::Arc;

use axum::extract::{Json, Path, State};

use crate::application::handlers::entitlement::{
    ResolveEntitlementHandler, ResolveEntitlementQuery,
};
use crate::domain::foundation::ServiceCode;

use super::super::context::CallerContext;
use super::super::error::ApiError;
use super::dto::EntitlementResponse;

/// Shared state for the entitlement routes.
#[derive(Clone)]
pub struct EntitlementAppState {
    pub resolver: Arc<ResolveEntitlementHandler>,
}

/// `GET /api/entitlements/{serviceCode}` - the caller's resolved license.
pub async fn get_entitlement(
    State(state): State<EntitlementAppState>,
    caller: CallerContext,
    Path(service_code): Path<String>,
) -> Result<Json<EntitlementResponse>, ApiError> {
    let service_code =
        ServiceCode::new(&service_code).map_err(|e| ApiError::validation(e.to_string()))?;

    let entitlement = state
        .resolver
        .handle(ResolveEntitlementQuery {
            activity_id: caller.activity_id,
            service_code,
        })
        .await?;

    Ok(Json(EntitlementResponse::from(entitlement)))
}
