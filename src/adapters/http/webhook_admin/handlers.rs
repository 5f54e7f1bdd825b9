//! HTTP handlers for the webhook admin endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};

use crate::application::handlers::webhook::{
    CheckWebhookHealthHandler, ListDeliveriesHandler, ListDeliveriesQuery, ReplayDeliveryCommand,
    ReplayDeliveryHandler,
};
use crate::domain::foundation::{DeliveryId, ServiceCode};

use super::super::error::ApiError;
use super::dto::{DeliveryResponse, HealthResponse, ListDeliveriesParams, ServiceHealthResponse};

/// Shared state for the webhook admin routes.
#[derive(Clone)]
pub struct WebhookAdminAppState {
    pub list_deliveries: Arc<ListDeliveriesHandler>,
    pub replay_delivery: Arc<ReplayDeliveryHandler>,
    pub check_health: Arc<CheckWebhookHealthHandler>,
}

/// `GET /api/webhooks/deliveries?service=…&limit=…`
pub async fn list_deliveries(
    State(state): State<WebhookAdminAppState>,
    Query(params): Query<ListDeliveriesParams>,
) -> Result<Json<Vec<DeliveryResponse>>, ApiError> {
    let service_code = params
        .service
        .map(|s| ServiceCode::new(&s).map_err(|e| ApiError::validation(e.to_string())))
        .transpose()?;

    let records = state
        .list_deliveries
        .handle(ListDeliveriesQuery {
            service_code,
            limit: params.limit,
        })
        .await?;

    Ok(Json(records.into_iter().map(DeliveryResponse::from).collect()))
}

/// `POST /api/webhooks/deliveries/{id}/replay`
pub async fn replay_delivery(
    State(state): State<WebhookAdminAppState>,
    Path(id): Path<String>,
) -> Result<Json<DeliveryResponse>, ApiError> {
    let delivery_id: DeliveryId = id
        .parse()
        .map_err(|_| ApiError::validation(format!("'{}' is not a valid delivery id", id)))?;

    let record = state
        .replay_delivery
        .handle(ReplayDeliveryCommand { delivery_id })
        .await?;

    Ok(Json(DeliveryResponse::from(record)))
}

/// `GET /api/webhooks/health`
pub async fn check_health(
    State(state): State<WebhookAdminAppState>,
) -> Result<Json<HealthResponse>, ApiError> {
    let report = state.check_health.handle().await?;
    Ok(Json(HealthResponse {
        services: report.into_iter().map(ServiceHealthResponse::from).collect(),
    }))
}
