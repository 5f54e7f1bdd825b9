//! JSON shapes for the webhook admin endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::webhook::ServiceHealth;
use crate::domain::foundation::ServiceCode;
use crate::domain::webhook::{DeliveryOutcome, DeliveryRecord, LicenseAction};

/// Query string for the delivery log listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDeliveriesParams {
    pub service: Option<String>,
    pub limit: Option<u32>,
}

/// One record from the append-only delivery log.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryResponse {
    pub id: String,
    pub event_type: String,
    pub action: LicenseAction,
    pub service_code: ServiceCode,
    pub target_url: String,
    pub payload: String,
    pub payload_hash: String,
    pub signature: String,
    pub outcome: DeliveryOutcome,
    pub http_status: Option<u16>,
    pub response_snippet: Option<String>,
    pub attempt_count: u32,
    pub created_at: String,
}

impl From<DeliveryRecord> for DeliveryResponse {
    fn from(record: DeliveryRecord) -> Self {
        Self {
            id: record.id.to_string(),
            event_type: record.event_type,
            action: record.action,
            service_code: record.service_code,
            target_url: record.target_url,
            payload: record.payload,
            payload_hash: record.payload_hash,
            signature: record.signature,
            outcome: record.outcome,
            http_status: record.http_status,
            response_snippet: record.response_snippet,
            attempt_count: record.attempt_count,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

/// Health of one configured webhook receiver.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealthResponse {
    pub service: ServiceCode,
    pub url: String,
    pub healthy: bool,
    pub status: Option<u16>,
}

impl From<ServiceHealth> for ServiceHealthResponse {
    fn from(health: ServiceHealth) -> Self {
        Self {
            service: health.service,
            url: health.url,
            healthy: health.healthy,
            status: health.status,
        }
    }
}

/// Per-service health report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub services: Vec<ServiceHealthResponse>,
}
