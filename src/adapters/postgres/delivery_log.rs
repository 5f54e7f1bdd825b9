//! PostgreSQL implementation of DeliveryLog.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DeliveryId, DomainError, ErrorCode, ServiceCode, Timestamp};
use crate::domain::webhook::{DeliveryOutcome, DeliveryRecord, LicenseAction};
use crate::ports::DeliveryLog;

/// PostgreSQL implementation of the DeliveryLog port.
///
/// Insert-only: records are never updated or deleted, matching the
/// append-only audit contract.
pub struct PostgresDeliveryLog {
    pool: PgPool,
}

impl PostgresDeliveryLog {
    /// Creates a new PostgresDeliveryLog with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DeliveryRow {
    id: Uuid,
    event_type: String,
    action: String,
    service_code: String,
    target_url: String,
    payload: String,
    payload_hash: String,
    signature: String,
    outcome: String,
    http_status: Option<i32>,
    response_snippet: Option<String>,
    attempt_count: i32,
    created_at: DateTime<Utc>,
}

const SELECT_COLUMNS: &str = r#"
    id, event_type, action, service_code, target_url, payload, payload_hash,
    signature, outcome, http_status, response_snippet, attempt_count,
    created_at
"#;

fn parse_action(s: &str) -> Result<LicenseAction, DomainError> {
    match s.to_lowercase().as_str() {
        "trial_activated" => Ok(LicenseAction::TrialActivated),
        "activated" => Ok(LicenseAction::Activated),
        "renewed" => Ok(LicenseAction::Renewed),
        "cancelled" => Ok(LicenseAction::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid license action value: {}", s),
        )),
    }
}

fn parse_outcome(s: &str) -> Result<DeliveryOutcome, DomainError> {
    match s.to_lowercase().as_str() {
        "succeeded" => Ok(DeliveryOutcome::Succeeded),
        "failed" => Ok(DeliveryOutcome::Failed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid delivery outcome value: {}", s),
        )),
    }
}

fn outcome_str(outcome: DeliveryOutcome) -> &'static str {
    match outcome {
        DeliveryOutcome::Succeeded => "succeeded",
        DeliveryOutcome::Failed => "failed",
    }
}

impl TryFrom<DeliveryRow> for DeliveryRecord {
    type Error = DomainError;

    fn try_from(row: DeliveryRow) -> Result<Self, Self::Error> {
        let service_code = ServiceCode::new(&row.service_code).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid service code '{}': {}", row.service_code, e),
            )
        })?;
        Ok(DeliveryRecord {
            id: DeliveryId::from_uuid(row.id),
            event_type: row.event_type,
            action: parse_action(&row.action)?,
            service_code,
            target_url: row.target_url,
            payload: row.payload,
            payload_hash: row.payload_hash,
            signature: row.signature,
            outcome: parse_outcome(&row.outcome)?,
            http_status: row.http_status.map(|s| s.clamp(0, u16::MAX as i32) as u16),
            response_snippet: row.response_snippet,
            attempt_count: row.attempt_count.max(0) as u32,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl DeliveryLog for PostgresDeliveryLog {
    async fn append(&self, record: &DeliveryRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO webhook_deliveries (
                id, event_type, action, service_code, target_url, payload,
                payload_hash, signature, outcome, http_status,
                response_snippet, attempt_count, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.event_type)
        .bind(record.action.as_str())
        .bind(record.service_code.as_str())
        .bind(&record.target_url)
        .bind(&record.payload)
        .bind(&record.payload_hash)
        .bind(&record.signature)
        .bind(outcome_str(record.outcome))
        .bind(record.http_status.map(i32::from))
        .bind(&record.response_snippet)
        .bind(record.attempt_count as i32)
        .bind(record.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to append delivery record: {}", e),
            )
        })?;

        Ok(())
    }

    async fn get(&self, id: &DeliveryId) -> Result<Option<DeliveryRecord>, DomainError> {
        let query = format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM webhook_deliveries
            WHERE id = $1
            "#
        );
        let row: Option<DeliveryRow> = sqlx::query_as(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to get delivery record: {}", e),
                )
            })?;

        row.map(DeliveryRecord::try_from).transpose()
    }

    async fn list(
        &self,
        service_code: Option<&ServiceCode>,
        limit: u32,
    ) -> Result<Vec<DeliveryRecord>, DomainError> {
        let query = format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM webhook_deliveries
            WHERE ($1::text IS NULL OR service_code = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#
        );
        let rows: Vec<DeliveryRow> = sqlx::query_as(&query)
            .bind(service_code.map(|c| c.as_str().to_string()))
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list delivery records: {}", e),
                )
            })?;

        rows.into_iter().map(DeliveryRecord::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_and_outcome_roundtrip_their_wire_forms() {
        for action in [
            LicenseAction::TrialActivated,
            LicenseAction::Activated,
            LicenseAction::Renewed,
            LicenseAction::Cancelled,
        ] {
            assert_eq!(parse_action(action.as_str()).unwrap(), action);
        }
        for outcome in [DeliveryOutcome::Succeeded, DeliveryOutcome::Failed] {
            assert_eq!(parse_outcome(outcome_str(outcome)).unwrap(), outcome);
        }
        assert!(parse_action("deleted").is_err());
        assert!(parse_outcome("pending").is_err());
    }
}
