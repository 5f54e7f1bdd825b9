//! PostgreSQL implementation of CatalogReader.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{Plan, PlanFeatures, Service, ServiceKind};
use crate::domain::foundation::{DomainError, ErrorCode, PlanId, ServiceCode, ServiceId};
use crate::ports::CatalogReader;

/// PostgreSQL implementation of the CatalogReader port.
///
/// Catalog rows are read-mostly reference data; every call loads a fresh
/// snapshot from the database.
pub struct PostgresCatalogReader {
    pool: PgPool,
}

impl PostgresCatalogReader {
    /// Creates a new PostgresCatalogReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ServiceRow {
    id: Uuid,
    code: String,
    name: String,
    base_app_url: String,
    kind: String,
    active: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct PlanRow {
    id: Uuid,
    service_id: Uuid,
    code: String,
    name: String,
    price_monthly_cents: i64,
    price_yearly_cents: i64,
    trial_days: i32,
    features: serde_json::Value,
}

fn parse_service_kind(s: &str) -> Result<ServiceKind, DomainError> {
    match s.to_lowercase().as_str() {
        "app" => Ok(ServiceKind::App),
        "package" => Ok(ServiceKind::Package),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid service kind value: {}", s),
        )),
    }
}

impl TryFrom<ServiceRow> for Service {
    type Error = DomainError;

    fn try_from(row: ServiceRow) -> Result<Self, Self::Error> {
        let code = ServiceCode::new(&row.code).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid service code '{}': {}", row.code, e),
            )
        })?;
        Ok(Service {
            id: ServiceId::from_uuid(row.id),
            code,
            name: row.name,
            base_app_url: row.base_app_url,
            kind: parse_service_kind(&row.kind)?,
            active: row.active,
        })
    }
}

impl TryFrom<PlanRow> for Plan {
    type Error = DomainError;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        // Features live in a jsonb column; an empty object means defaults.
        let features: PlanFeatures = serde_json::from_value(row.features).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid plan features for '{}': {}", row.code, e),
            )
        })?;
        Ok(Plan {
            id: PlanId::from_uuid(row.id),
            service_id: ServiceId::from_uuid(row.service_id),
            code: row.code,
            name: row.name,
            price_monthly_cents: row.price_monthly_cents,
            price_yearly_cents: row.price_yearly_cents,
            trial_days: row.trial_days.max(0) as u32,
            features,
        })
    }
}

#[async_trait]
impl CatalogReader for PostgresCatalogReader {
    async fn get_service_by_code(
        &self,
        code: &ServiceCode,
    ) -> Result<Option<Service>, DomainError> {
        let row: Option<ServiceRow> = sqlx::query_as(
            r#"
            SELECT id, code, name, base_app_url, kind, active
            FROM services
            WHERE code = $1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get service: {}", e),
            )
        })?;

        row.map(Service::try_from).transpose()
    }

    async fn get_plan(&self, id: &PlanId) -> Result<Option<Plan>, DomainError> {
        let row: Option<PlanRow> = sqlx::query_as(
            r#"
            SELECT id, service_id, code, name, price_monthly_cents,
                   price_yearly_cents, trial_days, features
            FROM plans
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get plan: {}", e),
            )
        })?;

        row.map(Plan::try_from).transpose()
    }

    async fn find_plan(
        &self,
        service_id: &ServiceId,
        plan_code: &str,
    ) -> Result<Option<Plan>, DomainError> {
        let row: Option<PlanRow> = sqlx::query_as(
            r#"
            SELECT id, service_id, code, name, price_monthly_cents,
                   price_yearly_cents, trial_days, features
            FROM plans
            WHERE service_id = $1 AND code = $2
            "#,
        )
        .bind(service_id.as_uuid())
        .bind(plan_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find plan: {}", e),
            )
        })?;

        row.map(Plan::try_from).transpose()
    }

    async fn free_plan(&self, service_id: &ServiceId) -> Result<Option<Plan>, DomainError> {
        let row: Option<PlanRow> = sqlx::query_as(
            r#"
            SELECT id, service_id, code, name, price_monthly_cents,
                   price_yearly_cents, trial_days, features
            FROM plans
            WHERE service_id = $1
              AND code = 'free'
              AND price_monthly_cents = 0
              AND trial_days = 0
            "#,
        )
        .bind(service_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get free plan: {}", e),
            )
        })?;

        row.map(Plan::try_from).transpose()
    }
}
