//! PostgreSQL implementation of SubscriptionRepository.
//!
//! Optimistic locking: `update` carries `WHERE version = $n`, bumping the
//! version in the same statement. Zero rows affected on an existing id means
//! another writer won, which surfaces as `ErrorCode::Conflict`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::BillingCycle;
use crate::domain::foundation::{
    ActivityId, DomainError, ErrorCode, OrganizationId, PlanId, ServiceId, SubscriptionId,
    Timestamp,
};
use crate::domain::subscription::{Subscription, SubscriptionStatus};
use crate::ports::SubscriptionRepository;

/// PostgreSQL implementation of the SubscriptionRepository port.
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    /// Creates a new PostgresSubscriptionRepository with the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    activity_id: Uuid,
    organization_id: Option<Uuid>,
    service_id: Uuid,
    plan_id: Uuid,
    status: String,
    billing_cycle: String,
    current_period_start: DateTime<Utc>,
    current_period_end: DateTime<Utc>,
    trial_ends_at: Option<DateTime<Utc>>,
    inherited_from_org: bool,
    cancel_at_period_end: bool,
    version: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    cancelled_at: Option<DateTime<Utc>>,
}

const SELECT_COLUMNS: &str = r#"
    id, activity_id, organization_id, service_id, plan_id, status,
    billing_cycle, current_period_start, current_period_end, trial_ends_at,
    inherited_from_org, cancel_at_period_end, version, created_at,
    updated_at, cancelled_at
"#;

fn parse_status(s: &str) -> Result<SubscriptionStatus, DomainError> {
    match s.to_lowercase().as_str() {
        "trial" => Ok(SubscriptionStatus::Trial),
        "active" => Ok(SubscriptionStatus::Active),
        "expired" => Ok(SubscriptionStatus::Expired),
        "cancelled" => Ok(SubscriptionStatus::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid subscription status value: {}", s),
        )),
    }
}

fn status_str(status: SubscriptionStatus) -> &'static str {
    match status {
        SubscriptionStatus::Trial => "trial",
        SubscriptionStatus::Active => "active",
        SubscriptionStatus::Expired => "expired",
        SubscriptionStatus::Cancelled => "cancelled",
    }
}

fn parse_cycle(s: &str) -> Result<BillingCycle, DomainError> {
    match s.to_lowercase().as_str() {
        "monthly" => Ok(BillingCycle::Monthly),
        "yearly" => Ok(BillingCycle::Yearly),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid billing cycle value: {}", s),
        )),
    }
}

fn cycle_str(cycle: BillingCycle) -> &'static str {
    match cycle {
        BillingCycle::Monthly => "monthly",
        BillingCycle::Yearly => "yearly",
    }
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(Subscription {
            id: SubscriptionId::from_uuid(row.id),
            activity_id: ActivityId::from_uuid(row.activity_id),
            organization_id: row.organization_id.map(OrganizationId::from_uuid),
            service_id: ServiceId::from_uuid(row.service_id),
            plan_id: PlanId::from_uuid(row.plan_id),
            status: parse_status(&row.status)?,
            billing_cycle: parse_cycle(&row.billing_cycle)?,
            current_period_start: Timestamp::from_datetime(row.current_period_start),
            current_period_end: Timestamp::from_datetime(row.current_period_end),
            trial_ends_at: row.trial_ends_at.map(Timestamp::from_datetime),
            inherited_from_org: row.inherited_from_org,
            cancel_at_period_end: row.cancel_at_period_end,
            version: row.version,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
            cancelled_at: row.cancelled_at.map(Timestamp::from_datetime),
        })
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn find_direct(
        &self,
        activity_id: &ActivityId,
        service_id: &ServiceId,
    ) -> Result<Option<Subscription>, DomainError> {
        let query = format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM subscriptions
            WHERE activity_id = $1
              AND service_id = $2
              AND inherited_from_org = FALSE
            ORDER BY (status IN ('trial', 'active')
                      OR (status = 'cancelled' AND cancel_at_period_end)) DESC,
                     updated_at DESC
            LIMIT 1
            "#
        );
        let row: Option<SubscriptionRow> = sqlx::query_as(&query)
            .bind(activity_id.as_uuid())
            .bind(service_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to find direct subscription: {}", e),
                )
            })?;

        row.map(Subscription::try_from).transpose()
    }

    async fn find_org_package(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Option<Subscription>, DomainError> {
        let query = format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM subscriptions
            WHERE organization_id = $1
              AND inherited_from_org = TRUE
              AND (status IN ('trial', 'active')
                   OR (status = 'cancelled' AND cancel_at_period_end))
            ORDER BY updated_at DESC
            LIMIT 1
            "#
        );
        let row: Option<SubscriptionRow> = sqlx::query_as(&query)
            .bind(organization_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to find org package: {}", e),
                )
            })?;

        row.map(Subscription::try_from).transpose()
    }

    async fn insert(&self, subscription: &Subscription) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                id, activity_id, organization_id, service_id, plan_id, status,
                billing_cycle, current_period_start, current_period_end,
                trial_ends_at, inherited_from_org, cancel_at_period_end,
                version, created_at, updated_at, cancelled_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(subscription.id.as_uuid())
        .bind(subscription.activity_id.as_uuid())
        .bind(subscription.organization_id.as_ref().map(|id| *id.as_uuid()))
        .bind(subscription.service_id.as_uuid())
        .bind(subscription.plan_id.as_uuid())
        .bind(status_str(subscription.status))
        .bind(cycle_str(subscription.billing_cycle))
        .bind(subscription.current_period_start.as_datetime())
        .bind(subscription.current_period_end.as_datetime())
        .bind(subscription.trial_ends_at.as_ref().map(|t| *t.as_datetime()))
        .bind(subscription.inherited_from_org)
        .bind(subscription.cancel_at_period_end)
        .bind(subscription.version)
        .bind(subscription.created_at.as_datetime())
        .bind(subscription.updated_at.as_datetime())
        .bind(subscription.cancelled_at.as_ref().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert subscription: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions
            SET plan_id = $3,
                status = $4,
                billing_cycle = $5,
                current_period_start = $6,
                current_period_end = $7,
                trial_ends_at = $8,
                cancel_at_period_end = $9,
                updated_at = $10,
                cancelled_at = $11,
                version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(subscription.id.as_uuid())
        .bind(subscription.version)
        .bind(subscription.plan_id.as_uuid())
        .bind(status_str(subscription.status))
        .bind(cycle_str(subscription.billing_cycle))
        .bind(subscription.current_period_start.as_datetime())
        .bind(subscription.current_period_end.as_datetime())
        .bind(subscription.trial_ends_at.as_ref().map(|t| *t.as_datetime()))
        .bind(subscription.cancel_at_period_end)
        .bind(subscription.updated_at.as_datetime())
        .bind(subscription.cancelled_at.as_ref().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update subscription: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            // Either the row is gone or another writer bumped the version.
            let exists: Option<(i32,)> =
                sqlx::query_as("SELECT version FROM subscriptions WHERE id = $1")
                    .bind(subscription.id.as_uuid())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| {
                        DomainError::new(
                            ErrorCode::DatabaseError,
                            format!("Failed to re-check subscription: {}", e),
                        )
                    })?;
            return Err(match exists {
                Some(_) => DomainError::new(
                    ErrorCode::Conflict,
                    "Subscription was modified concurrently",
                ),
                None => DomainError::new(
                    ErrorCode::SubscriptionNotFound,
                    "Subscription not found",
                ),
            });
        }

        Ok(())
    }

    async fn list_lapsed(&self, now: &Timestamp) -> Result<Vec<Subscription>, DomainError> {
        let query = format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM subscriptions
            WHERE status <> 'expired'
              AND (CASE
                     WHEN status = 'trial' AND trial_ends_at IS NOT NULL
                       THEN trial_ends_at
                     ELSE current_period_end
                   END) < $1
            ORDER BY updated_at ASC
            "#
        );
        let rows: Vec<SubscriptionRow> = sqlx::query_as(&query)
            .bind(now.as_datetime())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list lapsed subscriptions: {}", e),
                )
            })?;

        rows.into_iter().map(Subscription::try_from).collect()
    }
}
