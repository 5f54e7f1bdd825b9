//! PostgreSQL implementation of TenantReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    ActivityId, DomainError, EmailAddress, ErrorCode, OrganizationId, Timestamp, UserId,
};
use crate::domain::tenant::{AccountType, Activity, ActivityStatus, Organization, User};
use crate::ports::TenantReader;

/// PostgreSQL implementation of the TenantReader port.
pub struct PostgresTenantReader {
    pool: PgPool,
}

impl PostgresTenantReader {
    /// Creates a new PostgresTenantReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrganizationRow {
    id: Uuid,
    name: String,
    account_type: String,
    max_activities: i32,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ActivityRow {
    id: Uuid,
    organization_id: Option<Uuid>,
    name: String,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    created_at: DateTime<Utc>,
}

fn parse_account_type(s: &str) -> Result<AccountType, DomainError> {
    match s.to_lowercase().as_str() {
        "single" => Ok(AccountType::Single),
        "agency" => Ok(AccountType::Agency),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid account_type value: {}", s),
        )),
    }
}

fn parse_activity_status(s: &str) -> Result<ActivityStatus, DomainError> {
    match s.to_lowercase().as_str() {
        "active" => Ok(ActivityStatus::Active),
        "suspended" => Ok(ActivityStatus::Suspended),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid activity status value: {}", s),
        )),
    }
}

impl TryFrom<OrganizationRow> for Organization {
    type Error = DomainError;

    fn try_from(row: OrganizationRow) -> Result<Self, Self::Error> {
        Ok(Organization {
            id: OrganizationId::from_uuid(row.id),
            name: row.name,
            account_type: parse_account_type(&row.account_type)?,
            max_activities: row.max_activities.max(0) as u32,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

impl TryFrom<ActivityRow> for Activity {
    type Error = DomainError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        Ok(Activity {
            id: ActivityId::from_uuid(row.id),
            organization_id: row.organization_id.map(OrganizationId::from_uuid),
            name: row.name,
            status: parse_activity_status(&row.status)?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(&row.email).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid email: {}", e))
        })?;
        Ok(User {
            id: UserId::from_uuid(row.id),
            email,
            name: row.name,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl TenantReader for PostgresTenantReader {
    async fn get_activity(&self, id: &ActivityId) -> Result<Option<Activity>, DomainError> {
        let row: Option<ActivityRow> = sqlx::query_as(
            r#"
            SELECT id, organization_id, name, status, created_at
            FROM activities
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get activity: {}", e),
            )
        })?;

        row.map(Activity::try_from).transpose()
    }

    async fn get_organization(
        &self,
        id: &OrganizationId,
    ) -> Result<Option<Organization>, DomainError> {
        let row: Option<OrganizationRow> = sqlx::query_as(
            r#"
            SELECT id, name, account_type, max_activities, created_at
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get organization: {}", e),
            )
        })?;

        row.map(Organization::try_from).transpose()
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, email, name, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get user: {}", e),
            )
        })?;

        row.map(User::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_account_type_is_case_insensitive() {
        assert_eq!(parse_account_type("AGENCY").unwrap(), AccountType::Agency);
        assert_eq!(parse_account_type("single").unwrap(), AccountType::Single);
        assert!(parse_account_type("franchise").is_err());
    }

    #[test]
    fn parse_activity_status_rejects_unknown_values() {
        assert_eq!(
            parse_activity_status("active").unwrap(),
            ActivityStatus::Active
        );
        assert!(parse_activity_status("archived").is_err());
    }
}
