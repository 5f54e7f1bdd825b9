//! PostgreSQL implementation of MembershipReader.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{ActivityId, DomainError, ErrorCode, OrganizationId, UserId};
use crate::domain::tenant::{ActivityRole, OrgRole};
use crate::ports::MembershipReader;

/// PostgreSQL implementation of the MembershipReader port.
pub struct PostgresMembershipReader {
    pool: PgPool,
}

impl PostgresMembershipReader {
    /// Creates a new PostgresMembershipReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn parse_org_role(s: &str) -> Result<OrgRole, DomainError> {
    match s.to_lowercase().as_str() {
        "owner" => Ok(OrgRole::Owner),
        "admin" => Ok(OrgRole::Admin),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid organization role value: {}", s),
        )),
    }
}

fn parse_activity_role(s: &str) -> Result<ActivityRole, DomainError> {
    match s.to_lowercase().as_str() {
        "owner" => Ok(ActivityRole::Owner),
        "member" => Ok(ActivityRole::Member),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid activity role value: {}", s),
        )),
    }
}

#[async_trait]
impl MembershipReader for PostgresMembershipReader {
    async fn activity_role(
        &self,
        user_id: &UserId,
        activity_id: &ActivityId,
    ) -> Result<Option<ActivityRole>, DomainError> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT role
            FROM activity_members
            WHERE user_id = $1 AND activity_id = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(activity_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get activity role: {}", e),
            )
        })?;

        row.map(|(role,)| parse_activity_role(&role)).transpose()
    }

    async fn organization_role(
        &self,
        user_id: &UserId,
        organization_id: &OrganizationId,
    ) -> Result<Option<OrgRole>, DomainError> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT role
            FROM organization_members
            WHERE user_id = $1 AND organization_id = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(organization_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get organization role: {}", e),
            )
        })?;

        row.map(|(role,)| parse_org_role(&role)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roles_are_case_insensitive() {
        assert_eq!(parse_org_role("OWNER").unwrap(), OrgRole::Owner);
        assert_eq!(parse_activity_role("Member").unwrap(), ActivityRole::Member);
        assert!(parse_org_role("viewer").is_err());
        assert!(parse_activity_role("admin").is_err());
    }
}
