//! Tenant reader port (read side).

use async_trait::async_trait;

use crate::domain::foundation::{ActivityId, DomainError, OrganizationId, UserId};
use crate::domain::tenant::{Activity, Organization, User};

/// Read access to organizations, activities and users.
///
/// Pure queries; implementations may cache.
#[async_trait]
pub trait TenantReader: Send + Sync {
    /// Fetch an activity by id. `None` when absent.
    async fn get_activity(&self, id: &ActivityId) -> Result<Option<Activity>, DomainError>;

    /// Fetch an organization by id. `None` when absent.
    async fn get_organization(
        &self,
        id: &OrganizationId,
    ) -> Result<Option<Organization>, DomainError>;

    /// Fetch a user by id. `None` when absent.
    async fn get_user(&self, id: &UserId) -> Result<Option<User>, DomainError>;
}
