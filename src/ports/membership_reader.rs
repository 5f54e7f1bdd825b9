//! Membership reader port - role lookups for authorization checks.

use async_trait::async_trait;

use crate::domain::foundation::{ActivityId, DomainError, OrganizationId, UserId};
use crate::domain::tenant::{ActivityRole, OrgRole};

/// Role lookups connecting users to activities and organizations.
///
/// Token issuance checks membership through this port: a user may act on an
/// activity either via a direct activity membership or via a role on the
/// activity's organization.
#[async_trait]
pub trait MembershipReader: Send + Sync {
    /// The user's role on an activity, if any.
    async fn activity_role(
        &self,
        user_id: &UserId,
        activity_id: &ActivityId,
    ) -> Result<Option<ActivityRole>, DomainError>;

    /// The user's role on an organization, if any.
    async fn organization_role(
        &self,
        user_id: &UserId,
        organization_id: &OrganizationId,
    ) -> Result<Option<OrgRole>, DomainError>;
}
