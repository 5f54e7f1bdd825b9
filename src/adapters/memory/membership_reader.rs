//! In-memory MembershipReader.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{ActivityId, DomainError, OrganizationId, UserId};
use crate::domain::tenant::{ActivityRole, OrgRole};
use crate::ports::MembershipReader;

/// HashMap-backed role store.
#[derive(Default)]
pub struct InMemoryMembershipReader {
    activity_roles: Mutex<HashMap<(UserId, ActivityId), ActivityRole>>,
    org_roles: Mutex<HashMap<(UserId, OrganizationId), OrgRole>>,
}

impl InMemoryMembershipReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant_activity_role(&self, user_id: UserId, activity_id: ActivityId, role: ActivityRole) {
        self.activity_roles
            .lock()
            .expect("membership lock poisoned")
            .insert((user_id, activity_id), role);
    }

    pub fn grant_org_role(&self, user_id: UserId, organization_id: OrganizationId, role: OrgRole) {
        self.org_roles
            .lock()
            .expect("membership lock poisoned")
            .insert((user_id, organization_id), role);
    }
}

#[async_trait]
impl MembershipReader for InMemoryMembershipReader {
    async fn activity_role(
        &self,
        user_id: &UserId,
        activity_id: &ActivityId,
    ) -> Result<Option<ActivityRole>, DomainError> {
        Ok(self
            .activity_roles
            .lock()
            .expect("membership lock poisoned")
            .get(&(*user_id, *activity_id))
            .copied())
    }

    async fn organization_role(
        &self,
        user_id: &UserId,
        organization_id: &OrganizationId,
    ) -> Result<Option<OrgRole>, DomainError> {
        Ok(self
            .org_roles
            .lock()
            .expect("membership lock poisoned")
            .get(&(*user_id, *organization_id))
            .copied())
    }
}
