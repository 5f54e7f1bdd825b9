//! In-memory TenantReader.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{ActivityId, DomainError, OrganizationId, UserId};
use crate::domain::tenant::{Activity, Organization, User};
use crate::ports::TenantReader;

/// HashMap-backed tenant store.
#[derive(Default)]
pub struct InMemoryTenantReader {
    activities: Mutex<HashMap<ActivityId, Activity>>,
    organizations: Mutex<HashMap<OrganizationId, Organization>>,
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryTenantReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_activity(&self, activity: Activity) {
        self.activities
            .lock()
            .expect("tenant lock poisoned")
            .insert(activity.id, activity);
    }

    pub fn insert_organization(&self, organization: Organization) {
        self.organizations
            .lock()
            .expect("tenant lock poisoned")
            .insert(organization.id, organization);
    }

    pub fn insert_user(&self, user: User) {
        self.users
            .lock()
            .expect("tenant lock poisoned")
            .insert(user.id, user);
    }
}

#[async_trait]
impl TenantReader for InMemoryTenantReader {
    async fn get_activity(&self, id: &ActivityId) -> Result<Option<Activity>, DomainError> {
        Ok(self
            .activities
            .lock()
            .expect("tenant lock poisoned")
            .get(id)
            .cloned())
    }

    async fn get_organization(
        &self,
        id: &OrganizationId,
    ) -> Result<Option<Organization>, DomainError> {
        Ok(self
            .organizations
            .lock()
            .expect("tenant lock poisoned")
            .get(id)
            .cloned())
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .expect("tenant lock poisoned")
            .get(id)
            .cloned())
    }
}
