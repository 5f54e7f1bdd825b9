//! In-memory SubscriptionRepository with optimistic locking semantics.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{
    ActivityId, DomainError, ErrorCode, OrganizationId, ServiceId, Timestamp,
};
use crate::domain::subscription::{Subscription, SubscriptionStatus};
use crate::ports::SubscriptionRepository;

/// Vec-backed subscription store.
///
/// Mirrors the Postgres adapter's behavior: `update` checks the stored
/// version against the caller's copy and fails with `Conflict` on mismatch,
/// bumping the version on success.
#[derive(Default)]
pub struct InMemorySubscriptionRepository {
    rows: Mutex<Vec<Subscription>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a row without going through `insert` (tests).
    pub fn seed(&self, subscription: Subscription) {
        self.rows
            .lock()
            .expect("subscription lock poisoned")
            .push(subscription);
    }

    /// Snapshot of all rows (tests).
    pub fn all(&self) -> Vec<Subscription> {
        self.rows
            .lock()
            .expect("subscription lock poisoned")
            .clone()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn find_direct(
        &self,
        activity_id: &ActivityId,
        service_id: &ServiceId,
    ) -> Result<Option<Subscription>, DomainError> {
        let rows = self.rows.lock().expect("subscription lock poisoned");
        let mut candidates: Vec<&Subscription> = rows
            .iter()
            .filter(|s| {
                &s.activity_id == activity_id
                    && &s.service_id == service_id
                    && !s.inherited_from_org
            })
            .collect();
        // Access-granting rows first, then the most recently updated.
        candidates.sort_by_key(|s| (!s.grants_access(), std::cmp::Reverse(s.updated_at)));
        Ok(candidates.first().map(|s| (*s).clone()))
    }

    async fn find_org_package(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Option<Subscription>, DomainError> {
        let rows = self.rows.lock().expect("subscription lock poisoned");
        Ok(rows
            .iter()
            .find(|s| {
                s.organization_id.as_ref() == Some(organization_id)
                    && s.inherited_from_org
                    && s.grants_access()
            })
            .cloned())
    }

    async fn insert(&self, subscription: &Subscription) -> Result<(), DomainError> {
        self.rows
            .lock()
            .expect("subscription lock poisoned")
            .push(subscription.clone());
        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().expect("subscription lock poisoned");
        let row = rows
            .iter_mut()
            .find(|s| s.id == subscription.id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::SubscriptionNotFound, "Subscription not found")
            })?;
        if row.version != subscription.version {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Subscription was modified concurrently",
            ));
        }
        *row = subscription.clone();
        row.version += 1;
        Ok(())
    }

    async fn list_lapsed(&self, now: &Timestamp) -> Result<Vec<Subscription>, DomainError> {
        let rows = self.rows.lock().expect("subscription lock poisoned");
        Ok(rows
            .iter()
            .filter(|s| {
                s.status != SubscriptionStatus::Expired && s.effective_end().is_before(now)
            })
            .cloned()
            .collect())
    }
}
