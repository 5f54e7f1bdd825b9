//! Subscription repository port.

use async_trait::async_trait;

use crate::domain::foundation::{ActivityId, DomainError, OrganizationId, ServiceId, Timestamp};
use crate::domain::subscription::Subscription;

/// Persistence for subscription aggregates.
///
/// `update` must check the optimistic `version` column and fail with
/// `ErrorCode::Conflict` when the row changed underneath the caller; that is
/// how concurrent upgrade/cancel operations on the same subscription are
/// serialized.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// The direct subscription for (activity, service) whose stored status
    /// is live (`Trial`/`Active`), or the most recently lapsed one when no
    /// live row exists. `None` when the activity never subscribed.
    async fn find_direct(
        &self,
        activity_id: &ActivityId,
        service_id: &ServiceId,
    ) -> Result<Option<Subscription>, DomainError>;

    /// The organization's live package subscription, if any.
    async fn find_org_package(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Option<Subscription>, DomainError>;

    /// Inserts a new subscription row.
    async fn insert(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Updates an existing row, enforcing the optimistic version check.
    ///
    /// On success the stored version is bumped; callers re-fetch rather
    /// than assume their in-memory copy's version.
    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Live/cancelled subscriptions whose effective end is before `now`.
    /// Consumed by the expiry sweep.
    async fn list_lapsed(&self, now: &Timestamp) -> Result<Vec<Subscription>, DomainError>;
}
