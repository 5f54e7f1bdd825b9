//! Shared plumbing for subscription commands.

use std::sync::Arc;

use tracing::warn;

use crate::application::handlers::entitlement::{
    ResolveEntitlementHandler, ResolveEntitlementQuery,
};
use crate::domain::catalog::{Plan, Service};
use crate::domain::foundation::{ActivityId, ServiceCode, Timestamp, UserId};
use crate::domain::subscription::SubscriptionError;
use crate::domain::tenant::Activity;
use crate::domain::webhook::{LicenseAction, LicenseEvent};
use crate::ports::{
    CatalogReader, EventDispatcher, MembershipReader, SubscriptionRepository, TenantReader,
};

/// Ports and helpers every subscription command needs: membership
/// authorization, catalog lookups, and post-commit event emission.
#[derive(Clone)]
pub struct CommandSupport {
    pub(super) tenants: Arc<dyn TenantReader>,
    pub(super) memberships: Arc<dyn MembershipReader>,
    pub(super) catalog: Arc<dyn CatalogReader>,
    pub(super) subscriptions: Arc<dyn SubscriptionRepository>,
    pub(super) dispatcher: Arc<dyn EventDispatcher>,
    resolver: ResolveEntitlementHandler,
}

impl CommandSupport {
    pub fn new(
        tenants: Arc<dyn TenantReader>,
        memberships: Arc<dyn MembershipReader>,
        catalog: Arc<dyn CatalogReader>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        dispatcher: Arc<dyn EventDispatcher>,
    ) -> Self {
        let resolver = ResolveEntitlementHandler::new(
            tenants.clone(),
            catalog.clone(),
            subscriptions.clone(),
        );
        Self {
            tenants,
            memberships,
            catalog,
            subscriptions,
            dispatcher,
            resolver,
        }
    }

    /// Loads the activity and checks the caller may act on it: a direct
    /// activity role, or a role on the owning organization.
    pub(super) async fn authorized_activity(
        &self,
        user_id: &UserId,
        activity_id: &ActivityId,
    ) -> Result<Activity, SubscriptionError> {
        let activity = self
            .tenants
            .get_activity(activity_id)
            .await?
            .ok_or(SubscriptionError::ActivityNotFound(*activity_id))?;

        if self
            .memberships
            .activity_role(user_id, &activity.id)
            .await?
            .is_some()
        {
            return Ok(activity);
        }
        if let Some(org_id) = activity.organization_id {
            if self
                .memberships
                .organization_role(user_id, &org_id)
                .await?
                .is_some()
            {
                return Ok(activity);
            }
        }
        Err(SubscriptionError::Forbidden)
    }

    /// Loads an active service by slug.
    pub(super) async fn active_service(
        &self,
        code: &ServiceCode,
    ) -> Result<Service, SubscriptionError> {
        self.catalog
            .get_service_by_code(code)
            .await?
            .filter(|s| s.active)
            .ok_or_else(|| SubscriptionError::ServiceNotFound(code.clone()))
    }

    /// Loads a plan of the service by plan code.
    pub(super) async fn plan(
        &self,
        service: &Service,
        plan_code: &str,
    ) -> Result<Plan, SubscriptionError> {
        self.catalog
            .find_plan(&service.id, plan_code)
            .await?
            .ok_or_else(|| SubscriptionError::PlanNotFound {
                service_code: service.code.clone(),
                plan_code: plan_code.to_string(),
            })
    }

    /// Emits a `license.updated` event for the committed change.
    ///
    /// Fire-and-forget: the entitlement is re-resolved so the payload
    /// reflects the post-commit state, and any failure here is logged and
    /// swallowed. The triggering operation has already succeeded.
    pub(super) async fn emit(
        &self,
        action: LicenseAction,
        service_code: &ServiceCode,
        user_id: &UserId,
        activity: &Activity,
        now: Timestamp,
    ) {
        let entitlement = match self
            .resolver
            .handle(ResolveEntitlementQuery {
                activity_id: activity.id,
                service_code: service_code.clone(),
            })
            .await
        {
            Ok(entitlement) => entitlement,
            Err(err) => {
                warn!(error = %err, action = action.as_str(), "Skipping license event: entitlement re-resolution failed");
                return;
            }
        };

        let user = match self.tenants.get_user(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(user_id = %user_id, action = action.as_str(), "Skipping license event: user not found");
                return;
            }
            Err(err) => {
                warn!(error = %err, action = action.as_str(), "Skipping license event: user lookup failed");
                return;
            }
        };

        let event = LicenseEvent::new(
            action,
            service_code.clone(),
            &user,
            activity,
            &entitlement,
            now,
        );
        if let Err(err) = self.dispatcher.dispatch(event).await {
            warn!(error = %err, action = action.as_str(), service = %service_code, "Failed to queue license event");
        }
    }
}
