//! ResolveEntitlementHandler - the read side every other operation leans on.
//!
//! Gathers the immutable inputs (activity, service, candidate subscriptions,
//! free plan) through the read ports and hands them to the pure precedence
//! chain in `domain::entitlement`. Read-only and lock-free.

use std::sync::Arc;

use crate::domain::entitlement::{
    resolve, DirectSubscription, Entitlement, EntitlementError, PackageCoverage, ResolutionInput,
};
use crate::domain::foundation::{ActivityId, ServiceCode, Timestamp};
use crate::ports::{CatalogReader, SubscriptionRepository, TenantReader};

/// Query to resolve the effective entitlement for (activity, service).
#[derive(Debug, Clone)]
pub struct ResolveEntitlementQuery {
    pub activity_id: ActivityId,
    pub service_code: ServiceCode,
}

/// Handler computing the effective license for an activity and service.
#[derive(Clone)]
pub struct ResolveEntitlementHandler {
    tenants: Arc<dyn TenantReader>,
    catalog: Arc<dyn CatalogReader>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl ResolveEntitlementHandler {
    pub fn new(
        tenants: Arc<dyn TenantReader>,
        catalog: Arc<dyn CatalogReader>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            tenants,
            catalog,
            subscriptions,
        }
    }

    pub async fn handle(
        &self,
        query: ResolveEntitlementQuery,
    ) -> Result<Entitlement, EntitlementError> {
        let activity = self
            .tenants
            .get_activity(&query.activity_id)
            .await?
            .ok_or(EntitlementError::ActivityNotFound(query.activity_id))?;

        let service = self
            .catalog
            .get_service_by_code(&query.service_code)
            .await?
            .filter(|s| s.active)
            .ok_or_else(|| EntitlementError::ServiceNotFound(query.service_code.clone()))?;

        let direct = match self
            .subscriptions
            .find_direct(&activity.id, &service.id)
            .await?
        {
            Some(subscription) => self
                .catalog
                .get_plan(&subscription.plan_id)
                .await?
                .map(|plan| DirectSubscription { subscription, plan }),
            None => None,
        };

        // An activity without an organization link has no inheritable
        // package; resolution falls through to free/none.
        let package = match activity.organization_id {
            Some(org_id) => match self.subscriptions.find_org_package(&org_id).await? {
                Some(subscription) => self
                    .catalog
                    .get_plan(&subscription.plan_id)
                    .await?
                    .map(|plan| PackageCoverage { subscription, plan }),
                None => None,
            },
            None => None,
        };

        let free_plan = self.catalog.free_plan(&service.id).await?;

        Ok(resolve(ResolutionInput {
            activity_id: activity.id,
            service_code: service.code,
            direct,
            package,
            free_plan,
            now: Timestamp::now(),
        }))
    }
}
