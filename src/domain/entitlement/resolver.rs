//! Pure entitlement resolution precedence chain.
//!
//! Resolution is an ordered list of steps over immutable inputs, evaluated
//! against the resolution-time clock:
//!
//! 1. valid direct subscription - explicit purchase is authoritative
//! 2. valid organization package whose grants cover the service
//! 3. lapsed direct subscription, reported as `Expired` so callers can
//!    drive renewal instead of silently downgrading to the free tier
//! 4. free plan defined by the service's catalog
//! 5. nothing - `None`
//!
//! No I/O happens here; the application handler gathers the inputs and this
//! function decides. That keeps the precedence rules trivially testable.

use crate::domain::catalog::Plan;
use crate::domain::foundation::{ActivityId, ServiceCode, Timestamp};
use crate::domain::subscription::{Subscription, SubscriptionStatus};

use super::{Entitlement, EntitlementStatus};

/// A direct subscription candidate together with its plan.
#[derive(Debug, Clone)]
pub struct DirectSubscription {
    pub subscription: Subscription,
    pub plan: Plan,
}

/// Organization package coverage candidate: the package subscription, its
/// plan (whose grants are consulted), and the package's display name.
#[derive(Debug, Clone)]
pub struct PackageCoverage {
    pub subscription: Subscription,
    pub plan: Plan,
}

/// Everything resolution needs, gathered up front.
#[derive(Debug, Clone)]
pub struct ResolutionInput {
    pub activity_id: ActivityId,
    pub service_code: ServiceCode,

    /// Direct subscription for (activity, service) with live stored status,
    /// if one exists. May still be lapsed by the clock.
    pub direct: Option<DirectSubscription>,

    /// The owning organization's package subscription, when the activity has
    /// an organization link and the organization holds one.
    pub package: Option<PackageCoverage>,

    /// The service's free plan, when the catalog defines one.
    pub free_plan: Option<Plan>,

    /// Resolution-time clock.
    pub now: Timestamp,
}

/// Resolves the effective entitlement for (activity, service).
pub fn resolve(input: ResolutionInput) -> Entitlement {
    let ResolutionInput {
        activity_id,
        service_code,
        direct,
        package,
        free_plan,
        now,
    } = input;

    // Step 1: a valid direct subscription always wins, even if the inherited
    // tier would be higher.
    if let Some(d) = direct.as_ref().filter(|d| d.subscription.is_valid_at(&now)) {
        let status = match d.subscription.status {
            SubscriptionStatus::Trial => EntitlementStatus::Trial,
            _ => EntitlementStatus::Active,
        };
        return Entitlement {
            activity_id,
            service_code,
            status,
            plan_code: Some(d.plan.code.clone()),
            billing_cycle: Some(d.subscription.billing_cycle),
            expires_at: Some(d.subscription.effective_end()),
            inherited: false,
            package_name: None,
            subscription_id: Some(d.subscription.id),
        };
    }

    // Step 2: a valid organization package covering this service.
    if let Some(p) = package.as_ref().filter(|p| p.subscription.is_valid_at(&now)) {
        if let Some(grant) = p.plan.grant_for(&service_code) {
            return Entitlement {
                activity_id,
                service_code,
                status: EntitlementStatus::Active,
                plan_code: Some(grant.plan_code.clone()),
                billing_cycle: Some(p.subscription.billing_cycle),
                expires_at: Some(p.subscription.effective_end()),
                inherited: true,
                package_name: Some(p.plan.name.clone()),
                subscription_id: Some(p.subscription.id),
            };
        }
    }

    // Step 3: a lapsed direct subscription surfaces as Expired so the caller
    // can offer renewal. Stored status is disregarded (lazy expiry).
    if let Some(d) = direct {
        return Entitlement {
            activity_id,
            service_code,
            status: EntitlementStatus::Expired,
            plan_code: Some(d.plan.code),
            billing_cycle: Some(d.subscription.billing_cycle),
            expires_at: Some(d.subscription.effective_end()),
            inherited: false,
            package_name: None,
            subscription_id: Some(d.subscription.id),
        };
    }

    // Step 4: free-tier fallback from the catalog.
    if let Some(free) = free_plan.filter(|p| p.is_free()) {
        return Entitlement {
            activity_id,
            service_code,
            status: EntitlementStatus::Free,
            plan_code: Some(free.code),
            billing_cycle: None,
            expires_at: None,
            inherited: false,
            package_name: None,
            subscription_id: None,
        };
    }

    // Step 5: nothing covers the service.
    Entitlement::none(activity_id, service_code)
}
