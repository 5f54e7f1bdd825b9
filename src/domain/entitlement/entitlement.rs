//! The derived entitlement type.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::BillingCycle;
use crate::domain::foundation::{ActivityId, ServiceCode, SubscriptionId, Timestamp};

/// Effective license status for (activity, service) after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementStatus {
    /// Live trial subscription.
    Trial,

    /// Live paid subscription (direct or inherited).
    Active,

    /// Free-tier fallback defined by the service's catalog.
    Free,

    /// A direct subscription exists but its period has lapsed. Surfaced so
    /// callers can drive renewal instead of hiding the service.
    Expired,

    /// Nothing covers the service.
    None,
}

/// The effective license an activity holds for a service.
///
/// Computed by [`super::resolve`]; never stored. `expires_at` is the
/// resolution-time view and goes stale the moment the underlying
/// subscription changes, which is why verifiers re-resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    pub activity_id: ActivityId,
    pub service_code: ServiceCode,
    pub status: EntitlementStatus,

    /// Effective plan code; `None` when status is `None`.
    pub plan_code: Option<String>,

    /// Billing cycle of the contributing subscription, if any.
    pub billing_cycle: Option<BillingCycle>,

    /// When the current entitlement lapses; `None` for free/none.
    pub expires_at: Option<Timestamp>,

    /// True when derived from an organization package rather than a direct
    /// per-activity purchase.
    pub inherited: bool,

    /// Display name of the covering package, when inherited.
    pub package_name: Option<String>,

    /// The contributing subscription, if any.
    pub subscription_id: Option<SubscriptionId>,
}

impl Entitlement {
    /// Whether the entitlement currently grants access.
    pub fn is_valid(&self) -> bool {
        matches!(
            self.status,
            EntitlementStatus::Trial | EntitlementStatus::Active | EntitlementStatus::Free
        )
    }

    /// The "nothing covers this service" entitlement.
    pub fn none(activity_id: ActivityId, service_code: ServiceCode) -> Self {
        Self {
            activity_id,
            service_code,
            status: EntitlementStatus::None,
            plan_code: None,
            billing_cycle: None,
            expires_at: None,
            inherited: false,
            package_name: None,
            subscription_id: None,
        }
    }
}
