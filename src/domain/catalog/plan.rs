//! Plans and package grants.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PlanId, ServiceCode, ServiceId};

/// Billing cycle for a paid subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

/// A covered service granted by a package plan.
///
/// `plan_code` is the tier the covered service receives, e.g. a `pro`
/// package may grant `{smart_review, pro}` and `{page_builder, business}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageGrant {
    pub service_code: ServiceCode,
    pub plan_code: String,
}

/// Feature flags and grants attached to a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFeatures {
    /// Services covered when this is a package plan. Empty for app plans.
    #[serde(default)]
    pub grants: Vec<PackageGrant>,

    /// Free-form feature switches interpreted by the downstream service.
    #[serde(default)]
    pub flags: Vec<String>,
}

/// A plan a service sells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub service_id: ServiceId,

    /// Plan code within the service (`free`, `pro`, `business`, ...).
    pub code: String,

    /// Display name.
    pub name: String,

    /// Prices in integer cents; 0 for free plans.
    pub price_monthly_cents: i64,
    pub price_yearly_cents: i64,

    /// Trial length in days; 0 means the plan offers no trial.
    pub trial_days: u32,

    pub features: PlanFeatures,
}

impl Plan {
    /// A free plan costs nothing and requires no trial.
    pub fn is_free(&self) -> bool {
        self.code == "free" && self.price_monthly_cents == 0 && self.trial_days == 0
    }

    /// Whether the plan offers a trial period.
    pub fn offers_trial(&self) -> bool {
        self.trial_days > 0
    }

    /// The grant this package plan holds for a service, if any.
    pub fn grant_for(&self, service_code: &ServiceCode) -> Option<&PackageGrant> {
        self.features
            .grants
            .iter()
            .find(|g| &g.service_code == service_code)
    }
}
