//! JSON response shape for the entitlement endpoint.

use serde::Serialize;

use crate::domain::catalog::BillingCycle;
use crate::domain::entitlement::{Entitlement, EntitlementStatus};
use crate::domain::foundation::ServiceCode;

/// The resolved entitlement for (activity, service).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementResponse {
    pub activity_id: String,
    pub service_code: ServiceCode,
    pub status: EntitlementStatus,
    pub is_valid: bool,
    pub plan_code: Option<String>,
    pub billing_cycle: Option<BillingCycle>,
    pub expires_at: Option<String>,
    pub inherited: bool,
    pub package_name: Option<String>,
    pub subscription_id: Option<String>,
}

impl From<Entitlement> for EntitlementResponse {
    fn from(entitlement: Entitlement) -> Self {
        Self {
            activity_id: entitlement.activity_id.to_string(),
            is_valid: entitlement.is_valid(),
            service_code: entitlement.service_code,
            status: entitlement.status,
            plan_code: entitlement.plan_code,
            billing_cycle: entitlement.billing_cycle,
            expires_at: entitlement.expires_at.map(|t| t.to_rfc3339()),
            inherited: entitlement.inherited,
            package_name: entitlement.package_name,
            subscription_id: entitlement.subscription_id.map(|id| id.to_string()),
        }
    }
}
