//! JSON request/response shapes for the subscription endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::BillingCycle;
use crate::domain::subscription::{Subscription, SubscriptionStatus};

/// Request to start a trial on a plan.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialRequest {
    pub service_code: String,
    pub plan_code: String,
}

/// Request to purchase, upgrade or convert onto a paid plan.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePlanRequest {
    pub service_code: String,
    pub plan_code: String,
    pub billing_cycle: BillingCycle,
}

/// Request to renew the current subscription.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewRequest {
    pub service_code: String,
}

/// Request to cancel the current subscription.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    pub service_code: String,
    /// Cut access now instead of at the period end.
    #[serde(default)]
    pub immediate: bool,
}

/// The subscription row after the command committed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub id: String,
    pub activity_id: String,
    pub service_id: String,
    pub plan_id: String,
    pub status: SubscriptionStatus,
    pub billing_cycle: BillingCycle,
    pub current_period_start: String,
    pub current_period_end: String,
    pub trial_ends_at: Option<String>,
    pub cancel_at_period_end: bool,
    pub cancelled_at: Option<String>,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        Self {
            id: subscription.id.to_string(),
            activity_id: subscription.activity_id.to_string(),
            service_id: subscription.service_id.to_string(),
            plan_id: subscription.plan_id.to_string(),
            status: subscription.status,
            billing_cycle: subscription.billing_cycle,
            current_period_start: subscription.current_period_start.to_rfc3339(),
            current_period_end: subscription.current_period_end.to_rfc3339(),
            trial_ends_at: subscription.trial_ends_at.map(|t| t.to_rfc3339()),
            cancel_at_period_end: subscription.cancel_at_period_end,
            cancelled_at: subscription.cancelled_at.map(|t| t.to_rfc3339()),
        }
    }
}
