//! License change event payload.

use serde::{Deserialize, Serialize};

use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::{
    ActivityId, EmailAddress, OrganizationId, ServiceCode, Timestamp, UserId,
};
use crate::domain::tenant::{Activity, User};

use super::LICENSE_UPDATED_EVENT;

/// What changed. The vocabulary is fixed; downstream services treat repeated
/// delivery of the same (activity, service, action, timestamp) as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseAction {
    TrialActivated,
    Activated,
    Renewed,
    Cancelled,
}

impl LicenseAction {
    /// Wire name, also used in log records.
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseAction::TrialActivated => "trial_activated",
            LicenseAction::Activated => "activated",
            LicenseAction::Renewed => "renewed",
            LicenseAction::Cancelled => "cancelled",
        }
    }
}

/// User summary embedded in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub email: EmailAddress,
}

/// Activity summary embedded in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub id: ActivityId,
    pub name: String,
    pub organization_id: Option<OrganizationId>,
}

/// License snapshot embedded in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseSummary {
    pub status: String,
    pub plan_code: Option<String>,
    pub billing_cycle: Option<String>,
    pub expires_at: Option<String>,
    pub inherited: bool,
}

/// The `license.updated` event delivered to downstream services.
///
/// Serialized exactly once per dispatch; the HMAC signature covers those
/// exact bytes, so the payload must never be re-serialized on retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseEvent {
    /// Always `license.updated`.
    pub event: String,

    /// Unix seconds when the change was committed.
    pub timestamp: i64,

    pub action: LicenseAction,
    pub service: ServiceCode,
    pub user: UserSummary,
    pub activity: ActivitySummary,
    pub license: LicenseSummary,
}

impl LicenseEvent {
    /// Builds the event from the committed state.
    pub fn new(
        action: LicenseAction,
        service: ServiceCode,
        user: &User,
        activity: &Activity,
        entitlement: &Entitlement,
        now: Timestamp,
    ) -> Self {
        Self {
            event: LICENSE_UPDATED_EVENT.to_string(),
            timestamp: now.as_unix_secs(),
            action,
            service,
            user: UserSummary {
                id: user.id,
                email: user.email.clone(),
            },
            activity: ActivitySummary {
                id: activity.id,
                name: activity.name.clone(),
                organization_id: activity.organization_id,
            },
            license: LicenseSummary {
                status: format!("{:?}", entitlement.status).to_lowercase(),
                plan_code: entitlement.plan_code.clone(),
                billing_cycle: entitlement
                    .billing_cycle
                    .map(|c| format!("{:?}", c).to_lowercase()),
                expires_at: entitlement.expires_at.map(|t| t.to_rfc3339()),
                inherited: entitlement.inherited,
            },
        }
    }
}
