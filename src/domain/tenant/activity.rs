//! Activity entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ActivityId, OrganizationId, Timestamp};

/// Lifecycle status of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Active,
    Suspended,
}

/// An activity - the unit that actually consumes a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,

    /// Owning organization. `None` for legacy rows awaiting backfill;
    /// such activities have no inheritable org package.
    pub organization_id: Option<OrganizationId>,

    pub name: String,
    pub status: ActivityStatus,
    pub created_at: Timestamp,
}
