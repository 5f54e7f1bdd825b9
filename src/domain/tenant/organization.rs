//! Organization entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OrganizationId, Timestamp};

/// Commercial shape of an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// One organization, one business.
    Single,

    /// Agency managing activities on behalf of clients.
    Agency,
}

/// An organization - the tenant root that owns activities and may hold an
/// organization-level package subscription activities inherit from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub account_type: AccountType,

    /// Upper bound on activities this organization may own.
    pub max_activities: u32,

    pub created_at: Timestamp,
}
