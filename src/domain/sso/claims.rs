//! SSO token claims.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entitlement::{Entitlement, EntitlementStatus};
use crate::domain::foundation::{ActivityId, OrganizationId, ServiceCode, UserId};

/// Organization snapshot embedded in the token for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgSnapshot {
    pub id: OrganizationId,
    pub name: String,
}

/// License snapshot embedded at issuance.
///
/// Informational only: authorization decisions always use the entitlement
/// re-resolved at verification time, never these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseSnapshot {
    pub status: EntitlementStatus,
    pub plan_code: Option<String>,
    pub inherited: bool,
}

impl From<&Entitlement> for LicenseSnapshot {
    fn from(entitlement: &Entitlement) -> Self {
        Self {
            status: entitlement.status,
            plan_code: entitlement.plan_code.clone(),
            inherited: entitlement.inherited,
        }
    }
}

/// JWT claims of an SSO token.
///
/// `jti` is a random nonce consumed exactly once at verification; `exp` is
/// minutes away from `iat` (configured TTL), so replay markers stay bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsoClaims {
    /// Subject: the authenticated user.
    pub sub: UserId,

    /// Activity scope of the token.
    pub activity_id: ActivityId,

    /// Service the token was minted for; verification rejects any other.
    pub svc: ServiceCode,

    /// Caller's role on the activity (`owner`, `member`, ...).
    pub role: String,

    /// Organization snapshot, when the activity has one.
    pub org: Option<OrgSnapshot>,

    /// License snapshot at issuance. Never trusted for authorization.
    pub license: LicenseSnapshot,

    /// Issued-at, Unix seconds.
    pub iat: i64,

    /// Expiry, Unix seconds.
    pub exp: i64,

    /// Single-use nonce.
    pub jti: Uuid,
}
