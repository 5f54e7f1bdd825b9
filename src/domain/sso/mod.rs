//! SSO token domain module.
//!
//! Short-lived signed tokens (HS256 JWT) that let a downstream service
//! authenticate a user for a specific activity/service without querying the
//! central database. The embedded license snapshot is informational only;
//! verification re-resolves the entitlement.

mod claims;
mod errors;
mod issuer;
mod verifier;

pub use claims::{LicenseSnapshot, OrgSnapshot, SsoClaims};
pub use errors::SsoError;
pub use issuer::SsoTokenIssuer;
pub use verifier::SsoTokenVerifier;
