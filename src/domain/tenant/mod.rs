//! Tenant domain module.
//!
//! Organizations own activities; users are attached to both through
//! membership roles. The resolver and token issuer read these entities,
//! they never mutate them.

mod activity;
mod membership;
mod organization;
mod user;

pub use activity::{Activity, ActivityStatus};
pub use membership::{ActivityRole, OrgRole};
pub use organization::{AccountType, Organization};
pub use user::User;
