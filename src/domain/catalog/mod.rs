//! Catalog domain module.
//!
//! Read-mostly reference data: the services the platform offers and the
//! plans each service sells. Catalog values are immutable snapshots loaded
//! per request; nothing in this module mutates shared state.

mod plan;
mod service;

pub use plan::{BillingCycle, PackageGrant, Plan, PlanFeatures};
pub use service::{Service, ServiceKind};
