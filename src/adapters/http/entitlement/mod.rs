//! Entitlement HTTP adapter: read-only resolution endpoint.

mod dto;
mod handlers;
mod routes;

pub use handlers::EntitlementAppState;
pub use routes::entitlement_routes;
