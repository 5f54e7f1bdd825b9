//! SSO HTTP adapter: token issuance and verification endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::SsoAppState;
pub use routes::sso_routes;
