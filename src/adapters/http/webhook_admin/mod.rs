//! Webhook admin HTTP adapter: delivery audit, replay and receiver health.

mod dto;
mod handlers;
mod routes;

pub use handlers::WebhookAdminAppState;
pub use routes::webhook_admin_routes;
