//! Subscription HTTP adapter: lifecycle command endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::SubscriptionAppState;
pub use routes::subscription_routes;
