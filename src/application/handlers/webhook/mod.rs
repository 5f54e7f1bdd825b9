//! Webhook admin handlers: delivery audit, replay, downstream health.

mod check_health;
mod list_deliveries;
mod replay_delivery;

pub use check_health::{CheckWebhookHealthHandler, ServiceHealth};
pub use list_deliveries::{ListDeliveriesHandler, ListDeliveriesQuery, DEFAULT_LIMIT, MAX_LIMIT};
pub use replay_delivery::{ReplayDeliveryCommand, ReplayDeliveryHandler};
