//! Webhook delivery adapters: reqwest transport, dispatcher and worker.

mod dispatcher;
mod transport;

pub use dispatcher::{delivery_pipeline, DeliveryWorker, WebhookDispatcher};
pub use transport::HttpWebhookTransport;
