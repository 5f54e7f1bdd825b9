//! Axum router for the webhook admin endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{check_health, list_deliveries, replay_delivery, WebhookAdminAppState};

/// Create the webhook admin API router.
///
/// - `GET /health` - per-service receiver health
/// - `GET /deliveries` - audit listing, newest first
/// - `POST /deliveries/:id/replay` - re-send the exact logged payload
pub fn webhook_admin_routes() -> Router<WebhookAdminAppState> {
    Router::new()
        .route("/health", get(check_health))
        .route("/deliveries", get(list_deliveries))
        .route("/deliveries/:id/replay", post(replay_delivery))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::memory::InMemoryDeliveryLog;
    use crate::application::handlers::webhook::{
        CheckWebhookHealthHandler, ListDeliveriesHandler, ReplayDeliveryHandler,
    };
    use crate::domain::webhook::RetryPolicy;
    use crate::ports::{TransportResponse, WebhookHeaders, WebhookTransport};

    struct NoopTransport;

    #[async_trait]
    impl WebhookTransport for NoopTransport {
        async fn post(
            &self,
            _url: &str,
            _headers: &WebhookHeaders,
            _body: &[u8],
            _timeout: Duration,
        ) -> Result<TransportResponse, String> {
            Ok(TransportResponse {
                status: 200,
                body: String::new(),
            })
        }

        async fn health_check(&self, _url: &str, _timeout: Duration) -> Result<u16, String> {
            Ok(200)
        }
    }

    fn app() -> Router {
        let log = Arc::new(InMemoryDeliveryLog::new());
        let transport = Arc::new(NoopTransport);
        let state = WebhookAdminAppState {
            list_deliveries: Arc::new(ListDeliveriesHandler::new(log.clone())),
            replay_delivery: Arc::new(ReplayDeliveryHandler::new(
                log,
                transport.clone(),
                RetryPolicy::default(),
                Duration::from_secs(5),
                "doid-test".to_string(),
            )),
            check_health: Arc::new(CheckWebhookHealthHandler::new(
                transport,
                HashMap::new(),
                Duration::from_secs(5),
            )),
        };
        webhook_admin_routes().with_state(state)
    }

    #[tokio::test]
    async fn deliveries_listing_is_ok_when_empty() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/deliveries")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn replaying_an_unknown_delivery_is_not_found() {
        let uri = format!("/deliveries/{}/replay", uuid::Uuid::new_v4());
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_reports_every_configured_service() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
