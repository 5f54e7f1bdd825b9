//! Axum router for the entitlement endpoint.

use axum::routing::get;
use axum::Router;

use super::handlers::{get_entitlement, EntitlementAppState};

/// Create the entitlement API router.
///
/// - `GET /:service_code` - resolved entitlement for the caller's activity
pub fn entitlement_routes() -> Router<EntitlementAppState> {
    Router::new().route("/:service_code", get(get_entitlement))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::application::handlers::entitlement::ResolveEntitlementHandler;
    use crate::application::test_support::{InMemoryWorld, WorldFixture};

    fn app(world: &InMemoryWorld) -> Router {
        let state = EntitlementAppState {
            resolver: Arc::new(ResolveEntitlementHandler::new(
                world.tenants.clone(),
                world.catalog.clone(),
                world.subscriptions.clone(),
            )),
        };
        entitlement_routes().with_state(state)
    }

    #[tokio::test]
    async fn resolves_for_the_caller_context() {
        let mut fixture = WorldFixture::default();
        fixture.with_free_plan();
        let world = InMemoryWorld::new(fixture);

        let response = app(&world)
            .oneshot(
                Request::builder()
                    .uri("/smart_review")
                    .header("X-User-Id", world.fixture.user_id.to_string())
                    .header("X-Activity-Id", world.fixture.activity_id.to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_caller_headers_are_unauthorized() {
        let world = InMemoryWorld::new(WorldFixture::default());

        let response = app(&world)
            .oneshot(
                Request::builder()
                    .uri("/smart_review")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
