//! Axum router for the subscription endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{activate_trial, cancel, change_plan, renew, SubscriptionAppState};

/// Create the subscription API router.
///
/// - `POST /trial` - start a trial on a plan
/// - `POST /change-plan` - purchase, upgrade or convert a trial
/// - `POST /renew` - extend the billing period
/// - `POST /cancel` - cancel (default: at period end)
pub fn subscription_routes() -> Router<SubscriptionAppState> {
    Router::new()
        .route("/trial", post(activate_trial))
        .route("/change-plan", post(change_plan))
        .route("/renew", post(renew))
        .route("/cancel", post(cancel))
}
