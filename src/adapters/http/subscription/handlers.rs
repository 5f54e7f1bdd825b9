//! HTTP handlers for the subscription endpoints.
//!
//! All operations are scoped to the caller's activity; the membership
//! check happens inside the application handlers.

use std::sync::Arc;

use axum::extract::{Json, State};

use crate::application::handlers::subscription::{
    ActivateTrialCommand, ActivateTrialHandler, CancelSubscriptionCommand,
    CancelSubscriptionHandler, ChangePlanCommand, ChangePlanHandler, RenewSubscriptionCommand,
    RenewSubscriptionHandler,
};
use crate::domain::foundation::ServiceCode;

use super::super::context::CallerContext;
use super::super::error::ApiError;
use super::dto::{
    CancelRequest, ChangePlanRequest, RenewRequest, SubscriptionResponse, TrialRequest,
};

/// Shared state for the subscription routes.
#[derive(Clone)]
pub struct SubscriptionAppState {
    pub activate_trial: Arc<ActivateTrialHandler>,
    pub change_plan: Arc<ChangePlanHandler>,
    pub renew: Arc<RenewSubscriptionHandler>,
    pub cancel: Arc<CancelSubscriptionHandler>,
}

fn service_code(raw: &str) -> Result<ServiceCode, ApiError> {
    ServiceCode::new(raw).map_err(|e| ApiError::validation(e.to_string()))
}

/// `POST /api/subscriptions/trial`
pub async fn activate_trial(
    State(state): State<SubscriptionAppState>,
    caller: CallerContext,
    Json(request): Json<TrialRequest>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let subscription = state
        .activate_trial
        .handle(ActivateTrialCommand {
            user_id: caller.user_id,
            activity_id: caller.activity_id,
            service_code: service_code(&request.service_code)?,
            plan_code: request.plan_code,
        })
        .await?;

    Ok(Json(SubscriptionResponse::from(subscription)))
}

/// `POST /api/subscriptions/change-plan`
pub async fn change_plan(
    State(state): State<SubscriptionAppState>,
    caller: CallerContext,
    Json(request): Json<ChangePlanRequest>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let subscription = state
        .change_plan
        .handle(ChangePlanCommand {
            user_id: caller.user_id,
            activity_id: caller.activity_id,
            service_code: service_code(&request.service_code)?,
            plan_code: request.plan_code,
            billing_cycle: request.billing_cycle,
        })
        .await?;

    Ok(Json(SubscriptionResponse::from(subscription)))
}

/// `POST /api/subscriptions/renew`
pub async fn renew(
    State(state): State<SubscriptionAppState>,
    caller: CallerContext,
    Json(request): Json<RenewRequest>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let subscription = state
        .renew
        .handle(RenewSubscriptionCommand {
            user_id: caller.user_id,
            activity_id: caller.activity_id,
            service_code: service_code(&request.service_code)?,
        })
        .await?;

    Ok(Json(SubscriptionResponse::from(subscription)))
}

/// `POST /api/subscriptions/cancel`
pub async fn cancel(
    State(state): State<SubscriptionAppState>,
    caller: CallerContext,
    Json(request): Json<CancelRequest>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let subscription = state
        .cancel
        .handle(CancelSubscriptionCommand {
            user_id: caller.user_id,
            activity_id: caller.activity_id,
            service_code: service_code(&request.service_code)?,
            immediate: request.immediate,
        })
        .await?;

    Ok(Json(SubscriptionResponse::from(subscription)))
}
