//! DOID server binary.
//!
//! Wires the Postgres/Redis/HTTP adapters to the application handlers,
//! starts the webhook delivery worker and serves the REST API until
//! SIGINT/SIGTERM, draining the delivery queue on the way out.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use doid::adapters::http::{
    entitlement_routes, sso_routes, subscription_routes, webhook_admin_routes,
    EntitlementAppState, SsoAppState, SubscriptionAppState, WebhookAdminAppState,
};
use doid::adapters::postgres::{
    PostgresCatalogReader, PostgresDeliveryLog, PostgresMembershipReader,
    PostgresSubscriptionRepository, PostgresTenantReader,
};
use doid::adapters::redis::RedisNonceStore;
use doid::adapters::webhook::{delivery_pipeline, HttpWebhookTransport};
use doid::application::handlers::entitlement::ResolveEntitlementHandler;
use doid::application::handlers::sso::{AuthenticateTokenHandler, IssueTokenHandler};
use doid::application::handlers::subscription::{
    ActivateTrialHandler, CancelSubscriptionHandler, ChangePlanHandler, CommandSupport,
    ExpireLapsedSubscriptionsHandler, RenewSubscriptionHandler,
};
use doid::application::handlers::webhook::{
    CheckWebhookHealthHandler, ListDeliveriesHandler, ReplayDeliveryHandler,
};
use doid::config::AppConfig;
use doid::domain::sso::{SsoTokenIssuer, SsoTokenVerifier};
use doid::domain::webhook::WebhookSigner;
use doid::ports::{
    CatalogReader, DeliveryLog, EventDispatcher, MembershipReader, NonceStore,
    SubscriptionRepository, TenantReader, WebhookTransport,
};

/// How often lapsed subscriptions are swept to `Expired`. Lazy expiry in
/// the resolver already governs reads, so the cadence is not critical.
const EXPIRE_SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.server.log_level)?)
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    let redis_client = redis::Client::open(config.redis.url.as_str())?;
    let redis_conn = redis_client.get_multiplexed_tokio_connection().await?;

    // Ports
    let tenants: Arc<dyn TenantReader> = Arc::new(PostgresTenantReader::new(pool.clone()));
    let memberships: Arc<dyn MembershipReader> =
        Arc::new(PostgresMembershipReader::new(pool.clone()));
    let catalog: Arc<dyn CatalogReader> = Arc::new(PostgresCatalogReader::new(pool.clone()));
    let subscriptions: Arc<dyn SubscriptionRepository> =
        Arc::new(PostgresSubscriptionRepository::new(pool.clone()));
    let delivery_log: Arc<dyn DeliveryLog> = Arc::new(PostgresDeliveryLog::new(pool));
    let nonces: Arc<dyn NonceStore> = Arc::new(RedisNonceStore::new(redis_conn));
    let transport: Arc<dyn WebhookTransport> =
        Arc::new(HttpWebhookTransport::new(reqwest::Client::new()));

    // Webhook delivery pipeline: dispatch is fire-and-forget, the worker
    // owns retries and the audit log, and drains its queue on shutdown.
    let endpoints = config.webhook.endpoint_map()?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (dispatcher, worker) = delivery_pipeline(
        WebhookSigner::new(config.webhook.secret.clone()),
        endpoints.clone(),
        transport.clone(),
        delivery_log.clone(),
        config.webhook.retry_policy(),
        config.webhook.timeout(),
        config.webhook.source.clone(),
        shutdown_rx,
    );
    let worker_handle = tokio::spawn(worker.run());
    let dispatcher: Arc<dyn EventDispatcher> = Arc::new(dispatcher);

    // Application handlers
    let resolver = || {
        ResolveEntitlementHandler::new(tenants.clone(), catalog.clone(), subscriptions.clone())
    };
    let issuer = Arc::new(SsoTokenIssuer::new(
        &config.sso.secret,
        config.sso.token_ttl_secs,
    ));
    let verifier = Arc::new(SsoTokenVerifier::new(&config.sso.secret));
    let support = CommandSupport::new(
        tenants.clone(),
        memberships.clone(),
        catalog.clone(),
        subscriptions.clone(),
        dispatcher,
    );

    let sso_state = SsoAppState {
        issue_token: Arc::new(IssueTokenHandler::new(
            tenants.clone(),
            memberships.clone(),
            catalog.clone(),
            resolver(),
            issuer,
        )),
        authenticate_token: Arc::new(AuthenticateTokenHandler::new(
            verifier,
            nonces,
            tenants.clone(),
            resolver(),
        )),
    };
    let subscription_state = SubscriptionAppState {
        activate_trial: Arc::new(ActivateTrialHandler::new(support.clone())),
        change_plan: Arc::new(ChangePlanHandler::new(support.clone())),
        renew: Arc::new(RenewSubscriptionHandler::new(support.clone())),
        cancel: Arc::new(CancelSubscriptionHandler::new(support)),
    };
    let entitlement_state = EntitlementAppState {
        resolver: Arc::new(resolver()),
    };
    let webhook_state = WebhookAdminAppState {
        list_deliveries: Arc::new(ListDeliveriesHandler::new(delivery_log.clone())),
        replay_delivery: Arc::new(ReplayDeliveryHandler::new(
            delivery_log,
            transport.clone(),
            config.webhook.retry_policy(),
            config.webhook.timeout(),
            config.webhook.source.clone(),
        )),
        check_health: Arc::new(CheckWebhookHealthHandler::new(
            transport,
            endpoints,
            config.webhook.timeout(),
        )),
    };

    // Periodic expiry sweep; idempotent, so overlap with other instances
    // is harmless.
    let sweeper = ExpireLapsedSubscriptionsHandler::new(subscriptions);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(EXPIRE_SWEEP_INTERVAL);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(err) = sweeper.handle().await {
                tracing::warn!(error = %err, "expiry sweep failed");
            }
        }
    });

    let app = Router::new()
        .nest("/api/sso", sso_routes().with_state(sso_state))
        .nest(
            "/api/subscriptions",
            subscription_routes().with_state(subscription_state),
        )
        .nest(
            "/api/entitlements",
            entitlement_routes().with_state(entitlement_state),
        )
        .nest(
            "/api/webhooks",
            webhook_admin_routes().with_state(webhook_state),
        )
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "doid listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Let the worker flush queued deliveries before exit.
    let _ = shutdown_tx.send(true);
    let _ = worker_handle.await;
    info!("doid stopped");

    Ok(())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
