use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{bots, calls, functions, health, vendor, webhooks},
    server::IntakeServer,
};

/// Create health check routes
pub fn health_routes() -> Router<IntakeServer> {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
}

/// Create voice-platform webhook routes
pub fn webhook_routes() -> Router<IntakeServer> {
    Router::new()
        .route("/webhooks/pre-call", post(webhooks::pre_call))
        .route("/webhooks/post-call", post(webhooks::post_call))
}

/// Create agent custom function routes
pub fn function_routes() -> Router<IntakeServer> {
    Router::new().route("/functions/fetch-patient", post(functions::fetch_patient))
}

/// Create call record routes
pub fn call_routes() -> Router<IntakeServer> {
    Router::new()
        .route("/calls", get(calls::list_calls))
        .route("/calls/:session_id", get(calls::get_call))
}

/// Create local bot registry routes
pub fn bot_routes() -> Router<IntakeServer> {
    Router::new()
        .route("/bots", get(bots::list_bots).post(bots::create_bot))
        .route(
            "/bots/:uid",
            get(bots::get_bot)
                .patch(bots::update_bot)
                .delete(bots::delete_bot),
        )
}

/// Create vendor bot-management proxy routes
pub fn vendor_routes() -> Router<IntakeServer> {
    Router::new()
        .route("/vendor/bots", get(vendor::list_bots).post(vendor::create_bot))
        .route(
            "/vendor/bots/:uid",
            get(vendor::get_bot)
                .patch(vendor::update_bot)
                .delete(vendor::delete_bot),
        )
}

/// Create all application routes
pub fn create_routes() -> Router<IntakeServer> {
    Router::new()
        .merge(health_routes())
        .merge(webhook_routes())
        .merge(function_routes())
        .merge(call_routes())
        .merge(bot_routes())
        .merge(vendor_routes())
}
