//! Call intake server - voice-AI webhooks and post-call processing
//!
//! Receives pre-call and post-call webhooks from the voice platform, looks up
//! caller context, turns finished transcripts into redacted, summarized and
//! triaged call records, and manages bot definitions locally and at the vendor.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pipeline;
pub mod routes;
pub mod server;
pub mod vendor;

pub use config::IntakeConfig;
pub use error::*;
pub use server::IntakeServer;

use axum::{middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: IntakeServer) -> Router {
    let cors = middleware::create_cors_layer(&server.config.server.cors_origins);
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(from_fn(middleware::request_timing_middleware)),
        )
        .with_state(server)
}
