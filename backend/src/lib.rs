//! Garment Carbon Calculator - Backend Server
//!
//! HTTP API over the shared calculation engine: footprint estimates,
//! input validation, comparisons and reference data.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
use shared::ReferenceData;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<ReferenceData>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(data: ReferenceData, config: Config) -> Self {
        Self {
            data: Arc::new(data),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Garment Carbon Calculator API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
