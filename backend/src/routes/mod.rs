//! Route definitions for the Garment Carbon Calculator API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Reference data
        .route("/catalog", get(handlers::get_catalog))
        .route("/items/:item_id/materials", get(handlers::get_item_materials))
        // Calculations
        .route("/calculate", post(handlers::calculate))
        .route("/validate", post(handlers::validate))
        .route("/equivalents", get(handlers::get_equivalents))
        .route("/compare", post(handlers::compare))
        .route("/recommendations", post(handlers::recommendations))
}
