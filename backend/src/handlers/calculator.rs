//! Carbon calculation HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::services::calculator::{CalculateInput, CalculatorService, CompareInput};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquivalentsQuery {
    pub co2_kg: f64,
}

/// Full reference dataset with material groupings
pub async fn get_catalog(State(state): State<AppState>) -> impl IntoResponse {
    let service = CalculatorService::new(state.data.clone());
    Json(service.catalog())
}

/// Materials offered for one item
pub async fn get_item_materials(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> impl IntoResponse {
    let service = CalculatorService::new(state.data.clone());

    match service.materials_for_item(&item_id) {
        Ok(materials) => {
            (StatusCode::OK, Json(serde_json::json!({ "materials": materials }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Calculate the footprint of an item
pub async fn calculate(
    State(state): State<AppState>,
    Json(input): Json<CalculateInput>,
) -> impl IntoResponse {
    let service = CalculatorService::new(state.data.clone());

    match service.report(&input) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Check inputs without calculating; any well-formed JSON body gets 200 with
/// the findings, missing identifiers included
pub async fn validate(
    State(state): State<AppState>,
    Json(input): Json<CalculateInput>,
) -> impl IntoResponse {
    let service = CalculatorService::new(state.data.clone());
    Json(service.validate(&input))
}

/// Everyday equivalents of a CO2 quantity
pub async fn get_equivalents(
    State(state): State<AppState>,
    Query(query): Query<EquivalentsQuery>,
) -> impl IntoResponse {
    let service = CalculatorService::new(state.data.clone());

    match service.equivalents(query.co2_kg) {
        Ok(equivalents) => (StatusCode::OK, Json(equivalents)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Calculate two configurations and compare them
pub async fn compare(
    State(state): State<AppState>,
    Json(input): Json<CompareInput>,
) -> impl IntoResponse {
    let service = CalculatorService::new(state.data.clone());

    match service.compare(&input) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Calculate and suggest lower-impact alternatives
pub async fn recommendations(
    State(state): State<AppState>,
    Json(input): Json<CalculateInput>,
) -> impl IntoResponse {
    let service = CalculatorService::new(state.data.clone());

    match service.recommend(&input) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => e.into_response(),
    }
}
