//! HTTP API tests for the calculator endpoints
//!
//! Requests are driven through the full router with `tower::ServiceExt::oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use gcc_server::{create_app, AppState, Config};
use proptest::prelude::*;
use serde_json::{json, Value};
use shared::ReferenceData;
use tower::ServiceExt;

fn app() -> Router {
    create_app(AppState::new(ReferenceData::builtin(), Config::default()))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

// ============================================================================
// Health and reference data
// ============================================================================

#[tokio::test]
async fn test_root_and_health() {
    let (status, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Garment Carbon Calculator API v1.0");

    let (status, body) = get("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["datasetVersion"].is_string());
}

#[tokio::test]
async fn test_catalog_lists_reference_data() {
    let (status, body) = get("/api/v1/catalog").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"]["tshirt"]["baseCarbon"], 7.5);
    assert!(body["materials"]["cotton"].is_object());
    assert!(body["blends"]["cotton_polyester_5050"].is_object());
    assert_eq!(body["blends"].as_object().unwrap().len(), 4);
    assert!(body["locations"]["global"].is_object());
    assert!(body["categories"].as_array().unwrap().len() >= 2);
}

#[tokio::test]
async fn test_item_materials() {
    let (status, body) = get("/api/v1/items/tshirt/materials").await;
    assert_eq!(status, StatusCode::OK);
    let materials = body["materials"].as_array().unwrap();
    assert!(materials.iter().any(|m| m["id"] == "cotton"));

    let (status, body) = get("/api/v1/items/hat/materials").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

// ============================================================================
// Calculation
// ============================================================================

#[tokio::test]
async fn test_calculate_cotton_tshirt() {
    let (status, body) = post(
        "/api/v1/calculate",
        json!({ "itemId": "tshirt", "material": "cotton", "locationId": "global" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["manufacturing"], 7.5);
    assert_eq!(body["lifecycle"], 9.8);
    assert_eq!(body["manufacturingRange"]["min"], 6.4);
    assert_eq!(body["manufacturingRange"]["max"], 8.6);
    assert_eq!(body["breakdown"]["materials"], 2.1);
    assert_eq!(body["inputs"]["item"], "T-shirt");
    assert_eq!(body["equivalents"]["driving"]["value"], 19.0);
    assert_eq!(body["impact"]["level"], "medium");
}

#[tokio::test]
async fn test_calculate_named_and_custom_blends() {
    let (status, body) = post(
        "/api/v1/calculate",
        json!({ "itemId": "jeans", "material": "cotton_elastane_blend", "locationId": "china" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["manufacturing"], 48.5);
    assert_eq!(body["impact"]["level"], "very-high");

    let (status, body) = post(
        "/api/v1/calculate",
        json!({
            "itemId": "tshirt",
            "material": { "components": [
                { "material": "cotton", "percentage": 70 },
                { "material": "polyester", "percentage": 30 }
            ]},
            "locationId": "global"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["manufacturing"], 7.2);
    assert_eq!(body["calculation"]["materialMultiplier"], 0.955);
    assert_eq!(body["inputs"]["materialDetails"]["kind"], "custom");
}

#[tokio::test]
async fn test_calculate_rejects_unknown_identifiers() {
    let (status, body) = post(
        "/api/v1/calculate",
        json!({ "itemId": "hat", "material": "cotton", "locationId": "global" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_ITEM");
    assert_eq!(body["error"]["field"], "itemId");
    assert_eq!(body["error"]["message"], "Invalid item ID: hat");

    let (status, body) = post(
        "/api/v1/calculate",
        json!({ "itemId": "tshirt", "material": "cotton", "locationId": "mars" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_LOCATION");
}

#[tokio::test]
async fn test_calculate_rejects_bad_blends() {
    let (status, body) = post(
        "/api/v1/calculate",
        json!({
            "itemId": "tshirt",
            "material": { "components": [{ "material": "cotton", "percentage": 80 }] },
            "locationId": "global"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "PERCENTAGE_SUM");

    let (status, body) = post(
        "/api/v1/calculate",
        json!({ "itemId": "tshirt", "material": 42, "locationId": "global" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MALFORMED_MATERIAL_SPEC");
}

#[tokio::test]
async fn test_calculate_rejects_empty_identifiers() {
    let (status, body) = post(
        "/api/v1/calculate",
        json!({ "itemId": "", "material": "cotton", "locationId": "global" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "item_id");
}

// ============================================================================
// Validation, equivalents, comparison, recommendations
// ============================================================================

#[tokio::test]
async fn test_validate_reports_all_problems() {
    let (status, body) = post(
        "/api/v1/validate",
        json!({ "itemId": "hat", "material": "kevlar", "locationId": "mars" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert_eq!(body["errors"].as_array().unwrap().len(), 3);

    let (status, body) = post(
        "/api/v1/validate",
        json!({ "itemId": "tshirt", "material": "cotton", "locationId": "global" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
}

#[tokio::test]
async fn test_validate_reports_missing_identifiers() {
    let (status, body) = post("/api/v1/validate", json!({ "material": "cotton" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    let errors: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e.as_str().unwrap())
        .collect();
    assert_eq!(errors, vec!["Invalid item ID: ", "Invalid location ID: "]);
}

#[tokio::test]
async fn test_calculate_missing_identifiers_is_bad_request() {
    let (status, body) = post("/api/v1/calculate", json!({ "material": "cotton" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_equivalents_endpoint() {
    let (status, body) = get("/api/v1/equivalents?co2Kg=48.5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["driving"]["value"], 121.0);
    assert_eq!(body["streaming"]["value"], 882.0);

    let (status, _) = get("/api/v1/equivalents").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_compare_endpoint() {
    let (status, body) = post(
        "/api/v1/compare",
        json!({
            "first": { "itemId": "tshirt", "material": "hemp", "locationId": "global" },
            "second": { "itemId": "tshirt", "material": "cotton", "locationId": "china" }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comparison"]["better"], "first");
    assert!(body["comparison"]["difference"].as_f64().unwrap() > 0.0);
    assert_eq!(body["second"]["manufacturing"], 10.5);
}

#[tokio::test]
async fn test_recommendations_endpoint() {
    let (status, body) = post(
        "/api/v1/recommendations",
        json!({ "itemId": "jeans", "material": "cotton", "locationId": "china" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let recommendations = body["recommendations"].as_array().unwrap();
    let kinds: Vec<&str> = recommendations
        .iter()
        .map(|r| r["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["material", "location", "general"]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_equivalents_driving_matches_formula(co2 in 0.0f64..500.0) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (status, body) = runtime.block_on(get(&format!("/api/v1/equivalents?co2Kg={}", co2)));
        prop_assert_eq!(status, StatusCode::OK);
        let miles = body["driving"]["value"].as_f64().unwrap();
        prop_assert!((miles - co2 * 2.5).abs() <= 0.5 + 1e-9);
    }
}
