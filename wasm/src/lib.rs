//! WebAssembly module for the Garment Carbon Calculator
//!
//! Runs the calculation engine client-side. Structured values cross the
//! boundary as JSON strings; failures surface as JavaScript `Error`s carrying
//! the engine's message.

use std::sync::OnceLock;

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::*;

static REFERENCE_DATA: OnceLock<ReferenceData> = OnceLock::new();

fn data() -> &'static ReferenceData {
    REFERENCE_DATA.get_or_init(ReferenceData::builtin)
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    for issue in data().integrity_report() {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "carbon data integrity: {}",
            issue
        )));
    }
}

/// Calculate the footprint of an item; returns the result as JSON
#[wasm_bindgen(js_name = calculateCarbon)]
pub fn calculate_carbon(
    item_id: &str,
    material: &str,
    location_id: &str,
) -> Result<String, JsValue> {
    calculate_json(data(), item_id, material, location_id).map_err(js_error)
}

/// Multiplier of a material, named blend or custom blend
#[wasm_bindgen(js_name = resolveMaterialMultiplier)]
pub fn resolve_material_multiplier(material: &str) -> Result<f64, JsValue> {
    resolve_json(data(), material).map_err(js_error)
}

/// Everyday equivalents of a CO2 quantity, as JSON
#[wasm_bindgen(js_name = getEquivalents)]
pub fn get_equivalents(co2_kg: f64) -> String {
    to_json(&shared::get_equivalents(co2_kg))
}

/// Pre-flight check of calculation inputs, as JSON; never throws
#[wasm_bindgen(js_name = validateInputs)]
pub fn validate_inputs(item_id: &str, material: &str, location_id: &str) -> String {
    to_json(&validate_json(data(), item_id, material, location_id))
}

/// The full reference dataset, as JSON
#[wasm_bindgen(js_name = getCatalog)]
pub fn get_catalog() -> String {
    to_json(data())
}

/// Materials offered for an item, as a JSON array
#[wasm_bindgen(js_name = getMaterialsForItem)]
pub fn get_materials_for_item(item_id: &str) -> String {
    to_json(&data().materials_for_item(item_id))
}

/// Compare two calculation results given as JSON
#[wasm_bindgen(js_name = compareCalculations)]
pub fn compare_calculations(first: &str, second: &str) -> Result<String, JsValue> {
    compare_json(first, second).map_err(js_error)
}

/// Recommendations for a calculation result given as JSON
#[wasm_bindgen(js_name = getRecommendations)]
pub fn get_recommendations(result: &str) -> Result<String, JsValue> {
    recommendations_json(data(), result).map_err(js_error)
}

/// Impact level of a footprint, as JSON
#[wasm_bindgen(js_name = classifyImpact)]
pub fn classify_impact(co2_kg: f64) -> String {
    to_json(&ImpactSummary::from(ImpactLevel::from_co2(co2_kg)))
}

// ============================================================================
// JSON plumbing
// ============================================================================

/// A material argument is JSON; text that is not JSON is taken as an identifier
fn parse_material(material: &str) -> Result<MaterialSpec, CalculationError> {
    match serde_json::from_str::<Value>(material) {
        Ok(value) => MaterialSpec::from_value(&value),
        Err(_) => Ok(MaterialSpec::material(material)),
    }
}

fn calculate_json(
    data: &ReferenceData,
    item_id: &str,
    material: &str,
    location_id: &str,
) -> Result<String, String> {
    let spec = parse_material(material).map_err(|e| e.to_string())?;
    let result = Calculator::new(data)
        .calculate_carbon(item_id, &spec, location_id)
        .map_err(|e| e.to_string())?;
    Ok(to_json(&result))
}

fn resolve_json(data: &ReferenceData, material: &str) -> Result<f64, String> {
    let spec = parse_material(material).map_err(|e| e.to_string())?;
    shared::resolve_material_multiplier(data, &spec).map_err(|e| e.to_string())
}

fn validate_json(
    data: &ReferenceData,
    item_id: &str,
    material: &str,
    location_id: &str,
) -> ValidationResult {
    let value = serde_json::from_str::<Value>(material)
        .unwrap_or_else(|_| Value::String(material.to_string()));
    shared::validate_raw_inputs(data, item_id, &value, location_id)
}

fn compare_json(first: &str, second: &str) -> Result<String, String> {
    let first = parse_result(first)?;
    let second = parse_result(second)?;
    Ok(to_json(&shared::compare_calculations(&first, &second)))
}

fn recommendations_json(data: &ReferenceData, result: &str) -> Result<String, String> {
    let result = parse_result(result)?;
    Ok(to_json(&shared::recommendations(data, &result)))
}

fn parse_result(json: &str) -> Result<CalculationResult, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid calculation result: {}", e))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn js_error(message: String) -> JsValue {
    js_sys::Error::new(&message).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> ReferenceData {
        ReferenceData::builtin()
    }

    #[test]
    fn test_calculate_with_plain_id() {
        let json = calculate_json(&data(), "tshirt", "cotton", "global").unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["manufacturing"], 7.5);
        assert_eq!(value["lifecycle"], 9.8);
        assert_eq!(value["manufacturingRange"]["min"], 6.4);
        assert_eq!(value["breakdown"]["usePhase"], 1.7);
        assert_eq!(value["inputs"]["materialDetails"]["kind"], "material");
    }

    #[test]
    fn test_calculate_with_quoted_id_and_custom_blend() {
        let data = data();
        let quoted = calculate_json(&data, "tshirt", "\"hemp\"", "portugal").unwrap();
        let value: Value = serde_json::from_str(&quoted).unwrap();
        assert_eq!(value["manufacturing"], 3.1);

        let blend = r#"{"components":[{"material":"cotton","percentage":70},{"material":"polyester","percentage":30}]}"#;
        let json = calculate_json(&data, "tshirt", blend, "global").unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["manufacturing"], 7.2);
        assert_eq!(value["calculation"]["materialMultiplier"], 0.955);
    }

    #[test]
    fn test_calculate_errors_carry_messages() {
        let data = data();
        let err = calculate_json(&data, "hat", "cotton", "global").unwrap_err();
        assert!(err.contains("Invalid item"));

        let err = calculate_json(&data, "tshirt", "null", "global").unwrap_err();
        assert!(err.contains("Invalid material format"));

        let blend = r#"{"components":[{"material":"cotton","percentage":80}]}"#;
        let err = calculate_json(&data, "tshirt", blend, "global").unwrap_err();
        assert!(err.contains("100%"));
        assert!(err.contains("80"));
    }

    #[test]
    fn test_resolve_multiplier() {
        assert_eq!(resolve_json(&data(), "wool_polyester_5050").unwrap(), 1.625);
        assert!(resolve_json(&data(), "kevlar").is_err());
    }

    #[test]
    fn test_validate_never_fails() {
        let result = validate_json(&data(), "hat", "{\"blend\":1}", "mars");
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 3);
    }

    #[test]
    fn test_compare_and_recommend() {
        let data = data();
        let a = calculate_json(&data, "tshirt", "hemp", "global").unwrap();
        let b = calculate_json(&data, "tshirt", "cotton", "china").unwrap();

        let comparison: Value = serde_json::from_str(&compare_json(&a, &b).unwrap()).unwrap();
        assert_eq!(comparison["better"], "first");

        let recs: Value = serde_json::from_str(&recommendations_json(&data, &b).unwrap()).unwrap();
        assert_eq!(recs[0]["type"], "material");

        assert!(compare_json("{}", &b).is_err());
    }

    #[test]
    fn test_classify_impact() {
        let value: Value = serde_json::from_str(&classify_impact(3.0)).unwrap();
        assert_eq!(value["level"], "low");
        assert_eq!(value["label"], "Low Impact");
    }

    #[test]
    fn test_equivalents_json() {
        let value: Value = serde_json::from_str(&get_equivalents(7.5)).unwrap();
        assert_eq!(value["driving"]["value"], 19.0);
        assert_eq!(value["phoneCharging"]["unit"], "charges");
    }
}
