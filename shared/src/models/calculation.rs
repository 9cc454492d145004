//! Calculation results

use serde::{Deserialize, Serialize};

use super::MaterialSummary;
use crate::types::ValueRange;

/// Footprint estimate for one item/material/location combination.
///
/// All kg values are rounded to one decimal place. The result carries
/// copies of the names and multipliers it was computed from, never references
/// into the reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Cradle-to-gate kg CO2e
    pub manufacturing: f64,
    /// Manufacturing plus use phase and end of life, kg CO2e
    pub lifecycle: f64,
    pub manufacturing_range: ValueRange,
    pub lifecycle_range: ValueRange,
    pub breakdown: PhaseBreakdown,
    pub inputs: CalculationInputs,
    pub calculation: CalculationDetails,
}

/// Emissions per phase, kg CO2e
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhaseBreakdown {
    pub materials: f64,
    pub energy: f64,
    pub transport: f64,
    pub other: f64,
    pub use_phase: f64,
    pub end_of_life: f64,
}

/// Resolved inputs of a calculation, for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInputs {
    pub item: String,
    pub item_id: String,
    pub material: String,
    pub material_details: MaterialSummary,
    pub location: String,
    pub location_id: String,
}

/// The factors that produced the manufacturing figure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationDetails {
    pub base_carbon: f64,
    /// Rounded to three decimals for display
    pub material_multiplier: f64,
    pub location_multiplier: f64,
    pub lifecycle_multiplier: f64,
    pub formula: String,
}
