//! Manufacturing locations

use serde::{Deserialize, Serialize};

/// A manufacturing country or region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Grid carbon intensity relative to the global average (1.0)
    pub multiplier: f64,
    /// gCO2/kWh
    pub grid_intensity: f64,
}
