//! Garment categories

use serde::{Deserialize, Serialize};

use crate::types::ValueRange;

/// A garment category with its baseline manufacturing footprint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    /// kg CO2e for a conventional-cotton item made at global-average intensity
    pub base_carbon: f64,
    /// Spread of published estimates for this category
    pub typical_range: ValueRange,
    /// kg
    pub average_weight: f64,
    /// Material or named blend selected when the user has not chosen one
    pub default_material: String,
    pub breakdown: PhaseShares,
    /// Footwear may use leather, rubber and other non-textile materials
    #[serde(default)]
    pub footwear: bool,
}

/// Share of manufacturing emissions per phase, in percent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PhaseShares {
    pub materials: f64,
    pub energy: f64,
    pub transport: f64,
    pub other: f64,
}

impl PhaseShares {
    pub fn new(materials: f64, energy: f64, transport: f64, other: f64) -> Self {
        Self {
            materials,
            energy,
            transport,
            other,
        }
    }

    pub fn total(&self) -> f64 {
        self.materials + self.energy + self.transport + self.other
    }
}
