//! Comparisons, recommendations and display helpers built on calculation results

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::ReferenceData;
use crate::models::{CalculationResult, Location, Material};
use crate::types::{round_to, ValueRange};

/// Locations above this grid multiplier get a relocation suggestion
const DIRTY_GRID_THRESHOLD: f64 = 1.1;
/// Items above this many kg CO2e get longevity tips
const HIGH_IMPACT_KG: f64 = 20.0;
const MAX_ALTERNATIVES: usize = 3;

// ============================================================================
// Comparison
// ============================================================================

/// Which of two compared calculations has the lower footprint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Preferred {
    First,
    Second,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    /// Absolute manufacturing difference, kg CO2e
    pub difference: f64,
    /// Difference relative to the second calculation, percent
    pub percentage_difference: f64,
    pub better: Preferred,
    pub summary: String,
}

/// Compare the manufacturing footprints of two calculations.
///
/// Ties favour the second calculation. A zero second footprint yields a 0%
/// relative difference.
pub fn compare_calculations(first: &CalculationResult, second: &CalculationResult) -> Comparison {
    let diff = first.manufacturing - second.manufacturing;
    let percent = if second.manufacturing == 0.0 {
        0.0
    } else {
        diff / second.manufacturing * 100.0
    };

    let (better, direction) = if diff < 0.0 {
        (Preferred::First, "lower")
    } else {
        (Preferred::Second, "higher")
    };

    Comparison {
        difference: round_to(diff.abs(), 1),
        percentage_difference: round_to(percent.abs(), 1),
        better,
        summary: format!("{:.1}% {} emissions", percent.abs(), direction),
    }
}

// ============================================================================
// Recommendations
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Recommendation {
    Material {
        title: String,
        description: String,
        alternatives: Vec<Material>,
    },
    Location {
        title: String,
        description: String,
        alternatives: Vec<Location>,
    },
    General {
        title: String,
        description: String,
        tips: Vec<String>,
    },
}

/// Suggest lower-impact choices for a calculation
pub fn recommendations(data: &ReferenceData, result: &CalculationResult) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let current = &result.inputs.material_details;

    if !current.sustainable {
        let mut alternatives: Vec<Material> = data
            .materials_for_item(&result.inputs.item_id)
            .into_iter()
            .filter(|material| material.sustainable && material.multiplier < current.multiplier)
            .cloned()
            .collect();
        alternatives.sort_by(|a, b| by_multiplier(a.multiplier, b.multiplier));
        alternatives.truncate(MAX_ALTERNATIVES);

        if let Some(best) = alternatives.first() {
            let reduction = round_to((1.0 - best.multiplier / current.multiplier) * 100.0, 0);
            recommendations.push(Recommendation::Material {
                title: "Consider Sustainable Materials".to_string(),
                description: format!(
                    "Switching to {} could reduce emissions by {}%",
                    best.name, reduction
                ),
                alternatives,
            });
        }
    }

    if let Some(location) = data.location(&result.inputs.location_id) {
        if location.multiplier > DIRTY_GRID_THRESHOLD {
            let mut cleaner: Vec<Location> = data
                .locations
                .values()
                .filter(|candidate| candidate.multiplier < location.multiplier)
                .cloned()
                .collect();
            cleaner.sort_by(|a, b| by_multiplier(a.multiplier, b.multiplier));
            cleaner.truncate(MAX_ALTERNATIVES);

            if let Some(best) = cleaner.first() {
                let reduction = round_to((1.0 - best.multiplier / location.multiplier) * 100.0, 0);
                recommendations.push(Recommendation::Location {
                    title: "Cleaner Manufacturing Locations".to_string(),
                    description: format!(
                        "Manufacturing in {} could reduce emissions by {}%",
                        best.name, reduction
                    ),
                    alternatives: cleaner,
                });
            }
        }
    }

    if result.manufacturing > HIGH_IMPACT_KG {
        recommendations.push(Recommendation::General {
            title: "High Impact Item".to_string(),
            description: "Consider buying second-hand or choosing items designed for longevity"
                .to_string(),
            tips: vec![
                "Buy quality items that last longer".to_string(),
                "Look for second-hand options".to_string(),
                "Choose timeless designs over fast fashion".to_string(),
            ],
        });
    }

    recommendations
}

fn by_multiplier(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// Impact level
// ============================================================================

/// Coarse rating of a manufacturing footprint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum ImpactLevel {
    /// Below 5 kg
    Low,
    /// 5-15 kg
    Medium,
    /// 15-30 kg
    High,
    /// 30 kg and above
    VeryHigh,
}

impl ImpactLevel {
    pub fn from_co2(co2_kg: f64) -> Self {
        if co2_kg < 5.0 {
            ImpactLevel::Low
        } else if co2_kg < 15.0 {
            ImpactLevel::Medium
        } else if co2_kg < 30.0 {
            ImpactLevel::High
        } else {
            ImpactLevel::VeryHigh
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImpactLevel::Low => "Low Impact",
            ImpactLevel::Medium => "Medium Impact",
            ImpactLevel::High => "High Impact",
            ImpactLevel::VeryHigh => "Very High Impact",
        }
    }

    /// Hex colour used by the results card
    pub fn color(&self) -> &'static str {
        match self {
            ImpactLevel::Low => "#10b981",
            ImpactLevel::Medium => "#f59e0b",
            ImpactLevel::High => "#f97316",
            ImpactLevel::VeryHigh => "#ef4444",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ImpactLevel::Low => "Great choice! This has a relatively low carbon footprint.",
            ImpactLevel::Medium => "Moderate carbon footprint. Consider sustainable alternatives.",
            ImpactLevel::High => "High carbon footprint. Look for eco-friendly options.",
            ImpactLevel::VeryHigh => {
                "Very high carbon footprint. Consider alternatives or buy less frequently."
            }
        }
    }
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Serializable view of an impact level for UI clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImpactSummary {
    pub level: ImpactLevel,
    pub label: String,
    pub color: String,
    pub description: String,
}

impl From<ImpactLevel> for ImpactSummary {
    fn from(level: ImpactLevel) -> Self {
        Self {
            level,
            label: level.label().to_string(),
            color: level.color().to_string(),
            description: level.description().to_string(),
        }
    }
}

// ============================================================================
// Formatting
// ============================================================================

pub fn format_co2(co2_kg: f64) -> String {
    format!("{:.1} kg CO₂e", co2_kg)
}

pub fn format_range(range: &ValueRange) -> String {
    format!("{:.1} - {:.1} kg", range.min, range.max)
}

/// Plain-text summary for sharing a result
pub fn share_text(result: &CalculationResult) -> String {
    format!(
        "I calculated the carbon footprint of a {}:\n\
         {} (manufacturing, {})\n\
         {} (full lifecycle)\n\n\
         Material: {}\n\
         Made in: {}",
        result.inputs.item,
        format_co2(result.manufacturing),
        ImpactLevel::from_co2(result.manufacturing).label(),
        format_co2(result.lifecycle),
        result.inputs.material,
        result.inputs.location,
    )
}
