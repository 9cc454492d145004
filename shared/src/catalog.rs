//! Reference data: garments, materials, blends, locations and constants
//!
//! Figures follow UK DEFRA 2024 conversion factors, Carbonfact 2024 industry
//! research and Frontiers in Environmental Science (2022). All carbon values
//! are kg CO2e.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blend::{weighted_multiplier, PERCENTAGE_TOLERANCE};
use crate::error::DataError;
use crate::models::{
    Blend, BlendComponent, Item, Location, Material, MaterialCategory, PhaseShares,
};
use crate::types::ValueRange;

/// Allowed difference between a stored blend multiplier and its weighted sum
const MULTIPLIER_TOLERANCE: f64 = 1e-9;

/// Version and provenance of a dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMeta {
    pub version: String,
    pub last_updated: String,
    pub sources: Vec<String>,
}

/// Global calculation factors
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Constants {
    /// Manufacturing to full lifecycle
    pub lifecycle_multiplier: f64,
    pub transport_percentage: f64,
    /// Washing and drying, as a fraction of manufacturing
    pub use_phase_percentage: f64,
    /// Disposal, as a fraction of manufacturing
    pub end_of_life_percentage: f64,
    pub uncertainty_low: f64,
    pub uncertainty_high: f64,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            lifecycle_multiplier: 1.3,
            transport_percentage: 0.1,
            use_phase_percentage: 0.23,
            end_of_life_percentage: 0.07,
            uncertainty_low: 0.85,
            uncertainty_high: 1.15,
        }
    }
}

/// Immutable lookup tables the calculator works from.
///
/// Build it once with [`ReferenceData::builtin`] (or load an alternate
/// dataset from JSON) and hand out references.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceData {
    pub meta: DatasetMeta,
    pub items: BTreeMap<String, Item>,
    pub materials: BTreeMap<String, Material>,
    pub blends: BTreeMap<String, Blend>,
    pub locations: BTreeMap<String, Location>,
    pub constants: Constants,
}

/// A named group of material or blend identifiers for selectors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialGroup {
    pub key: String,
    pub name: String,
    pub members: Vec<String>,
}

/// A broken invariant in a dataset
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrityIssue {
    #[error("{table} entry '{key}' declares id '{id}'")]
    KeyMismatch {
        table: &'static str,
        key: String,
        id: String,
    },

    #[error("'{0}' is both a material and a blend")]
    AmbiguousIdentifier(String),

    #[error("item '{item}' defaults to unknown material '{material}'")]
    DanglingDefaultMaterial { item: String, material: String },

    #[error("blend '{blend}' references unknown material '{material}'")]
    DanglingBlendComponent { blend: String, material: String },

    #[error("blend '{blend}' nests blend '{component}'")]
    NestedBlend { blend: String, component: String },

    #[error("blend '{blend}' percentages sum to {total}, not 100")]
    BlendPercentages { blend: String, total: f64 },

    #[error("blend '{blend}' stores multiplier {stored} but its components weigh {computed}")]
    BlendMultiplierMismatch {
        blend: String,
        stored: f64,
        computed: f64,
    },

    #[error("item '{item}' phase breakdown sums to {total}, not 100")]
    ItemBreakdown { item: String, total: f64 },

    #[error("{table} entry '{id}' has non-positive {field}")]
    NonPositiveValue {
        table: &'static str,
        id: String,
        field: &'static str,
    },

    #[error("uncertainty bounds {low}/{high} do not bracket 1.0")]
    UncertaintyBounds { low: f64, high: f64 },
}

impl ReferenceData {
    /// Load a dataset in the same JSON shape as the serialized builtin table
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn blend(&self, id: &str) -> Option<&Blend> {
        self.blends.get(id)
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    /// True when the identifier names a material or a blend
    pub fn has_material_or_blend(&self, id: &str) -> bool {
        self.materials.contains_key(id) || self.blends.contains_key(id)
    }

    /// Materials offered for an item; non-textiles are reserved for footwear.
    /// Unknown items get the textile list.
    pub fn materials_for_item(&self, item_id: &str) -> Vec<&Material> {
        let footwear = self.item(item_id).map_or(false, |item| item.footwear);
        self.materials
            .values()
            .filter(|material| footwear || material.category.is_textile())
            .collect()
    }

    /// Whether a material or blend is usually offered for an item.
    ///
    /// Blends do not nest: a blend component naming another blend is never
    /// typical.
    pub fn is_typical_for_item(&self, item_id: &str, material_id: &str) -> bool {
        let offered = self.materials_for_item(item_id);
        let is_offered = |id: &str| offered.iter().any(|material| material.id == id);

        match self.blend(material_id) {
            Some(blend) => blend
                .components
                .iter()
                .all(|component| is_offered(&component.material)),
            None => is_offered(material_id),
        }
    }

    /// Materials grouped by category, followed by the named blends
    pub fn material_categories(&self) -> Vec<MaterialGroup> {
        let mut groups: Vec<MaterialGroup> = MaterialCategory::ALL
            .iter()
            .filter_map(|category| {
                let members: Vec<String> = self
                    .materials
                    .values()
                    .filter(|material| material.category == *category)
                    .map(|material| material.id.clone())
                    .collect();
                if members.is_empty() {
                    return None;
                }
                let key = serde_json::to_value(category)
                    .ok()
                    .and_then(|value| value.as_str().map(str::to_string))
                    .unwrap_or_default();
                Some(MaterialGroup {
                    key,
                    name: category.to_string(),
                    members,
                })
            })
            .collect();

        if !self.blends.is_empty() {
            groups.push(MaterialGroup {
                key: "blends".to_string(),
                name: "Common Blends".to_string(),
                members: self.blends.keys().cloned().collect(),
            });
        }
        groups
    }

    /// Check every cross-reference and stored aggregate in the dataset.
    ///
    /// An empty list means the dataset is consistent.
    pub fn integrity_report(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();

        check_keys(&mut issues, "items", &self.items, |item| &item.id);
        check_keys(&mut issues, "materials", &self.materials, |material| &material.id);
        check_keys(&mut issues, "blends", &self.blends, |blend| &blend.id);
        check_keys(&mut issues, "locations", &self.locations, |location| &location.id);

        for id in self.blends.keys() {
            if self.materials.contains_key(id) {
                issues.push(IntegrityIssue::AmbiguousIdentifier(id.clone()));
            }
        }

        for item in self.items.values() {
            if !self.has_material_or_blend(&item.default_material) {
                issues.push(IntegrityIssue::DanglingDefaultMaterial {
                    item: item.id.clone(),
                    material: item.default_material.clone(),
                });
            }
            let total = item.breakdown.total();
            if (total - 100.0).abs() > PERCENTAGE_TOLERANCE {
                issues.push(IntegrityIssue::ItemBreakdown {
                    item: item.id.clone(),
                    total,
                });
            }
            if item.base_carbon <= 0.0 {
                issues.push(IntegrityIssue::NonPositiveValue {
                    table: "items",
                    id: item.id.clone(),
                    field: "baseCarbon",
                });
            }
        }

        for material in self.materials.values() {
            if material.multiplier <= 0.0 {
                issues.push(IntegrityIssue::NonPositiveValue {
                    table: "materials",
                    id: material.id.clone(),
                    field: "multiplier",
                });
            }
        }

        for location in self.locations.values() {
            if location.multiplier <= 0.0 {
                issues.push(IntegrityIssue::NonPositiveValue {
                    table: "locations",
                    id: location.id.clone(),
                    field: "multiplier",
                });
            }
        }

        for blend in self.blends.values() {
            self.check_blend(blend, &mut issues);
        }

        let Constants {
            uncertainty_low: low,
            uncertainty_high: high,
            ..
        } = self.constants;
        if !(low < 1.0 && 1.0 < high) {
            issues.push(IntegrityIssue::UncertaintyBounds { low, high });
        }

        issues
    }

    fn check_blend(&self, blend: &Blend, issues: &mut Vec<IntegrityIssue>) {
        for component in &blend.components {
            if self.materials.contains_key(&component.material) {
                continue;
            }
            if self.blends.contains_key(&component.material) {
                issues.push(IntegrityIssue::NestedBlend {
                    blend: blend.id.clone(),
                    component: component.material.clone(),
                });
            } else {
                issues.push(IntegrityIssue::DanglingBlendComponent {
                    blend: blend.id.clone(),
                    material: component.material.clone(),
                });
            }
        }

        let total = blend.percentage_total();
        if (total - 100.0).abs() > PERCENTAGE_TOLERANCE {
            issues.push(IntegrityIssue::BlendPercentages {
                blend: blend.id.clone(),
                total,
            });
        }

        if let Some(computed) = weighted_multiplier(self, &blend.components) {
            if (computed - blend.multiplier).abs() > MULTIPLIER_TOLERANCE {
                issues.push(IntegrityIssue::BlendMultiplierMismatch {
                    blend: blend.id.clone(),
                    stored: blend.multiplier,
                    computed,
                });
            }
        }
    }
}

fn check_keys<T>(
    issues: &mut Vec<IntegrityIssue>,
    table: &'static str,
    entries: &BTreeMap<String, T>,
    id_of: impl Fn(&T) -> &String,
) {
    for (key, entry) in entries {
        let id = id_of(entry);
        if key != id {
            issues.push(IntegrityIssue::KeyMismatch {
                table,
                key: key.clone(),
                id: id.clone(),
            });
        }
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// Builtin dataset
// ============================================================================

impl ReferenceData {
    /// The production dataset
    pub fn builtin() -> Self {
        Self {
            meta: DatasetMeta {
                version: "1.0.1".to_string(),
                last_updated: "2025-01-12".to_string(),
                sources: vec![
                    "UK DEFRA Carbon Conversion Factors 2024".to_string(),
                    "Carbonfact Industry Research 2024".to_string(),
                    "Frontiers in Environmental Science (2022)".to_string(),
                    "MDPI Sustainability Studies (2023)".to_string(),
                    "International Labour Organization Textile Report".to_string(),
                ],
            },
            items: keyed(builtin_items(), |item| &item.id),
            materials: keyed(builtin_materials(), |material| &material.id),
            blends: keyed(builtin_blends(), |blend| &blend.id),
            locations: keyed(builtin_locations(), |location| &location.id),
            constants: Constants::default(),
        }
    }
}

fn keyed<T>(entries: Vec<T>, id_of: impl Fn(&T) -> &String) -> BTreeMap<String, T> {
    entries
        .into_iter()
        .map(|entry| (id_of(&entry).clone(), entry))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    name: &str,
    description: &str,
    base_carbon: f64,
    typical_range: (f64, f64),
    average_weight: f64,
    default_material: &str,
    breakdown: PhaseShares,
    footwear: bool,
) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        base_carbon,
        typical_range: ValueRange::new(typical_range.0, typical_range.1),
        average_weight,
        default_material: default_material.to_string(),
        breakdown,
        footwear,
    }
}

fn builtin_items() -> Vec<Item> {
    vec![
        item(
            "tshirt",
            "T-shirt",
            "Short-sleeved casual shirt",
            7.5,
            (2.1, 19.08),
            0.2,
            "cotton",
            PhaseShares::new(28.0, 35.0, 10.0, 27.0),
            false,
        ),
        item(
            "jeans",
            "Jeans",
            "Denim pants",
            32.0,
            (20.0, 44.0),
            0.7,
            "cotton_elastane_blend",
            PhaseShares::new(30.0, 40.0, 8.0, 22.0),
            false,
        ),
        item(
            "dress",
            "Dress",
            "One-piece garment",
            22.0,
            (11.0, 41.0),
            0.35,
            "polyester",
            PhaseShares::new(32.0, 38.0, 9.0, 21.0),
            false,
        ),
        item(
            "shoes",
            "Shoes",
            "Footwear (sneakers/casual shoes)",
            14.0,
            (13.6, 14.0),
            0.8,
            "mixed_synthetic",
            PhaseShares::new(40.0, 35.0, 10.0, 15.0),
            true,
        ),
    ]
}

fn material(
    id: &str,
    name: &str,
    category: MaterialCategory,
    multiplier: f64,
    carbon_per_kg: f64,
    sustainable: bool,
    description: &str,
) -> Material {
    Material {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        multiplier,
        carbon_per_kg,
        sustainable,
    }
}

fn builtin_materials() -> Vec<Material> {
    use MaterialCategory::*;

    vec![
        material("hemp", "Hemp", Natural, 0.48, 1.8, true, "Low-impact natural fiber"),
        material("linen", "Linen", Natural, 0.6, 4.5, true, "Made from flax plants"),
        material("organic_cotton", "Organic Cotton", Natural, 0.73, 5.5, true, "Grown without synthetic pesticides"),
        // baseline
        material("cotton", "Cotton", Natural, 1.0, 7.5, false, "Conventional cotton"),
        material("wool", "Wool", Natural, 2.4, 18.0, false, "Sheep wool (high methane impact)"),
        material("silk", "Silk", Natural, 1.65, 12.4, false, "Luxury natural fiber"),
        material("recycled_polyester", "Recycled Polyester", Synthetic, 0.35, 2.6, true, "Made from recycled plastic"),
        material("polyester", "Polyester", Synthetic, 0.85, 6.4, false, "Common synthetic fiber"),
        material("nylon", "Nylon", Synthetic, 1.1, 8.2, false, "Durable synthetic fiber"),
        material("acrylic", "Acrylic", Synthetic, 2.1, 15.8, false, "Wool-like synthetic"),
        material("elastane", "Elastane/Spandex", Synthetic, 2.67, 20.0, false, "Stretchy synthetic fiber"),
        material("rayon", "Rayon/Viscose", Synthetic, 0.9, 6.75, false, "Regenerated cellulose fiber"),
        material("leather", "Leather", Animal, 2.2, 16.5, false, "Animal hide material"),
        material("rubber", "Rubber", Other, 1.2, 9.0, false, "Natural or synthetic rubber"),
        material("mixed_synthetic", "Mixed Synthetics", Synthetic, 1.0, 7.5, false, "Combination of synthetic materials"),
    ]
}

fn blend(id: &str, name: &str, description: &str, components: &[(&str, f64)], multiplier: f64) -> Blend {
    Blend {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        components: components
            .iter()
            .map(|(material, percentage)| BlendComponent::new(*material, *percentage))
            .collect(),
        multiplier,
    }
}

fn builtin_blends() -> Vec<Blend> {
    vec![
        blend(
            "cotton_polyester_5050",
            "Cotton/Polyester (50/50)",
            "Common t-shirt blend",
            &[("cotton", 50.0), ("polyester", 50.0)],
            0.925,
        ),
        blend(
            "cotton_elastane_blend",
            "Cotton/Elastane (95/5)",
            "Stretch denim blend",
            &[("cotton", 95.0), ("elastane", 5.0)],
            1.0835,
        ),
        blend(
            "wool_polyester_5050",
            "Wool/Polyester (50/50)",
            "Warm blend fabric",
            &[("wool", 50.0), ("polyester", 50.0)],
            1.625,
        ),
        blend(
            "tri_blend",
            "Tri-blend (50/25/25)",
            "Soft athletic blend",
            &[("polyester", 50.0), ("cotton", 25.0), ("rayon", 25.0)],
            0.9,
        ),
    ]
}

fn location(id: &str, name: &str, multiplier: f64, grid_intensity: f64, description: &str) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        multiplier,
        grid_intensity,
    }
}

fn builtin_locations() -> Vec<Location> {
    vec![
        location("global", "Global Average", 1.0, 475.0, "Weighted average of major producers"),
        location("bangladesh", "Bangladesh", 0.95, 450.0, "Major textile producer"),
        location("vietnam", "Vietnam", 0.98, 465.0, "Growing manufacturing hub"),
        location("turkey", "Turkey", 1.05, 500.0, "European gateway producer"),
        location("china", "China", 1.4, 555.0, "Largest producer, coal-heavy grid"),
        location("india", "India", 1.25, 713.0, "Major producer, coal-dependent"),
        location("portugal", "Portugal/EU", 0.85, 255.0, "Cleaner European production"),
        location("usa", "USA", 0.9, 420.0, "Mixed energy grid"),
        location("pakistan", "Pakistan", 1.15, 540.0, "Major cotton producer"),
    ]
}
