//! Fibre materials, blends and the material specification accepted by the calculator

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::CalculationError;

/// Fibre family, used for grouping materials in selectors
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    Natural,
    Synthetic,
    Animal,
    Other,
}

impl MaterialCategory {
    pub const ALL: [MaterialCategory; 4] = [
        MaterialCategory::Natural,
        MaterialCategory::Synthetic,
        MaterialCategory::Animal,
        MaterialCategory::Other,
    ];

    /// Woven or knitted fibres usable for any garment
    pub fn is_textile(&self) -> bool {
        matches!(self, MaterialCategory::Natural | MaterialCategory::Synthetic)
    }
}

impl std::fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialCategory::Natural => write!(f, "Natural Fibers"),
            MaterialCategory::Synthetic => write!(f, "Synthetic Fibers"),
            MaterialCategory::Animal => write!(f, "Animal Materials"),
            MaterialCategory::Other => write!(f, "Other Materials"),
        }
    }
}

/// A single fibre type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: MaterialCategory,
    /// Impact relative to conventional cotton (1.0)
    pub multiplier: f64,
    /// kg CO2e per kg of fibre
    pub carbon_per_kg: f64,
    pub sustainable: bool,
}

/// One material and its share of a blend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlendComponent {
    pub material: String,
    /// Percent of the blend, 0-100
    pub percentage: f64,
}

impl BlendComponent {
    pub fn new(material: impl Into<String>, percentage: f64) -> Self {
        Self {
            material: material.into(),
            percentage,
        }
    }
}

/// Sum of component shares in percent
pub fn percentage_total(components: &[BlendComponent]) -> f64 {
    components.iter().map(|c| c.percentage).sum()
}

/// A predeclared blend with a fixed composition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Blend {
    pub id: String,
    pub name: String,
    pub description: String,
    pub components: Vec<BlendComponent>,
    /// Stored weighted multiplier; must equal the weighted sum of the components
    pub multiplier: f64,
}

impl Blend {
    pub fn percentage_total(&self) -> f64 {
        percentage_total(&self.components)
    }
}

/// A caller-supplied mix of materials with no identifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CustomBlend {
    pub components: Vec<BlendComponent>,
}

impl CustomBlend {
    pub fn new(components: Vec<BlendComponent>) -> Self {
        Self { components }
    }

    pub fn percentage_total(&self) -> f64 {
        percentage_total(&self.components)
    }
}

/// What the calculator is asked to price the garment in.
///
/// On the wire a plain string becomes [`MaterialSpec::Simple`] and an object
/// with a `components` array becomes [`MaterialSpec::Custom`].
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialSpec {
    /// A material identifier; falls back to the blends table when no material matches
    Simple(String),
    /// A named blend identifier, looked up in the blends table only
    NamedBlend(String),
    Custom(CustomBlend),
}

impl MaterialSpec {
    pub fn material(id: impl Into<String>) -> Self {
        MaterialSpec::Simple(id.into())
    }

    pub fn blend(id: impl Into<String>) -> Self {
        MaterialSpec::NamedBlend(id.into())
    }

    pub fn custom(components: Vec<BlendComponent>) -> Self {
        MaterialSpec::Custom(CustomBlend::new(components))
    }

    /// Interpret an untyped JSON value coming from a UI or HTTP client
    pub fn from_value(value: &Value) -> Result<Self, CalculationError> {
        match value {
            Value::String(id) => Ok(MaterialSpec::Simple(id.clone())),
            Value::Object(map) => match map.get("components") {
                Some(Value::Array(items)) => {
                    let components = items
                        .iter()
                        .enumerate()
                        .map(|(index, item)| {
                            serde_json::from_value::<BlendComponent>(item.clone()).map_err(|_| {
                                CalculationError::MalformedMaterialSpec(format!(
                                    "blend component {} must have a material and a numeric percentage",
                                    index + 1
                                ))
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(MaterialSpec::custom(components))
                }
                _ => Err(CalculationError::MalformedMaterialSpec(
                    "custom blend must have components array".to_string(),
                )),
            },
            _ => Err(CalculationError::MalformedMaterialSpec(
                "material must be string ID or blend object".to_string(),
            )),
        }
    }

    /// Identifier for string specs, `None` for custom blends
    pub fn id(&self) -> Option<&str> {
        match self {
            MaterialSpec::Simple(id) | MaterialSpec::NamedBlend(id) => Some(id),
            MaterialSpec::Custom(_) => None,
        }
    }
}

impl From<&str> for MaterialSpec {
    fn from(id: &str) -> Self {
        MaterialSpec::Simple(id.to_string())
    }
}

impl From<CustomBlend> for MaterialSpec {
    fn from(blend: CustomBlend) -> Self {
        MaterialSpec::Custom(blend)
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum MaterialSpecWire<'a> {
    Id(&'a str),
    Custom { components: &'a [BlendComponent] },
}

impl Serialize for MaterialSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            MaterialSpec::Simple(id) | MaterialSpec::NamedBlend(id) => MaterialSpecWire::Id(id),
            MaterialSpec::Custom(blend) => MaterialSpecWire::Custom {
                components: &blend.components,
            },
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MaterialSpec {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        MaterialSpec::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// How the material of a calculation was specified
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    Material,
    Blend,
    Custom,
}

/// Denormalised copy of the resolved material, carried by calculation results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSummary {
    pub kind: MaterialKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Unrounded resolved multiplier
    pub multiplier: f64,
    pub sustainable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<BlendComponent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spec_from_string() {
        let spec = MaterialSpec::from_value(&json!("hemp")).unwrap();
        assert_eq!(spec, MaterialSpec::material("hemp"));
        assert_eq!(spec.id(), Some("hemp"));
    }

    #[test]
    fn test_spec_from_components() {
        let spec = MaterialSpec::from_value(&json!({
            "components": [
                { "material": "cotton", "percentage": 70 },
                { "material": "polyester", "percentage": 30 }
            ]
        }))
        .unwrap();

        match spec {
            MaterialSpec::Custom(blend) => {
                assert_eq!(blend.components.len(), 2);
                assert_eq!(blend.percentage_total(), 100.0);
            }
            other => panic!("expected custom blend, got {:?}", other),
        }
    }

    #[test]
    fn test_spec_malformed_shapes() {
        for value in [
            json!(null),
            json!(42),
            json!(["cotton"]),
            json!({}),
            json!({ "components": "cotton" }),
            json!({ "components": [{ "material": "cotton", "percentage": "100" }] }),
            json!({ "components": [{ "percentage": 100 }] }),
        ] {
            let err = MaterialSpec::from_value(&value).unwrap_err();
            assert!(
                matches!(err, CalculationError::MalformedMaterialSpec(_)),
                "{} should be malformed",
                value
            );
        }
    }

    #[test]
    fn test_spec_serde_wire_form() {
        let spec: MaterialSpec = serde_json::from_str(r#""linen""#).unwrap();
        assert_eq!(spec, MaterialSpec::material("linen"));
        assert_eq!(serde_json::to_value(&spec).unwrap(), json!("linen"));

        let custom = MaterialSpec::custom(vec![BlendComponent::new("wool", 100.0)]);
        assert_eq!(
            serde_json::to_value(&custom).unwrap(),
            json!({ "components": [{ "material": "wool", "percentage": 100.0 }] })
        );

        assert!(serde_json::from_str::<MaterialSpec>("true").is_err());
    }

    #[test]
    fn test_textile_categories() {
        assert!(MaterialCategory::Natural.is_textile());
        assert!(MaterialCategory::Synthetic.is_textile());
        assert!(!MaterialCategory::Animal.is_textile());
        assert!(!MaterialCategory::Other.is_textile());
    }
}
