//! Resolution of material specifications into a single impact multiplier

use crate::catalog::ReferenceData;
use crate::error::CalculationError;
use crate::models::{
    percentage_total, Blend, BlendComponent, Material, MaterialKind, MaterialSpec, MaterialSummary,
};

/// Allowed distance of a custom blend's percentage sum from 100
pub const PERCENTAGE_TOLERANCE: f64 = 0.1;

/// Display name used for ad hoc blends
pub const CUSTOM_BLEND_NAME: &str = "Custom Blend";

/// Resolve a material specification to its multiplier relative to cotton.
///
/// The value is not rounded.
pub fn resolve_material_multiplier(
    data: &ReferenceData,
    spec: &MaterialSpec,
) -> Result<f64, CalculationError> {
    resolve_material(data, spec).map(|summary| summary.multiplier)
}

/// Resolve a material specification to its multiplier and display details
pub fn resolve_material(
    data: &ReferenceData,
    spec: &MaterialSpec,
) -> Result<MaterialSummary, CalculationError> {
    match spec {
        MaterialSpec::Simple(id) => {
            if let Some(material) = data.material(id) {
                Ok(material_summary(material))
            } else if let Some(blend) = data.blend(id) {
                Ok(blend_summary(data, blend))
            } else {
                Err(CalculationError::InvalidMaterial(id.clone()))
            }
        }
        MaterialSpec::NamedBlend(id) => data
            .blend(id)
            .map(|blend| blend_summary(data, blend))
            .ok_or_else(|| CalculationError::InvalidMaterial(id.clone())),
        MaterialSpec::Custom(blend) => {
            let multiplier = custom_blend_multiplier(data, &blend.components)?;
            Ok(MaterialSummary {
                kind: MaterialKind::Custom,
                id: None,
                name: CUSTOM_BLEND_NAME.to_string(),
                multiplier,
                sustainable: components_sustainable(data, &blend.components),
                components: blend.components.clone(),
            })
        }
    }
}

/// Weighted multiplier of a caller-supplied blend.
///
/// Components must name materials (blends do not nest), carry a share
/// between 0 and 100, and the shares must sum to 100 within
/// [`PERCENTAGE_TOLERANCE`]. Shares are never normalised.
pub fn custom_blend_multiplier(
    data: &ReferenceData,
    components: &[BlendComponent],
) -> Result<f64, CalculationError> {
    for component in components {
        let p = component.percentage;
        if !p.is_finite() || p < 0.0 || p > 100.0 {
            return Err(CalculationError::InvalidPercentage {
                material: component.material.clone(),
                percentage: p,
            });
        }
    }

    let materials = components
        .iter()
        .map(|component| {
            data.material(&component.material)
                .ok_or_else(|| CalculationError::InvalidBlendComponent(component.material.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total = percentage_total(components);
    if (total - 100.0).abs() > PERCENTAGE_TOLERANCE {
        return Err(CalculationError::PercentageSum { total });
    }

    Ok(weighted_sum(materials.into_iter().zip(components)))
}

/// Weighted multiplier of a component list, or `None` when a component does
/// not name a material
pub(crate) fn weighted_multiplier(data: &ReferenceData, components: &[BlendComponent]) -> Option<f64> {
    let materials = components
        .iter()
        .map(|component| data.material(&component.material))
        .collect::<Option<Vec<_>>>()?;
    Some(weighted_sum(materials.into_iter().zip(components)))
}

fn weighted_sum<'a>(pairs: impl Iterator<Item = (&'a Material, &'a BlendComponent)>) -> f64 {
    pairs.fold(0.0, |acc, (material, component)| {
        acc + (material.multiplier * component.percentage) / 100.0
    })
}

/// A blend counts as sustainable when every material with a non-zero share is
fn components_sustainable(data: &ReferenceData, components: &[BlendComponent]) -> bool {
    !components.is_empty()
        && components
            .iter()
            .filter(|component| component.percentage > 0.0)
            .all(|component| {
                data.material(&component.material)
                    .map_or(false, |material| material.sustainable)
            })
}

fn material_summary(material: &Material) -> MaterialSummary {
    MaterialSummary {
        kind: MaterialKind::Material,
        id: Some(material.id.clone()),
        name: material.name.clone(),
        multiplier: material.multiplier,
        sustainable: material.sustainable,
        components: Vec::new(),
    }
}

fn blend_summary(data: &ReferenceData, blend: &Blend) -> MaterialSummary {
    MaterialSummary {
        kind: MaterialKind::Blend,
        id: Some(blend.id.clone()),
        name: blend.name.clone(),
        multiplier: blend.multiplier,
        sustainable: components_sustainable(data, &blend.components),
        components: blend.components.clone(),
    }
}
