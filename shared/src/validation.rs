//! Input validation for carbon calculations
//!
//! The calculator and the pre-flight validator run the same checks. The
//! calculator stops at the first violation; the validator reports all of
//! them at once so a form can highlight every bad field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::blend::PERCENTAGE_TOLERANCE;
use crate::catalog::ReferenceData;
use crate::error::CalculationError;
use crate::models::{Item, Location, MaterialSpec};

/// Outcome of a pre-flight check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    FailFast,
    CollectAll,
}

/// Sink for violated input constraints
#[derive(Debug)]
pub(crate) struct Violations {
    mode: Mode,
    errors: Vec<CalculationError>,
}

impl Violations {
    pub(crate) fn new(mode: Mode) -> Self {
        Self {
            mode,
            errors: Vec::new(),
        }
    }

    /// Record a violation; in fail-fast mode it is returned as the error
    pub(crate) fn report(&mut self, error: CalculationError) -> Result<(), CalculationError> {
        match self.mode {
            Mode::FailFast => Err(error),
            Mode::CollectAll => {
                self.errors.push(error);
                Ok(())
            }
        }
    }

    pub(crate) fn into_errors(self) -> Vec<CalculationError> {
        self.errors
    }
}

/// Lookups that passed the identifier checks
#[derive(Debug)]
pub(crate) struct CheckedInputs<'d> {
    pub item: Option<&'d Item>,
    pub location: Option<&'d Location>,
}

/// Identifier and shape checks shared by the calculator and the validator.
///
/// Checks the item, then the location, then the material. Custom blends
/// only get their shape checked here; percentages are the resolver's job.
pub(crate) fn check_inputs<'d>(
    data: &'d ReferenceData,
    item_id: &str,
    material: Result<&MaterialSpec, CalculationError>,
    location_id: &str,
    violations: &mut Violations,
) -> Result<CheckedInputs<'d>, CalculationError> {
    let item = data.item(item_id);
    if item.is_none() {
        violations.report(CalculationError::InvalidItem(item_id.to_string()))?;
    }

    let location = data.location(location_id);
    if location.is_none() {
        violations.report(CalculationError::InvalidLocation(location_id.to_string()))?;
    }

    match material {
        Ok(MaterialSpec::Simple(id)) if !data.has_material_or_blend(id) => {
            violations.report(CalculationError::InvalidMaterial(id.clone()))?
        }
        Ok(MaterialSpec::NamedBlend(id)) if data.blend(id).is_none() => {
            violations.report(CalculationError::InvalidMaterial(id.clone()))?
        }
        Ok(_) => {}
        Err(error) => violations.report(error)?,
    }

    Ok(CheckedInputs { item, location })
}

/// Check calculation inputs without failing.
///
/// Collects unknown item, material and location identifiers. Custom blends
/// whose percentages do not sum to 100 are still reported as valid, with a
/// warning; the calculator rejects them.
pub fn validate_inputs(
    data: &ReferenceData,
    item_id: &str,
    material: &MaterialSpec,
    location_id: &str,
) -> ValidationResult {
    validate(data, item_id, Ok(material), location_id)
}

/// Same as [`validate_inputs`] for a material given as untyped JSON
pub fn validate_raw_inputs(
    data: &ReferenceData,
    item_id: &str,
    material: &Value,
    location_id: &str,
) -> ValidationResult {
    let parsed = MaterialSpec::from_value(material);
    validate(data, item_id, parsed.as_ref().map_err(Clone::clone), location_id)
}

fn validate(
    data: &ReferenceData,
    item_id: &str,
    material: Result<&MaterialSpec, CalculationError>,
    location_id: &str,
) -> ValidationResult {
    let spec = material.as_ref().ok().copied();

    let mut violations = Violations::new(Mode::CollectAll);
    let checked = check_inputs(data, item_id, material, location_id, &mut violations);
    let mut errors = violations.into_errors();

    let mut warnings = Vec::new();
    match checked {
        Ok(checked) => {
            if let (Some(item), Some(spec)) = (checked.item, spec) {
                warnings.extend(material_warnings(data, item, spec));
            }
        }
        Err(error) => errors.push(error),
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors: errors.iter().map(ToString::to_string).collect(),
        warnings,
    }
}

fn material_warnings(data: &ReferenceData, item: &Item, spec: &MaterialSpec) -> Vec<String> {
    let mut warnings = Vec::new();
    match spec {
        MaterialSpec::Simple(id) | MaterialSpec::NamedBlend(id) => {
            let name = data
                .material(id)
                .map(|material| material.name.as_str())
                .or_else(|| data.blend(id).map(|blend| blend.name.as_str()));
            if let Some(name) = name {
                if !data.is_typical_for_item(&item.id, id) {
                    warnings.push(format!(
                        "{} is not typically used for {}",
                        name,
                        item.name.to_lowercase()
                    ));
                }
            }
        }
        MaterialSpec::Custom(blend) => {
            let total = blend.percentage_total();
            if (total - 100.0).abs() > PERCENTAGE_TOLERANCE {
                warnings.push(format!(
                    "Custom blend percentages sum to {}% and must total 100% before calculating",
                    total
                ));
            }
        }
    }
    warnings
}
