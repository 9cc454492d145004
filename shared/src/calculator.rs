//! Carbon calculation engine
//!
//! manufacturing = base carbon × material multiplier × location multiplier,
//! lifecycle = manufacturing × lifecycle multiplier. Intermediate values keep
//! full precision; only the returned figures are rounded.

use crate::blend::resolve_material;
use crate::catalog::ReferenceData;
use crate::error::CalculationError;
use crate::models::{
    CalculationDetails, CalculationInputs, CalculationResult, Item, MaterialSpec, PhaseBreakdown,
};
use crate::types::{round_to, ValueRange};
use crate::validation::{check_inputs, Mode, Violations};

/// Decimal places of every kg figure in a result
const KG_DECIMALS: i32 = 1;
/// Decimal places of the reported material multiplier
const MULTIPLIER_DECIMALS: i32 = 3;

/// Computes footprints against one reference dataset
#[derive(Debug, Clone, Copy)]
pub struct Calculator<'a> {
    data: &'a ReferenceData,
}

impl<'a> Calculator<'a> {
    pub fn new(data: &'a ReferenceData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &'a ReferenceData {
        self.data
    }

    /// Estimate the footprint of an item made from a material at a location.
    ///
    /// Fails on the first unknown identifier (item, then location, then
    /// material) or invalid custom blend. Every call recomputes from the
    /// reference data.
    pub fn calculate_carbon(
        &self,
        item_id: &str,
        material: &MaterialSpec,
        location_id: &str,
    ) -> Result<CalculationResult, CalculationError> {
        let mut violations = Violations::new(Mode::FailFast);
        let checked = check_inputs(self.data, item_id, Ok(material), location_id, &mut violations)?;
        let item = checked
            .item
            .ok_or_else(|| CalculationError::InvalidItem(item_id.to_string()))?;
        let location = checked
            .location
            .ok_or_else(|| CalculationError::InvalidLocation(location_id.to_string()))?;

        let material = resolve_material(self.data, material)?;
        let constants = &self.data.constants;

        let manufacturing = item.base_carbon * material.multiplier * location.multiplier;
        let lifecycle = self.calculate_lifecycle(manufacturing);

        let manufacturing_range = ValueRange::around(
            manufacturing,
            constants.uncertainty_low,
            constants.uncertainty_high,
        );
        let lifecycle_range =
            ValueRange::around(lifecycle, constants.uncertainty_low, constants.uncertainty_high);

        let breakdown = phase_breakdown(
            manufacturing,
            item,
            constants.use_phase_percentage,
            constants.end_of_life_percentage,
        );

        let material_multiplier = round_to(material.multiplier, MULTIPLIER_DECIMALS);
        let manufacturing_rounded = round_to(manufacturing, KG_DECIMALS);
        let formula = format!(
            "{} × {} × {} = {}",
            item.base_carbon, material_multiplier, location.multiplier, manufacturing_rounded
        );

        Ok(CalculationResult {
            manufacturing: manufacturing_rounded,
            lifecycle: round_to(lifecycle, KG_DECIMALS),
            manufacturing_range: manufacturing_range.rounded(KG_DECIMALS),
            lifecycle_range: lifecycle_range.rounded(KG_DECIMALS),
            breakdown,
            inputs: CalculationInputs {
                item: item.name.clone(),
                item_id: item.id.clone(),
                material: material.name.clone(),
                material_details: material,
                location: location.name.clone(),
                location_id: location.id.clone(),
            },
            calculation: CalculationDetails {
                base_carbon: item.base_carbon,
                material_multiplier,
                location_multiplier: location.multiplier,
                lifecycle_multiplier: constants.lifecycle_multiplier,
                formula,
            },
        })
    }

    /// Scale a value by a location's grid multiplier
    pub fn apply_location_multiplier(
        &self,
        value: f64,
        location_id: &str,
    ) -> Result<f64, CalculationError> {
        self.data
            .location(location_id)
            .map(|location| value * location.multiplier)
            .ok_or_else(|| CalculationError::InvalidLocation(location_id.to_string()))
    }

    /// Full lifecycle emissions from manufacturing emissions
    pub fn calculate_lifecycle(&self, manufacturing: f64) -> f64 {
        manufacturing * self.data.constants.lifecycle_multiplier
    }
}

/// Estimate a footprint against `data`; see [`Calculator::calculate_carbon`]
pub fn calculate_carbon(
    data: &ReferenceData,
    item_id: &str,
    material: &MaterialSpec,
    location_id: &str,
) -> Result<CalculationResult, CalculationError> {
    Calculator::new(data).calculate_carbon(item_id, material, location_id)
}

fn phase_breakdown(
    manufacturing: f64,
    item: &Item,
    use_phase_share: f64,
    end_of_life_share: f64,
) -> PhaseBreakdown {
    let shares = &item.breakdown;
    let kg = |value: f64| round_to(value, KG_DECIMALS);

    PhaseBreakdown {
        materials: kg(manufacturing * (shares.materials / 100.0)),
        energy: kg(manufacturing * (shares.energy / 100.0)),
        transport: kg(manufacturing * (shares.transport / 100.0)),
        other: kg(manufacturing * (shares.other / 100.0)),
        use_phase: kg(manufacturing * use_phase_share),
        end_of_life: kg(manufacturing * end_of_life_share),
    }
}
