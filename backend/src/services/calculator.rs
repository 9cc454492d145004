//! Carbon calculation service backed by the shared engine

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::{
    get_equivalents, validate_raw_inputs, CalculationResult, Calculator, Comparison, Equivalents,
    ImpactLevel, ImpactSummary, Material, MaterialGroup, MaterialSpec, Recommendation,
    ReferenceData, ValidationResult,
};

/// Calculation service over one reference dataset
#[derive(Clone)]
pub struct CalculatorService {
    data: Arc<ReferenceData>,
}

/// Input for a single calculation
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CalculateInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 64))]
    pub item_id: String,
    /// Material ID, named blend ID or `{"components": [...]}`
    #[serde(default)]
    pub material: Value,
    #[serde(default)]
    #[validate(length(min = 1, max = 64))]
    pub location_id: String,
}

/// Two calculations to compare
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompareInput {
    #[validate]
    pub first: CalculateInput,
    #[validate]
    pub second: CalculateInput,
}

/// A calculation with its everyday equivalents and impact rating
#[derive(Debug, Clone, Serialize)]
pub struct CalculationReport {
    #[serde(flatten)]
    pub result: CalculationResult,
    pub equivalents: Equivalents,
    pub impact: ImpactSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub first: CalculationResult,
    pub second: CalculationResult,
    pub comparison: Comparison,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub result: CalculationResult,
    pub recommendations: Vec<Recommendation>,
}

/// Reference data plus selector groupings
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    #[serde(flatten)]
    pub data: ReferenceData,
    pub categories: Vec<MaterialGroup>,
}

impl CalculatorService {
    pub fn new(data: Arc<ReferenceData>) -> Self {
        Self { data }
    }

    /// Run one calculation
    pub fn calculate(&self, input: &CalculateInput) -> AppResult<CalculationResult> {
        input.validate()?;
        let spec = MaterialSpec::from_value(&input.material)?;

        let result = Calculator::new(&self.data).calculate_carbon(
            &input.item_id,
            &spec,
            &input.location_id,
        )?;

        tracing::debug!(
            item = %input.item_id,
            location = %input.location_id,
            material = %result.inputs.material,
            manufacturing = result.manufacturing,
            "Calculated footprint"
        );
        Ok(result)
    }

    /// Calculation with equivalents of the manufacturing figure
    pub fn report(&self, input: &CalculateInput) -> AppResult<CalculationReport> {
        let result = self.calculate(input)?;
        let equivalents = get_equivalents(result.manufacturing);
        let impact = ImpactLevel::from_co2(result.manufacturing).into();
        Ok(CalculationReport {
            result,
            equivalents,
            impact,
        })
    }

    /// Pre-flight check; problems are reported in the result, never as errors
    pub fn validate(&self, input: &CalculateInput) -> ValidationResult {
        let result =
            validate_raw_inputs(&self.data, &input.item_id, &input.material, &input.location_id);
        if !result.valid {
            tracing::debug!(errors = ?result.errors, "Inputs failed validation");
        }
        result
    }

    pub fn equivalents(&self, co2_kg: f64) -> AppResult<Equivalents> {
        if !co2_kg.is_finite() {
            return Err(AppError::Validation {
                field: "co2Kg".to_string(),
                message: "co2Kg must be a finite number".to_string(),
            });
        }
        Ok(get_equivalents(co2_kg))
    }

    pub fn compare(&self, input: &CompareInput) -> AppResult<ComparisonReport> {
        input.validate()?;
        let first = self.calculate(&input.first)?;
        let second = self.calculate(&input.second)?;
        let comparison = shared::compare_calculations(&first, &second);

        tracing::info!(summary = %comparison.summary, "Compared calculations");
        Ok(ComparisonReport {
            first,
            second,
            comparison,
        })
    }

    pub fn recommend(&self, input: &CalculateInput) -> AppResult<RecommendationReport> {
        let result = self.calculate(input)?;
        let recommendations = shared::recommendations(&self.data, &result);
        Ok(RecommendationReport {
            result,
            recommendations,
        })
    }

    pub fn catalog(&self) -> Catalog {
        Catalog {
            data: self.data.as_ref().clone(),
            categories: self.data.material_categories(),
        }
    }

    /// Materials offered for an item
    pub fn materials_for_item(&self, item_id: &str) -> AppResult<Vec<Material>> {
        if self.data.item(item_id).is_none() {
            return Err(AppError::NotFound(format!("Item '{}'", item_id)));
        }
        Ok(self
            .data
            .materials_for_item(item_id)
            .into_iter()
            .cloned()
            .collect())
    }
}
