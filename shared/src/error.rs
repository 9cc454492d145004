//! Error types for reference data loading and carbon calculations

use thiserror::Error;

/// Reasons a calculation cannot be performed.
///
/// The engine stops at the first of these; the validator collects them all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error("Invalid item ID: {0}")]
    InvalidItem(String),

    #[error("Invalid location ID: {0}")]
    InvalidLocation(String),

    #[error("Invalid material ID: {0}")]
    InvalidMaterial(String),

    #[error("Invalid material in blend: {0}")]
    InvalidBlendComponent(String),

    #[error("Percentages must sum to 100% (current: {total}%)")]
    PercentageSum { total: f64 },

    #[error("Invalid percentage for {material} in blend: {percentage}% (must be between 0 and 100)")]
    InvalidPercentage { material: String, percentage: f64 },

    #[error("Invalid material format: {0}")]
    MalformedMaterialSpec(String),
}

impl CalculationError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            CalculationError::InvalidItem(_) => "INVALID_ITEM",
            CalculationError::InvalidLocation(_) => "INVALID_LOCATION",
            CalculationError::InvalidMaterial(_) => "INVALID_MATERIAL",
            CalculationError::InvalidBlendComponent(_) => "INVALID_BLEND_COMPONENT",
            CalculationError::PercentageSum { .. } => "PERCENTAGE_SUM",
            CalculationError::InvalidPercentage { .. } => "INVALID_PERCENTAGE",
            CalculationError::MalformedMaterialSpec(_) => "MALFORMED_MATERIAL_SPEC",
        }
    }

    /// Input field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            CalculationError::InvalidItem(_) => "itemId",
            CalculationError::InvalidLocation(_) => "locationId",
            _ => "material",
        }
    }
}

/// Failures while loading an alternate reference dataset
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read reference data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse reference data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_required_wording() {
        assert!(CalculationError::InvalidItem("hat".into())
            .to_string()
            .contains("Invalid item"));
        assert!(CalculationError::InvalidLocation("mars".into())
            .to_string()
            .contains("Invalid location"));
        assert!(CalculationError::InvalidMaterial("kevlar".into())
            .to_string()
            .contains("Invalid material"));
        assert!(CalculationError::InvalidBlendComponent("kevlar".into())
            .to_string()
            .contains("Invalid material in blend"));
    }

    #[test]
    fn test_percentage_sum_message() {
        let message = CalculationError::PercentageSum { total: 110.0 }.to_string();
        assert!(message.contains("100%"));
        assert!(message.contains("110"));

        let message = CalculationError::PercentageSum { total: 99.5 }.to_string();
        assert!(message.contains("99.5"));
    }

    #[test]
    fn test_codes_and_fields() {
        assert_eq!(CalculationError::InvalidItem("x".into()).code(), "INVALID_ITEM");
        assert_eq!(CalculationError::InvalidItem("x".into()).field(), "itemId");
        assert_eq!(CalculationError::InvalidLocation("x".into()).field(), "locationId");
        assert_eq!(
            CalculationError::PercentageSum { total: 0.0 }.field(),
            "material"
        );
    }
}
