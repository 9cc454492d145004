//! Shared carbon-footprint engine for the Garment Carbon Calculator
//!
//! This crate holds the reference data and the pure calculation pipeline
//! used by the backend API and, through WASM, by the browser.

pub mod blend;
pub mod calculator;
pub mod catalog;
pub mod equivalents;
pub mod error;
pub mod insights;
pub mod models;
pub mod types;
pub mod validation;

pub use blend::{custom_blend_multiplier, resolve_material, resolve_material_multiplier};
pub use calculator::{calculate_carbon, Calculator};
pub use catalog::{Constants, DatasetMeta, IntegrityIssue, MaterialGroup, ReferenceData};
pub use equivalents::{get_equivalents, Equivalent, Equivalents};
pub use error::{CalculationError, DataError};
pub use insights::*;
pub use models::*;
pub use types::*;
pub use validation::{validate_inputs, validate_raw_inputs, ValidationResult};
