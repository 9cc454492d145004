//! Business logic services for the Garment Carbon Calculator

pub mod calculator;

pub use calculator::CalculatorService;
