//! Common types used across the calculator

use serde::{Deserialize, Serialize};

/// Lower and upper bound of an estimate, in kg CO2e
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Scale a central value by the low/high uncertainty factors
    pub fn around(value: f64, low: f64, high: f64) -> Self {
        Self {
            min: value * low,
            max: value * high,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub(crate) fn rounded(self, decimals: i32) -> Self {
        Self {
            min: round_to(self.min, decimals),
            max: round_to(self.max, decimals),
        }
    }
}

/// Round half up to a fixed number of decimal places.
///
/// Halves always move towards positive infinity, so `-2.5` rounds to `-2`
/// and `2.5` to `3`. Display code relies on this matching the browser's
/// `Math.round` so both sides show the same figures.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_one_decimal() {
        assert_eq!(round_to(7.1625, 1), 7.2);
        assert_eq!(round_to(3.06, 1), 3.1);
        assert_eq!(round_to(7.5, 1), 7.5);
        assert_eq!(round_to(0.04, 1), 0.0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -2.0);
        assert_eq!(round_to(0.125, 2), 0.13);
    }

    #[test]
    fn test_round_to_three_decimals() {
        assert_eq!(round_to(0.955, 3), 0.955);
        assert_eq!(round_to(1.08351, 3), 1.084);
    }

    #[test]
    fn test_value_range_around() {
        let range = ValueRange::around(10.0, 0.85, 1.15);
        assert!((range.min - 8.5).abs() < 1e-9);
        assert!((range.max - 11.5).abs() < 1e-9);
        assert!(range.contains(10.0));
        assert!(!range.contains(12.0));
    }
}
