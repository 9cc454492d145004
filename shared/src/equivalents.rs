//! Everyday equivalents of a CO2 quantity

use serde::{Deserialize, Serialize};

use crate::types::round_to;

/// Average car, ~0.4 kg CO2 per mile
pub const MILES_PER_KG: f64 = 2.5;
/// ~0.0082 kg CO2 per smartphone charge
pub const CHARGES_PER_KG: f64 = 122.0;
/// CO2 a mature tree absorbs in a year
pub const KG_PER_TREE_YEAR: f64 = 21.77;
pub const KG_PER_FLIGHT_HOUR: f64 = 90.0;
/// ~55 g CO2 per hour of video streaming
pub const KG_PER_STREAMING_HOUR: f64 = 0.055;

/// One comparison, e.g. "Driving 19 miles in an average car"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Equivalent {
    pub value: f64,
    pub unit: String,
    pub description: String,
}

impl Equivalent {
    fn new(value: f64, unit: &str, description: String) -> Self {
        Self {
            value,
            unit: unit.to_string(),
            description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Equivalents {
    pub driving: Equivalent,
    pub phone_charging: Equivalent,
    pub trees: Equivalent,
    pub flights: Equivalent,
    pub streaming: Equivalent,
}

/// Convert kg CO2e into everyday activities.
///
/// Any finite input is accepted; negative quantities give negative
/// equivalents.
pub fn get_equivalents(co2_kg: f64) -> Equivalents {
    let miles = round_to(co2_kg * MILES_PER_KG, 0);
    let charges = round_to(co2_kg * CHARGES_PER_KG, 0);
    let trees = round_to(co2_kg / KG_PER_TREE_YEAR, 1);
    let flight_hours = round_to(co2_kg / KG_PER_FLIGHT_HOUR, 2);
    let streaming_hours = round_to(co2_kg / KG_PER_STREAMING_HOUR, 0);

    Equivalents {
        driving: Equivalent::new(
            miles,
            "miles",
            format!("Driving {} miles in an average car", miles),
        ),
        phone_charging: Equivalent::new(
            charges,
            "charges",
            format!("Charging your smartphone {} times", charges),
        ),
        trees: Equivalent::new(
            trees,
            "tree-years",
            format!("CO2 absorbed by {} trees in one year", trees),
        ),
        flights: Equivalent::new(
            flight_hours,
            "flight hours",
            format!("{} hours of flight time", flight_hours),
        ),
        streaming: Equivalent::new(
            streaming_hours,
            "hours",
            format!("Streaming video for {} hours", streaming_hours),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tshirt_equivalents() {
        let eq = get_equivalents(7.5);
        assert_eq!(eq.driving.value, 19.0);
        assert_eq!(eq.phone_charging.value, 915.0);
        assert_eq!(eq.trees.value, 0.3);
        assert_eq!(eq.flights.value, 0.08);
        assert_eq!(eq.streaming.value, 136.0);
    }

    #[test]
    fn test_units_and_descriptions() {
        let eq = get_equivalents(48.5);
        assert_eq!(eq.driving.unit, "miles");
        assert_eq!(eq.driving.description, "Driving 121 miles in an average car");
        assert_eq!(eq.phone_charging.description, "Charging your smartphone 5917 times");
        assert_eq!(eq.trees.unit, "tree-years");
        assert_eq!(eq.trees.description, "CO2 absorbed by 2.2 trees in one year");
        assert_eq!(eq.flights.unit, "flight hours");
        assert_eq!(eq.flights.description, "0.54 hours of flight time");
        assert_eq!(eq.streaming.description, "Streaming video for 882 hours");
    }

    #[test]
    fn test_zero() {
        let eq = get_equivalents(0.0);
        assert_eq!(eq.driving.value, 0.0);
        assert_eq!(eq.phone_charging.value, 0.0);
        assert_eq!(eq.trees.value, 0.0);
        assert_eq!(eq.flights.value, 0.0);
        assert_eq!(eq.streaming.value, 0.0);
    }

    #[test]
    fn test_negative_passes_through() {
        let eq = get_equivalents(-3.2);
        assert_eq!(eq.driving.value, -8.0);
        assert_eq!(eq.phone_charging.value, -390.0);
        assert_eq!(eq.trees.value, -0.1);
        assert_eq!(eq.flights.value, -0.04);
        assert_eq!(eq.streaming.value, -58.0);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(get_equivalents(1.0)).unwrap();
        assert!(json.get("phoneCharging").is_some());
        assert_eq!(json["driving"]["value"], 3.0);
    }
}
