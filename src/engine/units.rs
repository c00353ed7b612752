//! Unit systems and conversion constants
//!
//! Imperial inputs are normalized to metric before the formula runs;
//! metric values pass through unchanged.

use serde::{Deserialize, Serialize};

use crate::models::ValidationError;

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;
/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Measurement system the form was filled in with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Weight in kg, height in cm
    Metric,
    /// Weight in lb, height in inches
    Imperial,
}

impl UnitSystem {
    /// Parse from a form value
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.to_lowercase().trim() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            other => Err(ValidationError::UnknownUnitSystem(other.to_string())),
        }
    }

    /// Display unit for weight inputs
    pub fn weight_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lb",
        }
    }

    /// Display unit for height inputs
    pub fn height_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "cm",
            UnitSystem::Imperial => "in",
        }
    }
}

impl Default for UnitSystem {
    fn default() -> Self {
        UnitSystem::Metric
    }
}

/// Convert a weight in this system's unit to kilograms
pub fn to_kilograms(weight: f64, system: UnitSystem) -> f64 {
    match system {
        UnitSystem::Metric => weight,
        UnitSystem::Imperial => weight * KG_PER_LB,
    }
}

/// Convert a height in this system's unit to centimeters
pub fn to_centimeters(height: f64, system: UnitSystem) -> f64 {
    match system {
        UnitSystem::Metric => height,
        UnitSystem::Imperial => height * CM_PER_INCH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit_system() {
        assert_eq!(UnitSystem::parse("metric"), Ok(UnitSystem::Metric));
        assert_eq!(UnitSystem::parse("Imperial"), Ok(UnitSystem::Imperial));
        assert!(UnitSystem::parse("nautical").is_err());
    }

    #[test]
    fn test_metric_passes_through() {
        assert_eq!(to_kilograms(70.0, UnitSystem::Metric), 70.0);
        assert_eq!(to_centimeters(175.0, UnitSystem::Metric), 175.0);
    }

    #[test]
    fn test_pounds_to_kilograms() {
        let kg = to_kilograms(154.324, UnitSystem::Imperial);
        assert!((kg - 70.0).abs() < 0.01);
    }

    #[test]
    fn test_inches_to_centimeters() {
        let cm = to_centimeters(68.9, UnitSystem::Imperial);
        assert!((cm - 175.006).abs() < 0.01);
    }

    #[test]
    fn test_display_units() {
        assert_eq!(UnitSystem::Metric.weight_unit(), "kg");
        assert_eq!(UnitSystem::Imperial.weight_unit(), "lb");
        assert_eq!(UnitSystem::Metric.height_unit(), "cm");
        assert_eq!(UnitSystem::Imperial.height_unit(), "in");
    }
}
