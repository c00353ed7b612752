//! Calculator input model
//!
//! The validated body-metrics record the calculation engine consumes,
//! plus field-level validation matching the input form rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum age accepted by the form
pub const MIN_AGE: f64 = 15.0;
/// Maximum age accepted by the form
pub const MAX_AGE: f64 = 80.0;

/// Field-level validation errors, surfaced as inline messages
///
/// Detected before the engine runs; the engine itself has no failure modes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid age")]
    InvalidAge,

    #[error("Age must be at least 15")]
    AgeTooLow,

    #[error("Age must be at most 80")]
    AgeTooHigh,

    #[error("Please enter a valid weight")]
    InvalidWeight,

    #[error("Weight must be > 0")]
    NonPositiveWeight,

    #[error("Please enter a valid height")]
    InvalidHeight,

    #[error("Height must be > 0")]
    NonPositiveHeight,

    #[error("Unknown unit system: {0} (expected metric or imperial)")]
    UnknownUnitSystem(String),

    #[error("Unknown gender: {0} (expected male or female)")]
    UnknownGender(String),

    #[error("Unknown activity level: {0} (expected 1.2, 1.375, 1.55, 1.725, or 1.9)")]
    UnknownActivityLevel(String),

    #[error("Unknown macro preset: {0} (expected moderate, low, or high)")]
    UnknownMacroPreset(String),
}

/// Gender for the BMR formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse from a form value
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.to_lowercase().trim() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(ValidationError::UnknownGender(other.to_string())),
        }
    }
}

/// Activity level, a closed set of TDEE multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Sedentary (office job) - 1.2
    Sedentary,
    /// Light Exercise (1-3 days/week) - 1.375
    LightExercise,
    /// Moderate Exercise (3-5 days/week) - 1.55
    ModerateExercise,
    /// Heavy Exercise (6-7 days/week) - 1.725
    HeavyExercise,
    /// Athlete (2x training per day) - 1.9
    Athlete,
}

impl ActivityLevel {
    /// All levels in ascending multiplier order
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightExercise,
        ActivityLevel::ModerateExercise,
        ActivityLevel::HeavyExercise,
        ActivityLevel::Athlete,
    ];

    /// The TDEE multiplier for this level
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightExercise => 1.375,
            ActivityLevel::ModerateExercise => 1.55,
            ActivityLevel::HeavyExercise => 1.725,
            ActivityLevel::Athlete => 1.9,
        }
    }

    /// Display label matching the form's option text
    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightExercise => "Light Exercise",
            ActivityLevel::ModerateExercise => "Moderate Exercise",
            ActivityLevel::HeavyExercise => "Heavy Exercise",
            ActivityLevel::Athlete => "Athlete",
        }
    }

    /// Parse from a form value: the multiplier string ("1.55") or a name
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.to_lowercase().trim() {
            "1.2" | "sedentary" => Ok(ActivityLevel::Sedentary),
            "1.375" | "light" | "light_exercise" => Ok(ActivityLevel::LightExercise),
            "1.55" | "moderate" | "moderate_exercise" => Ok(ActivityLevel::ModerateExercise),
            "1.725" | "heavy" | "heavy_exercise" => Ok(ActivityLevel::HeavyExercise),
            "1.9" | "athlete" => Ok(ActivityLevel::Athlete),
            other => Err(ValidationError::UnknownActivityLevel(other.to_string())),
        }
    }
}

/// Macronutrient ratio preset applied to TDEE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacroPreset {
    /// Moderate Carb: 30% protein, 35% fat, 35% carbs
    Moderate,
    /// Lower Carb: 40% protein, 40% fat, 20% carbs
    Low,
    /// Higher Carb: 30% protein, 20% fat, 50% carbs
    High,
}

impl MacroPreset {
    /// Calorie fractions as (protein, fat, carbs)
    pub fn fractions(&self) -> (f64, f64, f64) {
        match self {
            MacroPreset::Moderate => (0.30, 0.35, 0.35),
            MacroPreset::Low => (0.40, 0.40, 0.20),
            MacroPreset::High => (0.30, 0.20, 0.50),
        }
    }

    /// Display label matching the form's tab text
    pub fn label(&self) -> &'static str {
        match self {
            MacroPreset::Moderate => "Moderate Carb",
            MacroPreset::Low => "Lower Carb",
            MacroPreset::High => "Higher Carb",
        }
    }

    /// Parse from a form value
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.to_lowercase().trim() {
            "moderate" | "moderate_carb" => Ok(MacroPreset::Moderate),
            "low" | "lower" | "lower_carb" => Ok(MacroPreset::Low),
            "high" | "higher" | "higher_carb" => Ok(MacroPreset::High),
            other => Err(ValidationError::UnknownMacroPreset(other.to_string())),
        }
    }
}

impl Default for MacroPreset {
    fn default() -> Self {
        MacroPreset::Moderate
    }
}

/// Validated calculator input
///
/// Weight is kg when metric, lb when imperial; height is cm when metric,
/// inches when imperial. Unit normalization happens inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInput {
    pub unit_system: crate::engine::UnitSystem,
    pub age: f64,
    pub gender: Gender,
    pub weight: f64,
    pub height: f64,
    pub activity_level: ActivityLevel,
}

impl CalculatorInput {
    /// Check all field-level rules, returning the first inline message
    ///
    /// The enums are already closed by construction; only the numeric
    /// fields need range checks here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.age.is_finite() {
            return Err(ValidationError::InvalidAge);
        }
        if self.age < MIN_AGE {
            return Err(ValidationError::AgeTooLow);
        }
        if self.age > MAX_AGE {
            return Err(ValidationError::AgeTooHigh);
        }
        if !self.weight.is_finite() {
            return Err(ValidationError::InvalidWeight);
        }
        if self.weight <= 0.0 {
            return Err(ValidationError::NonPositiveWeight);
        }
        if !self.height.is_finite() {
            return Err(ValidationError::InvalidHeight);
        }
        if self.height <= 0.0 {
            return Err(ValidationError::NonPositiveHeight);
        }
        Ok(())
    }
}
