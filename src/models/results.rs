//! Derived result models
//!
//! Everything the engine produces for one computation: BMR, TDEE, calorie
//! targets, the activity breakdown table, and the macronutrient split.
//! Recomputed from scratch on every input change and replaced atomically.

use serde::{Deserialize, Serialize};

use super::profile::MacroPreset;

/// Fixed calorie offsets for the loss/gain targets
pub const MODERATE_OFFSET: i64 = 500;
pub const MILD_OFFSET: i64 = 250;

/// Daily calorie targets derived from TDEE by fixed offsets
///
/// Always ordered: moderate_loss < mild_loss < maintenance < mild_gain
/// < moderate_gain, with 250-calorie gaps. maintenance == tdee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalorieTargets {
    pub moderate_loss: i64,
    pub mild_loss: i64,
    pub maintenance: i64,
    pub mild_gain: i64,
    pub moderate_gain: i64,
}

impl CalorieTargets {
    /// Targets in ascending order, paired with their chart labels
    pub fn as_rows(&self) -> [(&'static str, i64); 5] {
        [
            ("Moderate Loss", self.moderate_loss),
            ("Mild Loss", self.mild_loss),
            ("Maintenance", self.maintenance),
            ("Mild Gain", self.mild_gain),
            ("Mod. Gain", self.moderate_gain),
        ]
    }
}

/// A weight loss/gain card for the results view
#[derive(Debug, Clone, Serialize)]
pub struct TargetCard {
    /// Card heading (e.g., "Mild Weight Loss")
    pub label: &'static str,
    /// Expected rate (e.g., "0.25 kg/week")
    pub rate: &'static str,
    /// Daily calories for this target
    pub calories: i64,
}

/// One row of the calorie breakdown by activity level table
#[derive(Debug, Clone, Serialize)]
pub struct ActivityCalories {
    pub label: &'static str,
    pub multiplier: f64,
    pub calories: i64,
}

/// Macronutrient split in grams for a given preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein: i64,
    pub fats: i64,
    pub carbs: i64,
}

/// Full derived result set for one computation
#[derive(Debug, Clone, Serialize)]
pub struct CalorieResults {
    /// Displayed BMR, rounded to the nearest calorie
    pub bmr: i64,
    /// Maintenance calories per day
    pub tdee: i64,
    /// Maintenance calories per week (tdee x 7)
    pub weekly_calories: i64,
    pub targets: CalorieTargets,
    /// BMR scaled by each of the five activity multipliers
    pub activity_breakdown: Vec<ActivityCalories>,
    /// Preset the macros below were computed with
    pub macro_preset: MacroPreset,
    pub macros: MacroSplit,
}
