//! Data models
//!
//! Input record, validation rules, and derived result structures.

mod profile;
mod results;

pub use profile::{
    ActivityLevel, CalculatorInput, Gender, MacroPreset, ValidationError, MAX_AGE, MIN_AGE,
};
pub use results::{
    ActivityCalories, CalorieResults, CalorieTargets, MacroSplit, TargetCard, MILD_OFFSET,
    MODERATE_OFFSET,
};
