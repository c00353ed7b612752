//! Calculation engine
//!
//! Pure BMR/TDEE/macro computation and unit normalization.

pub mod calculator;
pub mod units;

pub use calculator::{activity_breakdown, basal_metabolic_rate, calculate, calorie_targets, macro_split};
pub use units::{to_centimeters, to_kilograms, UnitSystem, CM_PER_INCH, KG_PER_LB};
