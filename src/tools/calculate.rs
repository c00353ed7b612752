//! Calculation tool logic
//!
//! Glue between raw form values and the engine: parses and validates the
//! submission, runs the pure calculation, and shapes the payloads the
//! results view consumes.

use serde::Serialize;

use crate::engine::{self, UnitSystem};
use crate::models::{
    ActivityCalories, ActivityLevel, CalculatorInput, CalorieResults, CalorieTargets, Gender,
    MacroPreset, MacroSplit, TargetCard, ValidationError,
};

/// Raw form submission, one field per form input
#[derive(Debug, Clone)]
pub struct FormSubmission<'a> {
    pub unit_system: &'a str,
    pub age: f64,
    pub gender: &'a str,
    pub weight: f64,
    pub height: f64,
    pub activity_level: &'a str,
}

/// Parse a raw submission into a validated input record
///
/// Enum fields are parsed first (closed sets), then the numeric range
/// rules run. The first failing field's inline message is returned and
/// the engine is never reached.
pub fn parse_submission(form: &FormSubmission) -> Result<CalculatorInput, ValidationError> {
    let input = CalculatorInput {
        unit_system: UnitSystem::parse(form.unit_system)?,
        age: form.age,
        gender: Gender::parse(form.gender)?,
        weight: form.weight,
        height: form.height,
        activity_level: ActivityLevel::parse(form.activity_level)?,
    };
    input.validate()?;
    Ok(input)
}

/// Validate a submission and run the engine
pub fn submit(
    form: &FormSubmission,
    preset: MacroPreset,
) -> Result<CalorieResults, ValidationError> {
    let input = parse_submission(form)?;
    Ok(engine::calculate(&input, preset))
}

/// The four weight loss/gain cards from the results view
pub fn target_cards(targets: &CalorieTargets) -> Vec<TargetCard> {
    vec![
        TargetCard {
            label: "Weight Loss",
            rate: "0.5 kg/week",
            calories: targets.moderate_loss,
        },
        TargetCard {
            label: "Mild Weight Loss",
            rate: "0.25 kg/week",
            calories: targets.mild_loss,
        },
        TargetCard {
            label: "Mild Weight Gain",
            rate: "0.25 kg/week",
            calories: targets.mild_gain,
        },
        TargetCard {
            label: "Weight Gain",
            rate: "0.5 kg/week",
            calories: targets.moderate_gain,
        },
    ]
}

/// Full results payload for the results view
#[derive(Debug, Serialize)]
pub struct ResultsView {
    pub bmr: i64,
    pub tdee: i64,
    pub weekly_calories: i64,
    pub targets: CalorieTargets,
    pub target_cards: Vec<TargetCard>,
    pub activity_breakdown: Vec<ActivityCalories>,
    pub macro_preset: MacroPreset,
    pub macro_preset_label: &'static str,
    pub macros: MacroSplit,
}

/// Shape a result record into the results view payload
pub fn build_results_view(results: &CalorieResults) -> ResultsView {
    ResultsView {
        bmr: results.bmr,
        tdee: results.tdee,
        weekly_calories: results.weekly_calories,
        targets: results.targets,
        target_cards: target_cards(&results.targets),
        activity_breakdown: results.activity_breakdown.clone(),
        macro_preset: results.macro_preset,
        macro_preset_label: results.macro_preset.label(),
        macros: results.macros,
    }
}

/// Form defaults restored on reset
#[derive(Debug, Serialize)]
pub struct FormDefaults {
    pub unit_system: UnitSystem,
    pub gender: Gender,
    pub activity_level: &'static str,
    pub macro_preset: MacroPreset,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            gender: Gender::Male,
            activity_level: "1.2",
            macro_preset: MacroPreset::Moderate,
        }
    }
}

/// Response for the reset tool
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
    pub defaults: FormDefaults,
}

/// Response for the set_macro_preset tool
#[derive(Debug, Serialize)]
pub struct PresetResponse {
    pub success: bool,
    pub macro_preset: MacroPreset,
    pub macro_preset_label: &'static str,
    /// Recomputed macros, present when a TDEE already exists
    pub macros: Option<MacroSplit>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric_form() -> FormSubmission<'static> {
        FormSubmission {
            unit_system: "metric",
            age: 25.0,
            gender: "male",
            weight: 70.0,
            height: 175.0,
            activity_level: "1.2",
        }
    }

    #[test]
    fn test_submit_reference_scenario() {
        let results = submit(&metric_form(), MacroPreset::Moderate).unwrap();
        assert_eq!(results.bmr, 1674);
        assert_eq!(results.tdee, 2009);
    }

    #[test]
    fn test_submit_blocks_invalid_age() {
        let mut form = metric_form();
        form.age = 14.0;
        assert_eq!(
            submit(&form, MacroPreset::Moderate).unwrap_err(),
            ValidationError::AgeTooLow
        );
    }

    #[test]
    fn test_submit_blocks_unknown_enum() {
        let mut form = metric_form();
        form.activity_level = "1.1";
        assert!(matches!(
            submit(&form, MacroPreset::Moderate),
            Err(ValidationError::UnknownActivityLevel(_))
        ));
    }

    #[test]
    fn test_target_cards_order_and_values() {
        let results = submit(&metric_form(), MacroPreset::Moderate).unwrap();
        let cards = target_cards(&results.targets);
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].label, "Weight Loss");
        assert_eq!(cards[0].calories, 1509);
        assert_eq!(cards[1].calories, 1759);
        assert_eq!(cards[2].calories, 2259);
        assert_eq!(cards[3].calories, 2509);
    }

    #[test]
    fn test_results_view_mirrors_results() {
        let results = submit(&metric_form(), MacroPreset::Low).unwrap();
        let view = build_results_view(&results);
        assert_eq!(view.bmr, results.bmr);
        assert_eq!(view.tdee, results.tdee);
        assert_eq!(view.weekly_calories, results.tdee * 7);
        assert_eq!(view.macro_preset_label, "Lower Carb");
        assert_eq!(view.activity_breakdown.len(), 5);
    }
}
