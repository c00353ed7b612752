//! Calorie calculation engine
//!
//! Pure functions mapping validated inputs to BMR, TDEE, calorie targets,
//! and macronutrient splits. The formula is Mifflin-St Jeor (1990):
//!
//! - male:   BMR = 10w + 6.25h - 5a + 5
//! - female: BMR = 10w + 6.25h - 5a - 161
//!
//! with w in kg, h in cm, a in years. No side effects, no failure modes
//! given validated input.

use crate::models::{
    ActivityCalories, ActivityLevel, CalculatorInput, CalorieResults, CalorieTargets, Gender,
    MacroPreset, MacroSplit, MILD_OFFSET, MODERATE_OFFSET,
};

use super::units::{to_centimeters, to_kilograms};

// Mifflin-St Jeor coefficients
const WEIGHT_MULTIPLIER: f64 = 10.0;
const HEIGHT_MULTIPLIER: f64 = 6.25;
const AGE_MULTIPLIER: f64 = 5.0;
const MALE_CONSTANT: f64 = 5.0;
const FEMALE_CONSTANT: f64 = -161.0;

// Energy density per gram
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;
const KCAL_PER_G_CARBS: f64 = 4.0;

/// Raw (unrounded) Basal Metabolic Rate in kcal/day
///
/// The unrounded value feeds the TDEE multiplication; only the displayed
/// BMR is rounded. Rounding before the multiply would compound error.
pub fn basal_metabolic_rate(gender: Gender, weight_kg: f64, height_cm: f64, age: f64) -> f64 {
    let gender_constant = match gender {
        Gender::Male => MALE_CONSTANT,
        Gender::Female => FEMALE_CONSTANT,
    };

    WEIGHT_MULTIPLIER * weight_kg + HEIGHT_MULTIPLIER * height_cm - AGE_MULTIPLIER * age
        + gender_constant
}

/// Calorie targets at fixed offsets from TDEE
pub fn calorie_targets(tdee: i64) -> CalorieTargets {
    CalorieTargets {
        moderate_loss: tdee - MODERATE_OFFSET,
        mild_loss: tdee - MILD_OFFSET,
        maintenance: tdee,
        mild_gain: tdee + MILD_OFFSET,
        moderate_gain: tdee + MODERATE_OFFSET,
    }
}

/// Macronutrient grams for a preset applied to TDEE
///
/// Grams = round(calories allocated / kcal per gram), protein and carbs at
/// 4 kcal/g, fat at 9 kcal/g. Depends only on TDEE and the preset.
pub fn macro_split(tdee: i64, preset: MacroPreset) -> MacroSplit {
    let calories = tdee as f64;
    let (protein_pct, fat_pct, carb_pct) = preset.fractions();

    MacroSplit {
        protein: (calories * protein_pct / KCAL_PER_G_PROTEIN).round() as i64,
        fats: (calories * fat_pct / KCAL_PER_G_FAT).round() as i64,
        carbs: (calories * carb_pct / KCAL_PER_G_CARBS).round() as i64,
    }
}

/// Calorie breakdown table: displayed BMR scaled by each activity multiplier
pub fn activity_breakdown(bmr: i64) -> Vec<ActivityCalories> {
    ActivityLevel::ALL
        .iter()
        .map(|level| ActivityCalories {
            label: level.label(),
            multiplier: level.multiplier(),
            calories: (bmr as f64 * level.multiplier()).round() as i64,
        })
        .collect()
}

/// Run the full calculation for a validated input record
///
/// Imperial weight/height are normalized to metric first. The entire
/// result record is rebuilt on every call; nothing is cached.
pub fn calculate(input: &CalculatorInput, preset: MacroPreset) -> CalorieResults {
    let weight_kg = to_kilograms(input.weight, input.unit_system);
    let height_cm = to_centimeters(input.height, input.unit_system);

    let bmr_raw = basal_metabolic_rate(input.gender, weight_kg, height_cm, input.age);
    let bmr = bmr_raw.round() as i64;

    // TDEE multiplies the unrounded BMR, then rounds
    let tdee = (bmr_raw * input.activity_level.multiplier()).round() as i64;

    CalorieResults {
        bmr,
        tdee,
        weekly_calories: tdee * 7,
        targets: calorie_targets(tdee),
        activity_breakdown: activity_breakdown(bmr),
        macro_preset: preset,
        macros: macro_split(tdee, preset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::UnitSystem;

    fn metric_male() -> CalculatorInput {
        CalculatorInput {
            unit_system: UnitSystem::Metric,
            age: 25.0,
            gender: Gender::Male,
            weight: 70.0,
            height: 175.0,
            activity_level: ActivityLevel::Sedentary,
        }
    }

    #[test]
    fn test_male_reference_scenario() {
        // 10*70 + 6.25*175 - 5*25 + 5 = 1673.75
        let bmr_raw = basal_metabolic_rate(Gender::Male, 70.0, 175.0, 25.0);
        assert!((bmr_raw - 1673.75).abs() < 1e-9);

        let results = calculate(&metric_male(), MacroPreset::Moderate);
        assert_eq!(results.bmr, 1674);
        assert_eq!(results.tdee, 2009);
        assert_eq!(results.weekly_calories, 2009 * 7);
    }

    #[test]
    fn test_male_reference_targets() {
        let results = calculate(&metric_male(), MacroPreset::Moderate);
        assert_eq!(results.targets.moderate_loss, 1509);
        assert_eq!(results.targets.mild_loss, 1759);
        assert_eq!(results.targets.maintenance, 2009);
        assert_eq!(results.targets.mild_gain, 2259);
        assert_eq!(results.targets.moderate_gain, 2509);
    }

    #[test]
    fn test_female_reference_scenario() {
        // 10*60 + 6.25*165 - 5*30 - 161 = 1320.25
        let bmr_raw = basal_metabolic_rate(Gender::Female, 60.0, 165.0, 30.0);
        assert!((bmr_raw - 1320.25).abs() < 1e-9);

        let input = CalculatorInput {
            unit_system: UnitSystem::Metric,
            age: 30.0,
            gender: Gender::Female,
            weight: 60.0,
            height: 165.0,
            activity_level: ActivityLevel::ModerateExercise,
        };
        let results = calculate(&input, MacroPreset::Moderate);
        assert_eq!(results.bmr, 1320);
        // round(1320.25 * 1.55) = round(2046.3875)
        assert_eq!(results.tdee, 2046);
    }

    #[test]
    fn test_tdee_uses_unrounded_bmr() {
        // Raw BMR 1673.75 rounds to 1674; 1673.75 * 1.9 = 3180.125 -> 3180,
        // while 1674 * 1.9 = 3180.6 -> 3181. The raw value must win.
        let input = CalculatorInput {
            activity_level: ActivityLevel::Athlete,
            ..metric_male()
        };
        let results = calculate(&input, MacroPreset::Moderate);
        assert_eq!(results.bmr, 1674);
        assert_eq!(results.tdee, 3180);
    }

    #[test]
    fn test_imperial_round_trip() {
        // 154.324 lb ~ 70 kg, 68.9 in ~ 175 cm: same as the metric male
        // scenario within rounding tolerance
        let imperial = CalculatorInput {
            unit_system: UnitSystem::Imperial,
            weight: 154.324,
            height: 68.9,
            ..metric_male()
        };
        let metric = calculate(&metric_male(), MacroPreset::Moderate);
        let converted = calculate(&imperial, MacroPreset::Moderate);
        assert!((metric.bmr - converted.bmr).abs() <= 1);
        assert!((metric.tdee - converted.tdee).abs() <= 1);
    }

    #[test]
    fn test_target_ordering_and_gaps() {
        for tdee in [1200, 2009, 2046, 3500] {
            let t = calorie_targets(tdee);
            assert!(t.moderate_loss < t.mild_loss);
            assert!(t.mild_loss < t.maintenance);
            assert!(t.maintenance < t.mild_gain);
            assert!(t.mild_gain < t.moderate_gain);
            assert_eq!(t.mild_loss - t.moderate_loss, 250);
            assert_eq!(t.maintenance - t.mild_loss, 250);
            assert_eq!(t.mild_gain - t.maintenance, 250);
            assert_eq!(t.moderate_gain - t.mild_gain, 250);
            assert_eq!(t.maintenance, tdee);
        }
    }

    #[test]
    fn test_macro_split_reference_values() {
        // TDEE 2009 moderate: 30/35/35
        let split = macro_split(2009, MacroPreset::Moderate);
        assert_eq!(split.protein, 151); // round(2009 * 0.30 / 4)
        assert_eq!(split.fats, 78); // round(2009 * 0.35 / 9)
        assert_eq!(split.carbs, 176); // round(2009 * 0.35 / 4)
    }

    #[test]
    fn test_macro_energy_invariant() {
        // 4p + 9f + 4c reconstructs TDEE up to per-gram rounding: each macro
        // rounds to the nearest gram, worst case (4 + 9 + 4) / 2 = 8.5 kcal
        for tdee in [1509, 2009, 2046, 2788, 3999] {
            for preset in [MacroPreset::Moderate, MacroPreset::Low, MacroPreset::High] {
                let split = macro_split(tdee, preset);
                let energy = 4 * split.protein + 9 * split.fats + 4 * split.carbs;
                assert!(
                    (energy - tdee).abs() <= 8,
                    "tdee={} preset={:?} energy={}",
                    tdee,
                    preset,
                    energy
                );
            }
        }
    }

    #[test]
    fn test_preset_switch_only_changes_macros() {
        let input = metric_male();
        let moderate = calculate(&input, MacroPreset::Moderate);
        let low = calculate(&input, MacroPreset::Low);

        assert_eq!(moderate.bmr, low.bmr);
        assert_eq!(moderate.tdee, low.tdee);
        assert_eq!(moderate.targets, low.targets);
        assert_ne!(moderate.macros, low.macros);

        // Lower carb shifts calories from carbs to protein and fat
        assert!(low.macros.protein > moderate.macros.protein);
        assert!(low.macros.carbs < moderate.macros.carbs);
    }

    #[test]
    fn test_activity_breakdown_rows() {
        let rows = activity_breakdown(1674);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].label, "Sedentary");
        assert_eq!(rows[0].calories, 2009); // round(1674 * 1.2)
        assert_eq!(rows[4].label, "Athlete");
        assert_eq!(rows[4].calories, 3181); // round(1674 * 1.9)
    }
}
