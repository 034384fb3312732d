#[macro_use]
extern crate assert_float_eq;

use meal_plan_maker_rs::catalog::Catalog;
use meal_plan_maker_rs::config::PlannerConfig;
use meal_plan_maker_rs::error::PlanError;
use meal_plan_maker_rs::models::meal::{KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN};
use meal_plan_maker_rs::nutrition::{
    calculate_all, macros_for_calories, manual_targets, Activity, Biometrics, Goal, Sex,
    TrainerTargets,
};
use meal_plan_maker_rs::planner::{build_plan, PlanRequest, TargetRequest};

fn athlete() -> Biometrics {
    Biometrics {
        sex: Sex::Female,
        age: 28,
        height_cm: 168.0,
        weight_kg: 62.0,
        activity: Activity::Athlete,
        goal: Goal::Gain,
    }
}

#[test]
fn test_calculated_targets_chain() {
    let targets = calculate_all(&athlete()).unwrap();

    // 620 + 1050 - 140 - 161
    assert_float_absolute_eq!(targets.bmr.unwrap(), 1369.0, 1e-9);
    assert_float_absolute_eq!(targets.tdee.unwrap(), 2601.0, 1e-9);
    assert_float_absolute_eq!(targets.target_calories, 2861.0, 1e-9);
    assert_float_absolute_eq!(targets.protein_g, 124.0, 1e-9);
}

#[test]
fn test_macros_cover_calories() {
    let (protein, fat, carbs) = macros_for_calories(2500.0, 70.0, Goal::Maintain);
    let total = protein * 4.0 + fat * 9.0 + carbs * 4.0;
    // Each macro is rounded on its own.
    assert_float_absolute_eq!(total, 2500.0, 10.0);
}

#[test]
fn test_trainer_per_kg_ratios() {
    let trainer = TrainerTargets {
        protein_per_kg: Some(2.0),
        fat_per_kg: Some(1.0),
        weight_kg: Some(90.0),
        ..TrainerTargets::new(3000.0)
    };
    let targets = manual_targets(&trainer).unwrap();

    assert_float_absolute_eq!(targets.protein_g, 180.0, 1e-9);
    assert_float_absolute_eq!(targets.fat_g, 90.0, 1e-9);
    let expected_carbs =
        ((3000.0 - 180.0 * KCAL_PER_GRAM_PROTEIN - 90.0 * KCAL_PER_GRAM_FAT) / 4.0_f64).round();
    assert_float_absolute_eq!(targets.carbs_g, expected_carbs, 1e-9);
}

#[test]
fn test_plan_from_biometrics() {
    let catalog = Catalog::builtin().unwrap();
    let request = PlanRequest::new(TargetRequest::Biometrics(Biometrics {
        goal: Goal::Lose,
        activity: Activity::Sedentary,
        ..athlete()
    }));

    let report = build_plan(&catalog, &request, &PlannerConfig::default()).unwrap();

    assert!(report.targets.bmr.is_some());
    assert_eq!(report.week.days.len(), 7);
}

#[test]
fn test_out_of_range_biometrics_are_user_errors() {
    let catalog = Catalog::builtin().unwrap();
    let request = PlanRequest::new(TargetRequest::Biometrics(Biometrics {
        weight_kg: 20.0,
        ..athlete()
    }));

    let err = build_plan(&catalog, &request, &PlannerConfig::default()).unwrap_err();
    assert!(matches!(err, PlanError::InvalidInput(_)));
    assert!(err.is_user_correctable());
}
