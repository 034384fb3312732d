use std::fmt;
use std::ops::RangeInclusive;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::meal::{KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN};

// ─────────────────────────────────────────────────────────────────────────────
// Accepted input ranges
// ─────────────────────────────────────────────────────────────────────────────

pub const AGE_RANGE: RangeInclusive<u32> = 12..=100;
pub const HEIGHT_CM_RANGE: RangeInclusive<f64> = 120.0..=230.0;
pub const WEIGHT_KG_RANGE: RangeInclusive<f64> = 35.0..=300.0;
pub const TRAINER_CALORIES_RANGE: RangeInclusive<f64> = 1200.0..=5000.0;
pub const COOK_TIME_RANGE: RangeInclusive<u32> = 10..=90;
pub const MEALS_PER_DAY_RANGE: RangeInclusive<u8> = 3..=5;

// ─────────────────────────────────────────────────────────────────────────────
// Macro ratios
// ─────────────────────────────────────────────────────────────────────────────

/// Protein grams per kg body weight while cutting.
pub const PROTEIN_PER_KG_LOSE: f64 = 2.2;
/// Protein grams per kg body weight otherwise.
pub const PROTEIN_PER_KG_DEFAULT: f64 = 2.0;
/// Share of calories that comes from fat.
pub const FAT_CALORIE_SHARE: f64 = 0.25;

/// Trainer mode fallbacks when neither grams nor per-kg ratios are given.
pub const TRAINER_PROTEIN_PER_KG: f64 = 1.8;
pub const TRAINER_FAT_PER_KG: f64 = 0.8;
pub const TRAINER_DEFAULT_WEIGHT_KG: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Very,
    Athlete,
}

impl Activity {
    pub fn factor(self) -> f64 {
        match self {
            Activity::Sedentary => 1.2,
            Activity::Light => 1.375,
            Activity::Moderate => 1.55,
            Activity::Very => 1.725,
            Activity::Athlete => 1.9,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

impl Goal {
    /// Multiplier applied to TDEE.
    pub fn calorie_factor(self) -> f64 {
        match self {
            Goal::Lose => 0.85,
            Goal::Maintain => 1.0,
            Goal::Gain => 1.10,
        }
    }
}

/// Body data for the calculated targets path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Biometrics {
    pub sex: Sex,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default)]
    pub activity: Activity,
    #[serde(default)]
    pub goal: Goal,
}

impl Biometrics {
    pub fn validate(&self) -> Result<()> {
        check_range("age", self.age, &AGE_RANGE)?;
        check_range("height (cm)", self.height_cm, &HEIGHT_CM_RANGE)?;
        check_range("weight (kg)", self.weight_kg, &WEIGHT_KG_RANGE)?;
        Ok(())
    }
}

/// Explicit targets supplied by a trainer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerTargets {
    pub target_calories: f64,
    pub protein_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub protein_per_kg: Option<f64>,
    pub fat_per_kg: Option<f64>,
    pub weight_kg: Option<f64>,
}

impl TrainerTargets {
    pub fn new(target_calories: f64) -> Self {
        Self {
            target_calories,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_range(
            "target calories",
            self.target_calories,
            &TRAINER_CALORIES_RANGE,
        )?;
        if let Some(weight) = self.weight_kg {
            check_range("weight (kg)", weight, &WEIGHT_KG_RANGE)?;
        }
        let grams = [
            ("protein grams", self.protein_g),
            ("fat grams", self.fat_g),
            ("protein per kg", self.protein_per_kg),
            ("fat per kg", self.fat_per_kg),
        ];
        for (label, value) in grams {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(PlanError::InvalidInput(format!(
                        "{} must be a non-negative number, got {}",
                        label, v
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Daily calorie and macro targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroTargets {
    /// Absent for trainer-supplied targets.
    pub bmr: Option<f64>,
    pub tdee: Option<f64>,
    pub target_calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
}

/// Reject values outside an inclusive range as user input errors.
pub fn check_range<T>(label: &str, value: T, range: &RangeInclusive<T>) -> Result<()>
where
    T: PartialOrd + fmt::Display,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(PlanError::InvalidInput(format!(
            "{} must be between {} and {}, got {}",
            label,
            range.start(),
            range.end(),
            value
        )))
    }
}

/// Mifflin-St Jeor basal metabolic rate, rounded to whole kcal.
pub fn mifflin_st_jeor_bmr(sex: Sex, age: u32, height_cm: f64, weight_kg: f64) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64;
    let offset = match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    (base + offset).round()
}

pub fn tdee_from_bmr(bmr: f64, activity: Activity) -> f64 {
    (bmr * activity.factor()).round()
}

pub fn goal_calories(tdee: f64, goal: Goal) -> f64 {
    (tdee * goal.calorie_factor()).round()
}

/// Split a calorie target into protein, fat and carb grams.
///
/// Protein scales with body weight, fat takes a fixed calorie share and
/// carbs fill whatever is left (never below zero). Carbs are taken from the
/// rounded fat calories, not from the rounded fat grams.
pub fn macros_for_calories(calories: f64, weight_kg: f64, goal: Goal) -> (f64, f64, f64) {
    let per_kg = match goal {
        Goal::Lose => PROTEIN_PER_KG_LOSE,
        _ => PROTEIN_PER_KG_DEFAULT,
    };
    let protein = (weight_kg * per_kg).round();
    let fat_calories = (calories * FAT_CALORIE_SHARE).round();
    let fat = (fat_calories / KCAL_PER_GRAM_FAT).round();
    let remaining = calories - protein * KCAL_PER_GRAM_PROTEIN - fat_calories;
    let carbs = (remaining.max(0.0) / KCAL_PER_GRAM_CARBS).round();
    (protein, fat, carbs)
}

/// Full calculated path: BMR, TDEE, goal calories and macros.
pub fn calculate_all(bio: &Biometrics) -> Result<MacroTargets> {
    bio.validate()?;
    let bmr = mifflin_st_jeor_bmr(bio.sex, bio.age, bio.height_cm, bio.weight_kg);
    let tdee = tdee_from_bmr(bmr, bio.activity);
    let target = goal_calories(tdee, bio.goal);
    let (protein_g, fat_g, carbs_g) = macros_for_calories(target, bio.weight_kg, bio.goal);

    Ok(MacroTargets {
        bmr: Some(bmr),
        tdee: Some(tdee),
        target_calories: target,
        protein_g,
        fat_g,
        carbs_g,
    })
}

/// Trainer path: calories are taken as given, macros filled in from the
/// explicit grams, the per-kg ratios or the defaults, in that order.
pub fn manual_targets(trainer: &TrainerTargets) -> Result<MacroTargets> {
    trainer.validate()?;
    let weight = trainer.weight_kg.unwrap_or(TRAINER_DEFAULT_WEIGHT_KG);

    let protein = trainer
        .protein_g
        .or_else(|| trainer.protein_per_kg.map(|r| r * weight))
        .unwrap_or(TRAINER_PROTEIN_PER_KG * weight)
        .round();
    let fat = trainer
        .fat_g
        .or_else(|| trainer.fat_per_kg.map(|r| r * weight))
        .unwrap_or(TRAINER_FAT_PER_KG * weight)
        .round();

    let remaining =
        trainer.target_calories - protein * KCAL_PER_GRAM_PROTEIN - fat * KCAL_PER_GRAM_FAT;
    let carbs = (remaining / KCAL_PER_GRAM_CARBS).round().max(0.0);

    Ok(MacroTargets {
        bmr: None,
        tdee: None,
        target_calories: trainer.target_calories.round(),
        protein_g: protein,
        fat_g: fat,
        carbs_g: carbs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Biometrics {
        Biometrics {
            sex: Sex::Male,
            age: 30,
            height_cm: 180.0,
            weight_kg: 80.0,
            activity: Activity::Moderate,
            goal: Goal::Maintain,
        }
    }

    #[test]
    fn test_bmr_male_and_female() {
        // 800 + 1125 - 150 + 5
        assert_eq!(mifflin_st_jeor_bmr(Sex::Male, 30, 180.0, 80.0), 1780.0);
        // 600 + 1031.25 - 125 - 161 = 1345.25
        assert_eq!(mifflin_st_jeor_bmr(Sex::Female, 25, 165.0, 60.0), 1345.0);
    }

    #[test]
    fn test_calculate_all() {
        let targets = calculate_all(&sample()).unwrap();
        assert_eq!(targets.bmr, Some(1780.0));
        assert_eq!(targets.tdee, Some(2759.0));
        assert_eq!(targets.target_calories, 2759.0);
        assert_eq!(targets.protein_g, 160.0);
        assert_eq!(targets.fat_g, 77.0);
        // 2759 - 640 - 690 = 1429 -> 357.25
        assert_eq!(targets.carbs_g, 357.0);
    }

    #[test]
    fn test_goal_adjustments() {
        assert_eq!(goal_calories(2000.0, Goal::Lose), 1700.0);
        assert_eq!(goal_calories(2000.0, Goal::Gain), 2200.0);
        let (protein, _, _) = macros_for_calories(1700.0, 80.0, Goal::Lose);
        assert_eq!(protein, 176.0);
    }

    #[test]
    fn test_carbs_use_fat_calories() {
        // fat: 500 kcal -> 56 g, but carbs subtract the 500 kcal, not 56 * 9
        let (protein, fat, carbs) = macros_for_calories(2000.0, 80.0, Goal::Maintain);
        assert_eq!(protein, 160.0);
        assert_eq!(fat, 56.0);
        assert_eq!(carbs, 215.0);
    }

    #[test]
    fn test_carbs_never_negative() {
        let (_, _, carbs) = macros_for_calories(800.0, 200.0, Goal::Lose);
        assert_eq!(carbs, 0.0);
    }

    #[test]
    fn test_biometrics_out_of_range() {
        let mut bio = sample();
        bio.age = 8;
        assert!(matches!(bio.validate(), Err(PlanError::InvalidInput(_))));
        let mut bio = sample();
        bio.height_cm = 250.0;
        assert!(bio.validate().is_err());
    }

    #[test]
    fn test_manual_targets_defaults() {
        let targets = manual_targets(&TrainerTargets::new(2400.0)).unwrap();
        // 1.8 * 75 = 135, 0.8 * 75 = 60, (2400 - 540 - 540) / 4 = 330
        assert_eq!(targets.protein_g, 135.0);
        assert_eq!(targets.fat_g, 60.0);
        assert_eq!(targets.carbs_g, 330.0);
        assert!(targets.bmr.is_none());
    }

    #[test]
    fn test_manual_targets_explicit_grams_win() {
        let trainer = TrainerTargets {
            protein_g: Some(200.0),
            fat_g: Some(100.0),
            protein_per_kg: Some(1.0),
            ..TrainerTargets::new(1500.0)
        };
        let targets = manual_targets(&trainer).unwrap();
        assert_eq!(targets.protein_g, 200.0);
        // 1500 - 800 - 900 < 0
        assert_eq!(targets.carbs_g, 0.0);
    }

    #[test]
    fn test_manual_targets_range() {
        assert!(manual_targets(&TrainerTargets::new(900.0)).is_err());
        assert!(manual_targets(&TrainerTargets::new(5200.0)).is_err());
    }
}
