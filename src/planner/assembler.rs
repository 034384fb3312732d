use std::cmp::Ordering;
use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::catalog::CandidatePool;
use crate::config::PlannerConfig;
use crate::error::{PlanError, Result};
use crate::models::constraints::clamp_meals_per_day;
use crate::models::{DayPlan, MealRecord, MealSlot, PlannedMeal, WeekPlan, Weekday};
use crate::planner::constants::slot_order;

/// Calorie range around the per-meal target that counts as a good fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptanceBand {
    pub low: f64,
    pub high: f64,
}

impl AcceptanceBand {
    pub fn around(per_meal_target: f64, config: &PlannerConfig) -> Self {
        Self {
            low: per_meal_target * config.band_low,
            high: per_meal_target * config.band_high,
        }
    }

    #[inline]
    pub fn contains(&self, calories: f64) -> bool {
        calories >= self.low && calories <= self.high
    }
}

/// How often each meal id has been picked in the current run.
#[derive(Debug, Default)]
pub struct UsageCounter<'a> {
    counts: HashMap<&'a str, u32>,
}

impl<'a> UsageCounter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, id: &str) -> u32 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    pub fn record(&mut self, meal: &'a MealRecord) {
        *self.counts.entry(meal.id.as_str()).or_insert(0) += 1;
    }
}

/// Candidate meal with its ranking inputs.
#[derive(Debug)]
struct Candidate<'a> {
    meal: &'a MealRecord,
    favorite: bool,
    distance: f64,
}

/// Favorites first, then closest to the per-meal target.
fn compare_candidates(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.favorite
        .cmp(&a.favorite)
        .then_with(|| a.distance.total_cmp(&b.distance))
}

/// Fills seven days of meal slots from a candidate pool.
#[derive(Debug, Clone, Default)]
pub struct WeekAssembler {
    config: PlannerConfig,
    favorites: Vec<String>,
}

impl WeekAssembler {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            favorites: Vec::new(),
        }
    }

    /// Favorite ingredients that outrank calorie fit when ranking.
    pub fn with_favorites(mut self, favorites: &[String]) -> Self {
        self.favorites = favorites
            .iter()
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty())
            .collect();
        self
    }

    /// Build a week plan.
    ///
    /// Total over any non-empty pool with a positive target: every day gets
    /// exactly one meal per slot.
    pub fn assemble<'a>(
        &self,
        pool: &CandidatePool<'a>,
        target_calories: f64,
        meals_per_day: u8,
    ) -> Result<WeekPlan<'a>> {
        if pool.is_empty() {
            return Err(PlanError::InsufficientMeals);
        }
        if !target_calories.is_finite() || target_calories <= 0.0 {
            return Err(PlanError::InvalidInput(format!(
                "target calories must be positive, got {}",
                target_calories
            )));
        }

        let clamped = clamp_meals_per_day(meals_per_day);
        if clamped != meals_per_day {
            debug!(requested = meals_per_day, used = clamped, "clamped meals per day");
        }

        let per_meal_target = target_calories / clamped as f64;
        let band = AcceptanceBand::around(per_meal_target, &self.config);
        let ordered = self.tie_break_order(pool.meals());
        let slots = slot_order(clamped);
        let mut usage = UsageCounter::new();

        let mut days = Vec::with_capacity(Weekday::ALL.len());
        for weekday in Weekday::ALL {
            let mut meals = Vec::with_capacity(slots.len());
            for &slot in slots {
                let meal = self
                    .pick(&ordered, slot, band, per_meal_target, &usage)
                    .ok_or(PlanError::InsufficientMeals)?;
                usage.record(meal);
                meals.push(PlannedMeal { slot, meal });
            }
            let day = DayPlan::new(weekday, meals);
            debug!(day = %weekday, total = day.total_calories, "day planned");
            days.push(day);
        }

        let week = WeekPlan::new(days);
        info!(
            target = target_calories,
            meals_per_day = clamped,
            pool = pool.len(),
            distinct = week.usage_counts().len(),
            "week plan assembled"
        );
        Ok(week)
    }

    /// Pool order used to break exact ranking ties.
    fn tie_break_order<'a>(&self, meals: &[&'a MealRecord]) -> Vec<&'a MealRecord> {
        let mut ordered = meals.to_vec();
        if let Some(seed) = self.config.tie_break_seed {
            let mut rng = StdRng::seed_from_u64(seed);
            ordered.shuffle(&mut rng);
        }
        ordered
    }

    fn is_favorite(&self, meal: &MealRecord) -> bool {
        self.favorites.iter().any(|f| meal.contains_ingredient(f))
    }

    /// Choose one meal for `slot`.
    ///
    /// Each restriction falls back to its input when it would leave nothing,
    /// so a non-empty pool always yields a meal.
    fn pick<'a>(
        &self,
        pool: &[&'a MealRecord],
        slot: MealSlot,
        band: AcceptanceBand,
        per_meal_target: f64,
        usage: &UsageCounter<'a>,
    ) -> Option<&'a MealRecord> {
        let mut slot_meals: Vec<&'a MealRecord> =
            pool.iter().copied().filter(|m| m.slot == slot).collect();
        if slot_meals.is_empty() {
            debug!(slot = %slot, "no meals tagged for slot; using whole pool");
            slot_meals = pool.to_vec();
        }

        let in_band: Vec<&'a MealRecord> = slot_meals
            .iter()
            .copied()
            .filter(|m| band.contains(m.calories))
            .collect();
        let banded = if in_band.is_empty() {
            debug!(slot = %slot, low = band.low, high = band.high, "no meal inside calorie band");
            slot_meals
        } else {
            in_band
        };

        let under_cap: Vec<&'a MealRecord> = banded
            .iter()
            .copied()
            .filter(|m| usage.count(&m.id) < self.config.repetition_cap)
            .collect();
        let eligible = if under_cap.is_empty() {
            debug!(slot = %slot, "repetition cap lifted");
            banded
        } else {
            under_cap
        };

        let mut candidates: Vec<Candidate<'a>> = eligible
            .into_iter()
            .map(|meal| Candidate {
                meal,
                favorite: self.is_favorite(meal),
                distance: (meal.calories - per_meal_target).abs(),
            })
            .collect();

        // Stable: equal candidates keep tie-break order.
        candidates.sort_by(compare_candidates);
        candidates.first().map(|c| c.meal)
    }
}

/// Assemble with the default configuration and no favorites.
pub fn assemble<'a>(
    pool: &CandidatePool<'a>,
    target_calories: f64,
    meals_per_day: u8,
) -> Result<WeekPlan<'a>> {
    WeekAssembler::default().assemble(pool, target_calories, meals_per_day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, Unit};

    fn meal(id: &str, slot: MealSlot, kcal: f64) -> MealRecord {
        // Pure protein keeps the calorie arithmetic exact.
        MealRecord::new(id, id, slot, kcal / 4.0, 0.0, 0.0)
    }

    #[test]
    fn test_band_bounds_inclusive() {
        let band = AcceptanceBand::around(700.0, &PlannerConfig::default());
        assert_eq!(band.low, 525.0);
        assert_eq!(band.high, 875.0);
        assert!(band.contains(525.0));
        assert!(band.contains(875.0));
        assert!(!band.contains(876.0));
    }

    #[test]
    fn test_usage_counter() {
        let a = meal("a", MealSlot::Lunch, 400.0);
        let mut usage = UsageCounter::new();
        assert_eq!(usage.count("a"), 0);
        usage.record(&a);
        usage.record(&a);
        assert_eq!(usage.count("a"), 2);
    }

    #[test]
    fn test_pick_prefers_closest_then_pool_order() {
        let a = meal("a", MealSlot::Lunch, 600.0);
        let b = meal("b", MealSlot::Lunch, 800.0);
        let c = meal("c", MealSlot::Lunch, 700.0);
        let d = meal("d", MealSlot::Lunch, 700.0);
        let pool = vec![&a, &b, &c, &d];
        let assembler = WeekAssembler::default();
        let band = AcceptanceBand::around(700.0, &PlannerConfig::default());

        let chosen = assembler
            .pick(&pool, MealSlot::Lunch, band, 700.0, &UsageCounter::new())
            .unwrap();
        assert_eq!(chosen.id, "c");
    }

    #[test]
    fn test_pick_skips_capped_meal() {
        let c = meal("c", MealSlot::Lunch, 700.0);
        let d = meal("d", MealSlot::Lunch, 650.0);
        let pool = vec![&c, &d];
        let assembler = WeekAssembler::default();
        let band = AcceptanceBand::around(700.0, &PlannerConfig::default());

        let mut usage = UsageCounter::new();
        usage.record(&c);
        usage.record(&c);
        let chosen = assembler
            .pick(&pool, MealSlot::Lunch, band, 700.0, &usage)
            .unwrap();
        assert_eq!(chosen.id, "d");
    }

    #[test]
    fn test_favorite_outranks_distance() {
        let close = meal("close", MealSlot::Dinner, 700.0);
        let fav = meal("fav", MealSlot::Dinner, 600.0)
            .with_ingredients(vec![Ingredient::new("Chicken thigh", 150.0, Unit::G)]);
        let pool = vec![&close, &fav];
        let assembler = WeekAssembler::default().with_favorites(&["Chicken".to_string()]);
        let band = AcceptanceBand::around(700.0, &PlannerConfig::default());

        let chosen = assembler
            .pick(&pool, MealSlot::Dinner, band, 700.0, &UsageCounter::new())
            .unwrap();
        assert_eq!(chosen.id, "fav");
    }

    #[test]
    fn test_rejects_empty_pool_and_bad_target() {
        let a = meal("a", MealSlot::Lunch, 500.0);
        let empty = CandidatePool::from_meals(Vec::new());
        assert!(matches!(
            assemble(&empty, 2000.0, 3),
            Err(PlanError::InsufficientMeals)
        ));

        let pool = CandidatePool::from_meals(vec![&a]);
        assert!(matches!(
            assemble(&pool, 0.0, 3),
            Err(PlanError::InvalidInput(_))
        ));
        assert!(matches!(
            assemble(&pool, f64::NAN, 3),
            Err(PlanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_seeded_tie_break_is_reproducible() {
        let meals: Vec<MealRecord> = (0..6)
            .map(|i| meal(&format!("m{}", i), MealSlot::Lunch, 700.0))
            .collect();
        let refs: Vec<&MealRecord> = meals.iter().collect();
        let config = PlannerConfig {
            tie_break_seed: Some(42),
            ..Default::default()
        };
        let assembler = WeekAssembler::new(config);

        let first = assembler.tie_break_order(&refs);
        let second = assembler.tie_break_order(&refs);
        assert_eq!(first, second);
        assert_eq!(first.len(), refs.len());
    }
}
