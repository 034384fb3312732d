use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::{filter_with_ladder, Catalog, RelaxationLevel};
use crate::config::PlannerConfig;
use crate::error::Result;
use crate::models::constraints::DEFAULT_COOK_TIME;
use crate::models::{Constraints, Diet, WeekPlan};
use crate::nutrition::calculator::{COOK_TIME_RANGE, MEALS_PER_DAY_RANGE};
use crate::nutrition::{
    calculate_all, check_range, manual_targets, Biometrics, MacroTargets, TrainerTargets,
};
use crate::planner::assembler::WeekAssembler;
use crate::planner::grocery::{aggregate, GroceryItem};

/// Where the daily calorie target comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetRequest {
    Biometrics(Biometrics),
    Trainer(TrainerTargets),
}

impl TargetRequest {
    pub fn resolve(&self) -> Result<MacroTargets> {
        match self {
            TargetRequest::Biometrics(bio) => calculate_all(bio),
            TargetRequest::Trainer(trainer) => manual_targets(trainer),
        }
    }
}

/// Everything a user asks for in one planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub targets: TargetRequest,
    pub meals_per_day: u8,
    pub diet: Diet,
    /// Raw allergen/dislike names; resolved against the vocabularies.
    pub exclusions: Vec<String>,
    pub cook_time: u32,
    pub cuisine_likes: Vec<String>,
    pub favorites: Vec<String>,
}

impl PlanRequest {
    pub fn new(targets: TargetRequest) -> Self {
        Self {
            targets,
            meals_per_day: 3,
            diet: Diet::None,
            exclusions: Vec::new(),
            cook_time: DEFAULT_COOK_TIME,
            cuisine_likes: Vec::new(),
            favorites: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_range("meals per day", self.meals_per_day, &MEALS_PER_DAY_RANGE)?;
        check_range("cook time (min)", self.cook_time, &COOK_TIME_RANGE)?;
        Ok(())
    }

    pub fn constraints(&self, target_calories: f64) -> Constraints {
        Constraints::new(target_calories, self.meals_per_day)
            .with_diet(self.diet)
            .with_exclusions(&self.exclusions)
            .with_cook_time(self.cook_time)
            .with_cuisine_likes(self.cuisine_likes.clone())
            .with_favorites(self.favorites.clone())
    }
}

/// Result of a planning run, borrowing meals from the catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport<'a> {
    pub targets: MacroTargets,
    pub meals_per_day: u8,
    pub relaxation: RelaxationLevel,
    pub allergen_safe: bool,
    pub unrecognized_exclusions: Vec<String>,
    pub week: WeekPlan<'a>,
    pub grocery: Vec<GroceryItem>,
}

/// Targets, filter ladder, week assembly and grocery list in one call.
pub fn build_plan<'a>(
    catalog: &'a Catalog,
    request: &PlanRequest,
    config: &PlannerConfig,
) -> Result<PlanReport<'a>> {
    request.validate()?;
    config.validate()?;

    let targets = request.targets.resolve()?;
    let constraints = request.constraints(targets.target_calories);

    let pool = filter_with_ladder(catalog, &constraints)?;
    if !pool.is_allergen_safe() {
        warn!("plan may contain excluded allergens");
    }

    let week = WeekAssembler::new(config.clone())
        .with_favorites(&constraints.favorite_ingredients)
        .assemble(
            &pool,
            constraints.target_calories,
            constraints.meals_per_day,
        )?;
    let grocery = aggregate(&week, config.exclude_water);

    info!(
        target = targets.target_calories,
        level = %pool.level(),
        grocery_items = grocery.len(),
        "plan built"
    );

    Ok(PlanReport {
        targets,
        meals_per_day: constraints.clamped_meals_per_day(),
        relaxation: pool.level(),
        allergen_safe: pool.is_allergen_safe(),
        unrecognized_exclusions: constraints.exclusions.unrecognized.clone(),
        week,
        grocery,
    })
}
