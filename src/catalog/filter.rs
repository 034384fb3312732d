use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::{PlanError, Result};
use crate::models::{Constraints, MealRecord};

/// One rung of the relaxation ladder.
///
/// Allergen exclusion holds on every rung. Only when the last rung comes up
/// empty does the filter hand back the unfiltered catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RelaxationLevel {
    Strict,
    IgnoreAffinity,
    IgnoreCookTime,
    AllergensOnly,
}

impl RelaxationLevel {
    /// Levels in the order they are tried.
    pub const LADDER: [RelaxationLevel; 4] = [
        RelaxationLevel::Strict,
        RelaxationLevel::IgnoreAffinity,
        RelaxationLevel::IgnoreCookTime,
        RelaxationLevel::AllergensOnly,
    ];

    /// 0-based position on the ladder.
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn rules(self) -> FilterRules {
        match self {
            RelaxationLevel::Strict => FilterRules {
                diet: true,
                dislikes: true,
                cook_time: true,
                affinity: true,
            },
            RelaxationLevel::IgnoreAffinity => FilterRules {
                diet: true,
                dislikes: true,
                cook_time: true,
                affinity: false,
            },
            RelaxationLevel::IgnoreCookTime => FilterRules {
                diet: true,
                dislikes: true,
                cook_time: false,
                affinity: false,
            },
            RelaxationLevel::AllergensOnly => FilterRules {
                diet: false,
                dislikes: false,
                cook_time: false,
                affinity: false,
            },
        }
    }
}

impl fmt::Display for RelaxationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RelaxationLevel::Strict => "strict",
            RelaxationLevel::IgnoreAffinity => "ignoring cuisine/favorites",
            RelaxationLevel::IgnoreCookTime => "ignoring cook time",
            RelaxationLevel::AllergensOnly => "allergens only",
        };
        f.write_str(label)
    }
}

/// Which optional checks a level applies on top of allergen exclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterRules {
    pub diet: bool,
    pub dislikes: bool,
    pub cook_time: bool,
    pub affinity: bool,
}

impl FilterRules {
    /// Whether `meal` passes these rules. `affinity_terms` are pre-normalized.
    pub fn admits(
        &self,
        meal: &MealRecord,
        constraints: &Constraints,
        affinity_terms: &[String],
    ) -> bool {
        if meal.has_any_allergen(&constraints.exclusions.allergens) {
            return false;
        }
        if self.diet && !meal.suits_diet(constraints.diet) {
            return false;
        }
        if self.dislikes && meal.has_any_dislike(&constraints.exclusions.dislikes) {
            return false;
        }
        if self.cook_time && meal.cook_time > constraints.cook_time_ceiling {
            return false;
        }
        if self.affinity && !affinity_terms.is_empty() && !meal.matches_affinity(affinity_terms) {
            return false;
        }
        true
    }
}

/// Borrowed, ordered view over catalog meals that passed a filter level.
#[derive(Debug, Clone)]
pub struct CandidatePool<'a> {
    meals: Vec<&'a MealRecord>,
    level: RelaxationLevel,
    allergen_safe: bool,
}

impl<'a> CandidatePool<'a> {
    /// Pool from an explicit list of meals, treated as strict and allergen safe.
    pub fn from_meals(meals: Vec<&'a MealRecord>) -> Self {
        Self {
            meals,
            level: RelaxationLevel::Strict,
            allergen_safe: true,
        }
    }

    pub fn meals(&self) -> &[&'a MealRecord] {
        &self.meals
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a MealRecord> + '_ {
        self.meals.iter().copied()
    }

    pub fn level(&self) -> RelaxationLevel {
        self.level
    }

    /// False when the ladder ran out and the whole catalog was returned.
    pub fn is_allergen_safe(&self) -> bool {
        self.allergen_safe
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

/// Filter the catalog at one relaxation level.
///
/// At `AllergensOnly` an empty result is replaced by the full catalog.
pub fn filter<'a>(
    catalog: &'a Catalog,
    constraints: &Constraints,
    level: RelaxationLevel,
) -> CandidatePool<'a> {
    let rules = level.rules();
    let terms = constraints.affinity_terms();

    let meals: Vec<&MealRecord> = catalog
        .iter()
        .filter(|m| rules.admits(m, constraints, &terms))
        .collect();

    if meals.is_empty() && level == RelaxationLevel::AllergensOnly {
        warn!(
            catalog = catalog.len(),
            "every meal is excluded by allergens; falling back to the full catalog"
        );
        return CandidatePool {
            meals: catalog.iter().collect(),
            level,
            allergen_safe: false,
        };
    }

    CandidatePool {
        meals,
        level,
        allergen_safe: true,
    }
}

/// Walk the ladder and return the first non-empty pool.
///
/// Fails only when the catalog itself is empty.
pub fn filter_with_ladder<'a>(
    catalog: &'a Catalog,
    constraints: &Constraints,
) -> Result<CandidatePool<'a>> {
    for level in RelaxationLevel::LADDER {
        let pool = filter(catalog, constraints, level);
        debug!(level = %level, candidates = pool.len(), "filter level evaluated");
        if !pool.is_empty() {
            if level != RelaxationLevel::Strict {
                info!(level = %level, candidates = pool.len(), "relaxed filters to find meals");
            }
            return Ok(pool);
        }
    }
    Err(PlanError::InsufficientMeals)
}
