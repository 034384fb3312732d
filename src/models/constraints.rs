use std::collections::BTreeSet;

use serde::Serialize;
use tracing::warn;

use crate::models::{Allergen, Diet, Dislike};

/// Default cook-time ceiling in minutes.
pub const DEFAULT_COOK_TIME: u32 = 30;

/// Supported meals-per-day range.
pub const MIN_MEALS_PER_DAY: u8 = 3;
pub const MAX_MEALS_PER_DAY: u8 = 5;

/// Request exclusions split by vocabulary.
///
/// Allergens are checked first, so a word present in both vocabularies is
/// always treated as an allergen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Exclusions {
    pub allergens: BTreeSet<Allergen>,
    pub dislikes: BTreeSet<Dislike>,
    /// Raw entries matching neither vocabulary.
    pub unrecognized: Vec<String>,
}

impl Exclusions {
    pub fn resolve<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Self::default();
        for entry in raw {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                continue;
            }
            if let Some(allergen) = Allergen::parse(entry) {
                out.allergens.insert(allergen);
            } else if let Some(dislike) = Dislike::parse(entry) {
                out.dislikes.insert(dislike);
            } else {
                warn!(exclusion = entry, "ignoring unknown exclusion");
                out.unrecognized.push(entry.to_string());
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.allergens.is_empty() && self.dislikes.is_empty()
    }
}

/// Per-request planning constraints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraints {
    pub target_calories: f64,
    pub meals_per_day: u8,
    pub diet: Diet,
    pub exclusions: Exclusions,
    /// Minutes.
    pub cook_time_ceiling: u32,
    pub cuisine_likes: Vec<String>,
    pub favorite_ingredients: Vec<String>,
}

impl Constraints {
    pub fn new(target_calories: f64, meals_per_day: u8) -> Self {
        Self {
            target_calories,
            meals_per_day,
            diet: Diet::None,
            exclusions: Exclusions::default(),
            cook_time_ceiling: DEFAULT_COOK_TIME,
            cuisine_likes: Vec::new(),
            favorite_ingredients: Vec::new(),
        }
    }

    pub fn with_diet(mut self, diet: Diet) -> Self {
        self.diet = diet;
        self
    }

    pub fn with_exclusions<I, S>(mut self, raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclusions = Exclusions::resolve(raw);
        self
    }

    pub fn with_cook_time(mut self, minutes: u32) -> Self {
        self.cook_time_ceiling = minutes;
        self
    }

    pub fn with_cuisine_likes(mut self, likes: Vec<String>) -> Self {
        self.cuisine_likes = likes;
        self
    }

    pub fn with_favorites(mut self, favorites: Vec<String>) -> Self {
        self.favorite_ingredients = favorites;
        self
    }

    /// Meals per day clamped into the supported range.
    pub fn clamped_meals_per_day(&self) -> u8 {
        clamp_meals_per_day(self.meals_per_day)
    }

    /// Soft preference terms used by the strict filter level.
    pub fn affinity_terms(&self) -> Vec<String> {
        self.cuisine_likes
            .iter()
            .chain(self.favorite_ingredients.iter())
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

pub fn clamp_meals_per_day(n: u8) -> u8 {
    n.clamp(MIN_MEALS_PER_DAY, MAX_MEALS_PER_DAY)
}
