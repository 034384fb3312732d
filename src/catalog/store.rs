use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{PlanError, Result};
use crate::models::meal::derive_calories;
use crate::models::{Allergen, Diet, Dislike, Ingredient, MealRecord, MealSlot, Unit};

/// Catalog compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// On-disk record shape. Calories may be omitted and are then derived.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMealRecord {
    id: String,
    name: String,
    meal_type: MealSlot,
    #[serde(default)]
    diet_tags: Vec<Diet>,
    #[serde(default)]
    allergens: Vec<Allergen>,
    #[serde(default)]
    dislikes: Vec<Dislike>,
    cook_time: u32,
    #[serde(default)]
    cuisine: Option<String>,
    protein: f64,
    fat: f64,
    carbs: f64,
    #[serde(default)]
    calories: Option<f64>,
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    #[serde(default)]
    steps: Vec<String>,
}

impl From<RawMealRecord> for MealRecord {
    fn from(raw: RawMealRecord) -> Self {
        let calories = raw
            .calories
            .unwrap_or_else(|| derive_calories(raw.protein, raw.fat, raw.carbs));
        let diet_tags = if raw.diet_tags.is_empty() {
            vec![Diet::None]
        } else {
            raw.diet_tags
        };
        MealRecord {
            id: raw.id,
            name: raw.name,
            slot: raw.meal_type,
            diet_tags,
            allergens: raw.allergens,
            dislikes: raw.dislikes,
            cook_time: raw.cook_time,
            cuisine: raw.cuisine.filter(|c| !c.trim().is_empty()),
            protein: raw.protein,
            fat: raw.fat,
            carbs: raw.carbs,
            calories,
            ingredients: raw.ingredients,
            steps: raw.steps,
        }
    }
}

/// Read-only, validated collection of meals in load order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    meals: Vec<MealRecord>,
}

impl Catalog {
    /// Validate and wrap a list of meals.
    pub fn new(meals: Vec<MealRecord>) -> Result<Self> {
        validate_meals(&meals)?;
        Ok(Self { meals })
    }

    /// Parse and validate a JSON array of meal records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Vec<RawMealRecord> = serde_json::from_str(json)?;
        Self::new(raw.into_iter().map(MealRecord::from).collect())
    }

    /// Load a catalog from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        info!(path = %path.display(), meals = catalog.len(), "loaded meal catalog");
        Ok(catalog)
    }

    /// The catalog shipped with the binary.
    pub fn builtin() -> Result<Self> {
        let catalog = Self::from_json_str(BUILTIN_CATALOG)?;
        debug!(meals = catalog.len(), "loaded built-in meal catalog");
        Ok(catalog)
    }

    pub fn meals(&self) -> &[MealRecord] {
        &self.meals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MealRecord> {
        self.meals.iter()
    }

    /// Get a meal by id.
    pub fn get(&self, id: &str) -> Option<&MealRecord> {
        self.meals.iter().find(|m| m.id == id)
    }

    /// Meals for one slot, in catalog order.
    pub fn by_slot(&self, slot: MealSlot) -> Vec<&MealRecord> {
        self.meals.iter().filter(|m| m.slot == slot).collect()
    }

    /// Distinct ingredient names, sorted, original casing of first sighting.
    pub fn ingredient_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names: Vec<String> = self
            .meals
            .iter()
            .flat_map(|m| m.ingredients.iter())
            .filter(|i| seen.insert(i.name.trim().to_lowercase()))
            .map(|i| i.name.trim().to_string())
            .collect();
        names.sort_by_key(|n| n.to_lowercase());
        names
    }

    /// Count of meals in the catalog.
    pub fn len(&self) -> usize {
        self.meals.len()
    }

    /// Check if catalog has no meals.
    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MealRecord;
    type IntoIter = std::slice::Iter<'a, MealRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.meals.iter()
    }
}

fn validate_meals(meals: &[MealRecord]) -> Result<()> {
    let mut ids = HashSet::new();
    let mut units: HashMap<String, Unit> = HashMap::new();

    for meal in meals {
        if meal.id.trim().is_empty() {
            return Err(PlanError::InvalidCatalog(format!(
                "meal '{}' has an empty id",
                meal.name
            )));
        }
        if meal.name.trim().is_empty() {
            return Err(PlanError::InvalidCatalog(format!(
                "meal {} has an empty name",
                meal.id
            )));
        }
        if !ids.insert(meal.id.as_str()) {
            return Err(PlanError::DuplicateMealId(meal.id.clone()));
        }
        let macros_ok = [meal.protein, meal.fat, meal.carbs]
            .into_iter()
            .all(|g| g.is_finite() && g >= 0.0);
        if !macros_ok {
            return Err(PlanError::InvalidCatalog(format!(
                "meal {} has negative or non-finite macros",
                meal.id
            )));
        }
        if !meal.is_calorie_consistent() {
            return Err(PlanError::CalorieMismatch {
                id: meal.id.clone(),
                stated: meal.calories,
                derived: meal.derived_calories(),
            });
        }

        for ingredient in &meal.ingredients {
            if !ingredient.amount.is_finite() || ingredient.amount < 0.0 {
                return Err(PlanError::InvalidCatalog(format!(
                    "meal {} lists '{}' with an invalid amount",
                    meal.id, ingredient.name
                )));
            }
            let key = ingredient.name.trim().to_lowercase();
            match units.get(&key) {
                Some(&unit) if unit != ingredient.unit => {
                    return Err(PlanError::InconsistentUnit {
                        name: key,
                        first: unit.to_string(),
                        second: ingredient.unit.to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    units.insert(key, ingredient.unit);
                }
            }
        }
    }

    Ok(())
}
