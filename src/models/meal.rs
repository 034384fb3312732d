use std::collections::BTreeSet;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Calories per gram of protein and carbohydrate.
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;

/// Calories per gram of fat.
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Maximum accepted gap between stated and macro-derived calories.
pub const CALORIE_TOLERANCE: f64 = 1.0;

/// Named meal position within a day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snack => "snack",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diet compatibility tag. `None` on a request accepts every meal.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Diet {
    #[default]
    None,
    Vegetarian,
    Vegan,
    Keto,
}

impl Diet {
    pub const ALL: [Diet; 4] = [Diet::None, Diet::Vegetarian, Diet::Vegan, Diet::Keto];

    pub fn as_str(self) -> &'static str {
        match self {
            Diet::None => "none",
            Diet::Vegetarian => "vegetarian",
            Diet::Vegan => "vegan",
            Diet::Keto => "keto",
        }
    }

    /// Whether a meal carrying `tags` is acceptable under this requested diet.
    ///
    /// Vegetarian requests also accept vegan meals; vegan and keto need an
    /// exact tag.
    pub fn accepts(self, tags: &[Diet]) -> bool {
        match self {
            Diet::None => true,
            Diet::Vegetarian => tags
                .iter()
                .any(|t| matches!(t, Diet::Vegetarian | Diet::Vegan)),
            Diet::Vegan | Diet::Keto => tags.contains(&self),
        }
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known allergen vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Allergen {
    Gluten,
    Lactose,
    Eggs,
    Nuts,
    Fish,
    Soy,
    Sesame,
    Corn,
    Peanuts,
    Shellfish,
    Celery,
    Sulfites,
    Mustard,
    Lupin,
}

impl Allergen {
    pub const ALL: [Allergen; 14] = [
        Allergen::Gluten,
        Allergen::Lactose,
        Allergen::Eggs,
        Allergen::Nuts,
        Allergen::Fish,
        Allergen::Soy,
        Allergen::Sesame,
        Allergen::Corn,
        Allergen::Peanuts,
        Allergen::Shellfish,
        Allergen::Celery,
        Allergen::Sulfites,
        Allergen::Mustard,
        Allergen::Lupin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Allergen::Gluten => "gluten",
            Allergen::Lactose => "lactose",
            Allergen::Eggs => "eggs",
            Allergen::Nuts => "nuts",
            Allergen::Fish => "fish",
            Allergen::Soy => "soy",
            Allergen::Sesame => "sesame",
            Allergen::Corn => "corn",
            Allergen::Peanuts => "peanuts",
            Allergen::Shellfish => "shellfish",
            Allergen::Celery => "celery",
            Allergen::Sulfites => "sulfites",
            Allergen::Mustard => "mustard",
            Allergen::Lupin => "lupin",
        }
    }

    /// Case-insensitive lookup in the allergen vocabulary.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Allergen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known "food I don't like" vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dislike {
    Spicy,
    Mushrooms,
    Olives,
    Coriander,
    CottageCheese,
    Seafood,
    Liver,
    Broccoli,
    Cauliflower,
    Beans,
    Tofu,
    DarkChocolate,
}

impl Dislike {
    pub const ALL: [Dislike; 12] = [
        Dislike::Spicy,
        Dislike::Mushrooms,
        Dislike::Olives,
        Dislike::Coriander,
        Dislike::CottageCheese,
        Dislike::Seafood,
        Dislike::Liver,
        Dislike::Broccoli,
        Dislike::Cauliflower,
        Dislike::Beans,
        Dislike::Tofu,
        Dislike::DarkChocolate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Dislike::Spicy => "spicy",
            Dislike::Mushrooms => "mushrooms",
            Dislike::Olives => "olives",
            Dislike::Coriander => "coriander",
            Dislike::CottageCheese => "cottageCheese",
            Dislike::Seafood => "seafood",
            Dislike::Liver => "liver",
            Dislike::Broccoli => "broccoli",
            Dislike::Cauliflower => "cauliflower",
            Dislike::Beans => "beans",
            Dislike::Tofu => "tofu",
            Dislike::DarkChocolate => "darkChocolate",
        }
    }

    /// Case-insensitive lookup in the dislike vocabulary.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Dislike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit of an ingredient line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    G,
    Ml,
    Piece,
}

impl Unit {
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::G => "g",
            Unit::Ml => "ml",
            Unit::Piece => "piece",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: f64,
    pub unit: Unit,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: f64, unit: Unit) -> Self {
        Self {
            name: name.into(),
            amount,
            unit,
        }
    }
}

/// A catalog meal. Records are validated on load and only handed out by
/// shared reference afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "mealType")]
    pub slot: MealSlot,
    pub diet_tags: Vec<Diet>,
    pub allergens: Vec<Allergen>,
    pub dislikes: Vec<Dislike>,
    /// Minutes.
    pub cook_time: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub calories: f64,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
}

impl MealRecord {
    /// Build a record whose calories are derived from its macros.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        slot: MealSlot,
        protein: f64,
        fat: f64,
        carbs: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slot,
            diet_tags: vec![Diet::None],
            allergens: Vec::new(),
            dislikes: Vec::new(),
            cook_time: 0,
            cuisine: None,
            protein,
            fat,
            carbs,
            calories: derive_calories(protein, fat, carbs),
            ingredients: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub fn with_diet_tags(mut self, tags: &[Diet]) -> Self {
        self.diet_tags = tags.to_vec();
        self
    }

    pub fn with_allergens(mut self, allergens: &[Allergen]) -> Self {
        self.allergens = allergens.to_vec();
        self
    }

    pub fn with_dislikes(mut self, dislikes: &[Dislike]) -> Self {
        self.dislikes = dislikes.to_vec();
        self
    }

    pub fn with_cook_time(mut self, minutes: u32) -> Self {
        self.cook_time = minutes;
        self
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub fn with_steps(mut self, steps: Vec<String>) -> Self {
        self.steps = steps;
        self
    }

    /// Calories implied by the macro grams.
    #[inline]
    pub fn derived_calories(&self) -> f64 {
        derive_calories(self.protein, self.fat, self.carbs)
    }

    /// Stated calories agree with the macros.
    pub fn is_calorie_consistent(&self) -> bool {
        (self.calories - self.derived_calories()).abs() <= CALORIE_TOLERANCE
    }

    pub fn suits_diet(&self, diet: Diet) -> bool {
        diet.accepts(&self.diet_tags)
    }

    pub fn has_any_allergen(&self, excluded: &BTreeSet<Allergen>) -> bool {
        self.allergens.iter().any(|a| excluded.contains(a))
    }

    pub fn has_any_dislike(&self, excluded: &BTreeSet<Dislike>) -> bool {
        self.dislikes.iter().any(|d| excluded.contains(d))
    }

    /// Whether any ingredient name contains `term` (case-insensitive).
    pub fn contains_ingredient(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return false;
        }
        self.ingredients
            .iter()
            .any(|i| i.name.to_lowercase().contains(&term))
    }

    /// Whether the cuisine or an ingredient matches one of `terms`.
    pub fn matches_affinity(&self, terms: &[String]) -> bool {
        let cuisine = self.cuisine.as_deref().unwrap_or("").to_lowercase();
        terms.iter().any(|t| {
            let t = t.trim().to_lowercase();
            (!t.is_empty() && !cuisine.is_empty() && cuisine.contains(&t))
                || self.contains_ingredient(&t)
        })
    }
}

impl PartialEq for MealRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MealRecord {}

impl std::hash::Hash for MealRecord {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// `4·protein + 9·fat + 4·carbs`.
#[inline]
pub fn derive_calories(protein: f64, fat: f64, carbs: f64) -> f64 {
    KCAL_PER_GRAM_PROTEIN * protein + KCAL_PER_GRAM_FAT * fat + KCAL_PER_GRAM_CARBS * carbs
}
