use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Unit, WeekPlan};

/// One aggregated shopping line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroceryItem {
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
}

/// Lower-cased, trimmed ingredient name used as the aggregation key.
pub fn normalize_ingredient_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Any word of the name is "water", e.g. "cold water". "Watermelon" is not.
pub fn is_water(normalized: &str) -> bool {
    normalized
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == "water")
}

/// Sum ingredient quantities over every meal of the week.
///
/// Totals are kept per normalized name and unit, so a name listed in both
/// grams and millilitres yields two lines instead of a mixed sum. Entries
/// come back sorted by name, then unit.
pub fn aggregate(week: &WeekPlan<'_>, exclude_water: bool) -> Vec<GroceryItem> {
    let mut totals: BTreeMap<(String, Unit), f64> = BTreeMap::new();

    for meal in week.meals() {
        for ingredient in &meal.ingredients {
            let name = normalize_ingredient_name(&ingredient.name);
            if name.is_empty() || (exclude_water && is_water(&name)) {
                continue;
            }
            *totals.entry((name, ingredient.unit)).or_insert(0.0) += ingredient.amount;
        }
    }

    totals
        .into_iter()
        .map(|((name, unit), quantity)| GroceryItem {
            name,
            quantity,
            unit,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayPlan, Ingredient, MealRecord, MealSlot, PlannedMeal, Weekday};

    #[test]
    fn test_is_water() {
        assert!(is_water("water"));
        assert!(is_water("cold water"));
        assert!(!is_water("watermelon"));
        assert!(is_water("sparkling-water"));
    }

    #[test]
    fn test_aggregate_merges_case_and_whitespace() {
        let a = MealRecord::new("a", "A", MealSlot::Lunch, 10.0, 1.0, 10.0).with_ingredients(vec![
            Ingredient::new("Rice", 70.0, Unit::G),
            Ingredient::new("Water", 300.0, Unit::Ml),
        ]);
        let b = MealRecord::new("b", "B", MealSlot::Dinner, 10.0, 1.0, 10.0)
            .with_ingredients(vec![
                Ingredient::new(" rice ", 30.0, Unit::G),
                Ingredient::new("Apple", 1.0, Unit::Piece),
            ]);
        let day = DayPlan::new(
            Weekday::Mon,
            vec![
                PlannedMeal { slot: MealSlot::Lunch, meal: &a },
                PlannedMeal { slot: MealSlot::Dinner, meal: &b },
            ],
        );
        let week = WeekPlan::new(vec![day]);

        let items = aggregate(&week, true);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["apple", "rice"]);
        assert_eq!(items[1].quantity, 100.0);
        assert_eq!(items[1].unit, Unit::G);

        let with_water = aggregate(&week, false);
        assert_eq!(with_water.len(), 3);
    }

    #[test]
    fn test_mixed_units_are_not_summed() {
        // Built directly, without catalog validation.
        let a = MealRecord::new("a", "A", MealSlot::Breakfast, 10.0, 1.0, 10.0)
            .with_ingredients(vec![Ingredient::new("Milk", 200.0, Unit::Ml)]);
        let b = MealRecord::new("b", "B", MealSlot::Snack, 10.0, 1.0, 10.0)
            .with_ingredients(vec![Ingredient::new("milk", 30.0, Unit::G)]);
        let day = DayPlan::new(
            Weekday::Tue,
            vec![
                PlannedMeal { slot: MealSlot::Breakfast, meal: &a },
                PlannedMeal { slot: MealSlot::Snack, meal: &b },
            ],
        );
        let week = WeekPlan::new(vec![day]);

        let items = aggregate(&week, true);
        assert_eq!(items.len(), 2);
        assert_eq!((items[0].quantity, items[0].unit), (30.0, Unit::G));
        assert_eq!((items[1].quantity, items[1].unit), (200.0, Unit::Ml));
        assert!(items.iter().all(|i| i.name == "milk"));
    }

    #[test]
    fn test_empty_week_gives_empty_list() {
        let week = WeekPlan::new(Vec::new());
        assert!(aggregate(&week, true).is_empty());
    }
}
