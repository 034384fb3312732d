use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::models::{MealRecord, MealSlot};

/// Number of days in a plan.
pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; DAYS_PER_WEEK] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// 1-based day number (Mon = 1).
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A meal chosen for one slot of a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedMeal<'a> {
    pub slot: MealSlot,
    pub meal: &'a MealRecord,
}

/// One day of the plan. Written once by the assembler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan<'a> {
    pub day: u8,
    pub weekday: Weekday,
    pub meals: Vec<PlannedMeal<'a>>,
    pub total_calories: u32,
}

impl<'a> DayPlan<'a> {
    pub fn new(weekday: Weekday, meals: Vec<PlannedMeal<'a>>) -> Self {
        let total: f64 = meals.iter().map(|m| m.meal.calories).sum();
        Self {
            day: weekday.number(),
            weekday,
            meals,
            total_calories: total.round().max(0.0) as u32,
        }
    }
}

/// Seven days of meals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeekPlan<'a> {
    pub days: Vec<DayPlan<'a>>,
}

impl<'a> WeekPlan<'a> {
    pub fn new(days: Vec<DayPlan<'a>>) -> Self {
        Self { days }
    }

    /// Every planned meal, day by day in slot order.
    pub fn meals(&self) -> impl Iterator<Item = &'a MealRecord> + '_ {
        self.days
            .iter()
            .flat_map(|d| d.meals.iter().map(|m| m.meal))
    }

    /// Number of times each meal id appears in the week.
    pub fn usage_counts(&self) -> HashMap<&'a str, u32> {
        let mut counts = HashMap::new();
        for meal in self.meals() {
            *counts.entry(meal.id.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Sum of the daily totals.
    pub fn total_calories(&self) -> u32 {
        self.days.iter().map(|d| d.total_calories).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_numbers() {
        assert_eq!(Weekday::Mon.number(), 1);
        assert_eq!(Weekday::Sun.number(), 7);
    }

    #[test]
    fn test_day_total_is_rounded() {
        let a = MealRecord::new("a", "A", MealSlot::Lunch, 10.25, 0.0, 0.0); // 41 kcal
        let b = MealRecord::new("b", "B", MealSlot::Dinner, 0.0, 1.1, 0.0); // 9.9 kcal
        let day = DayPlan::new(
            Weekday::Tue,
            vec![
                PlannedMeal { slot: MealSlot::Lunch, meal: &a },
                PlannedMeal { slot: MealSlot::Dinner, meal: &b },
            ],
        );
        assert_eq!(day.day, 2);
        assert_eq!(day.total_calories, 51);
    }

    #[test]
    fn test_usage_counts() {
        let a = MealRecord::new("a", "A", MealSlot::Lunch, 10.0, 0.0, 0.0);
        let day = DayPlan::new(
            Weekday::Mon,
            vec![
                PlannedMeal { slot: MealSlot::Lunch, meal: &a },
                PlannedMeal { slot: MealSlot::Dinner, meal: &a },
            ],
        );
        let week = WeekPlan::new(vec![day]);
        assert_eq!(week.usage_counts().get("a"), Some(&2));
        assert_eq!(week.total_calories(), 80);
    }
}
