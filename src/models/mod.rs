pub mod constraints;
pub mod meal;
pub mod plan;

pub use constraints::{Constraints, Exclusions};
pub use meal::{Allergen, Diet, Dislike, Ingredient, MealRecord, MealSlot, Unit};
pub use plan::{DayPlan, PlannedMeal, WeekPlan, Weekday};
