pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod nutrition;
pub mod planner;

pub use catalog::{filter, filter_with_ladder, CandidatePool, Catalog, RelaxationLevel};
pub use config::PlannerConfig;
pub use error::{PlanError, Result};
pub use models::{Constraints, DayPlan, MealRecord, MealSlot, WeekPlan};
pub use planner::{aggregate, assemble, build_plan, GroceryItem, PlanReport, WeekAssembler};
