pub mod assembler;
pub mod constants;
pub mod grocery;
pub mod service;

pub use assembler::{assemble, AcceptanceBand, UsageCounter, WeekAssembler};
pub use constants::*;
pub use grocery::{aggregate, is_water, normalize_ingredient_name, GroceryItem};
pub use service::{build_plan, PlanReport, PlanRequest, TargetRequest};
