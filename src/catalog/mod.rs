pub mod filter;
mod store;

pub use filter::{filter, filter_with_ladder, CandidatePool, FilterRules, RelaxationLevel};
pub use store::Catalog;
