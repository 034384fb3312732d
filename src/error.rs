use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Not enough meals for your filters. Please remove some allergens/dislikes.")]
    InsufficientMeals,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Duplicate meal id in catalog: {0}")]
    DuplicateMealId(String),

    #[error("Meal {id}: stated {stated} kcal but macros give {derived} kcal")]
    CalorieMismatch { id: String, stated: f64, derived: f64 },

    #[error("Ingredient '{name}' is listed in both {first} and {second}")]
    InconsistentUnit {
        name: String,
        first: String,
        second: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PlanError {
    /// Errors the user can fix by changing their request.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, PlanError::InsufficientMeals | PlanError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_correctable_classification() {
        assert!(PlanError::InsufficientMeals.is_user_correctable());
        assert!(PlanError::InvalidInput("age".to_string()).is_user_correctable());
        assert!(!PlanError::DuplicateMealId("x".to_string()).is_user_correctable());
    }

    #[test]
    fn test_insufficient_meals_message_is_actionable() {
        let msg = PlanError::InsufficientMeals.to_string();
        assert!(msg.contains("allergens/dislikes"));
    }
}
