use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PlanError, Result};
use crate::planner::constants::{
    ACCEPTANCE_BAND_HIGH, ACCEPTANCE_BAND_LOW, EXCLUDE_WATER, REPETITION_CAP,
};

/// Runtime-configurable planner knobs.
///
/// Every field is optional in the JSON file; missing fields take the
/// compiled-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub band_low: f64,
    pub band_high: f64,
    pub repetition_cap: u32,
    pub exclude_water: bool,
    /// Seeds the tie-break order between equally ranked meals.
    /// `None` keeps catalog order.
    pub tie_break_seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            band_low: ACCEPTANCE_BAND_LOW,
            band_high: ACCEPTANCE_BAND_HIGH,
            repetition_cap: REPETITION_CAP,
            exclude_water: EXCLUDE_WATER,
            tie_break_seed: None,
        }
    }
}

impl PlannerConfig {
    /// Load overrides from a JSON file and validate them.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: PlannerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        info!(path = %path.display(), "loaded planner config");
        Ok(config)
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.tie_break_seed = seed;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.band_low.is_finite() && self.band_high.is_finite()) {
            return Err(PlanError::InvalidInput(
                "acceptance band must be finite".to_string(),
            ));
        }
        if self.band_low <= 0.0 || self.band_low > 1.0 || self.band_high < 1.0 {
            return Err(PlanError::InvalidInput(format!(
                "acceptance band [{}, {}] must contain 1.0 and stay positive",
                self.band_low, self.band_high
            )));
        }
        if self.repetition_cap == 0 {
            return Err(PlanError::InvalidInput(
                "repetition cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_matches_constants() {
        let config = PlannerConfig::default();
        assert_eq!(config.band_low, ACCEPTANCE_BAND_LOW);
        assert_eq!(config.band_high, ACCEPTANCE_BAND_HIGH);
        assert_eq!(config.repetition_cap, REPETITION_CAP);
        assert!(config.tie_break_seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"repetition_cap": 3, "tie_break_seed": 7}"#)
            .unwrap();

        let config = PlannerConfig::load(file.path()).unwrap();
        assert_eq!(config.repetition_cap, 3);
        assert_eq!(config.tie_break_seed, Some(7));
        assert_eq!(config.band_low, ACCEPTANCE_BAND_LOW);
    }

    #[test]
    fn test_invalid_band_rejected() {
        let config = PlannerConfig {
            band_low: 1.2,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PlannerConfig {
            repetition_cap: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_seed_overrides_only_when_given() {
        let config = PlannerConfig::default().with_seed(Some(9)).with_seed(None);
        assert_eq!(config.tie_break_seed, Some(9));
    }
}
