//! Analysis result checking configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::tos::{ConsistencyChecker, DEFAULT_PERCENTAGE_TOLERANCE};

/// Analysis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Allowed drift between a row's percentage and its item share
    #[serde(default = "default_tolerance")]
    pub percentage_tolerance: f64,
}

impl AnalysisConfig {
    /// Build the consistency checker
    pub fn checker(&self) -> ConsistencyChecker {
        ConsistencyChecker::new(self.percentage_tolerance)
    }

    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.percentage_tolerance.is_finite() && self.percentage_tolerance > 0.0) {
            return Err(ValidationError::InvalidTolerance(self.percentage_tolerance));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            percentage_tolerance: default_tolerance(),
        }
    }
}

fn default_tolerance() -> f64 {
    DEFAULT_PERCENTAGE_TOLERANCE
}
