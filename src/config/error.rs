//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Temperature {0} is outside [0, 0.5]")]
    InvalidTemperature(f32),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid file stem: {0}")]
    InvalidFileStem(String),

    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    #[error("Percentage tolerance must be positive, got {0}")]
    InvalidTolerance(f64),

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
