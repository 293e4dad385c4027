//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TOS_BUILDER` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a usable config.
//!
//! # Example
//!
//! ```no_run
//! use tos_builder::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Using model {}", config.ai.model);
//! ```

mod ai;
mod analysis;
mod error;
mod export;
mod logging;

pub use ai::{AiConfig, MAX_TEMPERATURE};
pub use analysis::AnalysisConfig;
pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Generative model configuration (Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Report export configuration
    #[serde(default)]
    pub export: ExportConfig,

    /// Result checking configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TOS_BUILDER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TOS_BUILDER__AI__MODEL=gemini-2.5-pro` -> `ai.model`
    /// - `TOS_BUILDER__EXPORT__OUTPUT_DIR=/tmp/reports` -> `export.output_dir`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TOS_BUILDER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.export.validate()?;
        self.analysis.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
