//! Generative model configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{GeminiConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

/// Highest accepted sampling temperature; analysis wants near-deterministic output.
pub const MAX_TEMPERATURE: f32 = 0.5;

/// Generative model configuration
///
/// The API key is deliberately absent: it is supplied per call.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// REST base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds; unset means no client-side timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Build the Gemini adapter configuration
    pub fn gemini(&self) -> GeminiConfig {
        let config = GeminiConfig::default()
            .with_model(&self.model)
            .with_base_url(&self.base_url);
        match self.timeout() {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__MODEL"));
        }

        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }

        if !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature(self.temperature));
        }

        if self.timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            timeout_secs: None,
        }
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_temperature() -> f32 {
    0.1
}
