//! Generative Model Port - Interface for structured-output generation services.
//!
//! The analysis client builds one request per analysis and hands it to an
//! implementation of this port. Implementations translate the request into
//! the service's wire format and return the raw response text untouched;
//! parsing and validation happen in the domain normalizer.
//!
//! # Design
//!
//! - Single-shot, non-streaming
//! - The credential is passed per call and never stored by implementations
//! - Errors distinguish a rejected credential from every other failure
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoModel;
//!
//! #[async_trait]
//! impl GenerativeModel for EchoModel {
//!     async fn generate(
//!         &self,
//!         _credential: &SecretString,
//!         request: GenerationRequest,
//!     ) -> Result<GenerationResponse, GenerationError> {
//!         Ok(GenerationResponse::new(request.prompt, "echo"))
//!     }
//!
//!     fn model_info(&self) -> ModelInfo {
//!         ModelInfo::new("echo", "echo-1")
//!     }
//! }
//! ```

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::AnalysisId;

/// MIME type requesting JSON output.
pub const JSON_MIME_TYPE: &str = "application/json";

/// Port for structured-output generation.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Sends one generation request and returns the raw response text.
    async fn generate(
        &self,
        credential: &SecretString,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;

    /// Provider and model identification, for logging.
    fn model_info(&self) -> ModelInfo;
}

/// A single generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Full instruction prompt.
    pub prompt: String,
    /// JSON form of the response schema the output must follow.
    pub response_schema: serde_json::Value,
    /// Requested response MIME type.
    pub response_mime_type: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Correlates log lines for one analysis.
    pub analysis_id: AnalysisId,
}

impl GenerationRequest {
    /// Creates a JSON-output request with a fresh analysis ID.
    pub fn new(prompt: impl Into<String>, response_schema: serde_json::Value) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema,
            response_mime_type: JSON_MIME_TYPE.to_string(),
            temperature: 0.1,
            analysis_id: AnalysisId::new(),
        }
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the analysis ID.
    pub fn with_analysis_id(mut self, analysis_id: AnalysisId) -> Self {
        self.analysis_id = analysis_id;
        self
    }
}

/// Raw response from the generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResponse {
    /// Generated text; expected to be JSON matching the requested schema.
    pub text: String,
    /// Model that produced the response.
    pub model: String,
}

impl GenerationResponse {
    /// Creates a new response.
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
        }
    }
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Provider name (e.g., "gemini").
    pub provider: String,
    /// Model identifier (e.g., "gemini-2.5-flash").
    pub model: String,
}

impl ModelInfo {
    /// Creates new model info.
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
        }
    }
}

/// Generation service errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// The service rejected the credential.
    #[error("API key not valid")]
    InvalidCredential,

    /// The service reported an error; `message` is its own text.
    #[error("{message}")]
    Service {
        /// Error details from the service.
        message: String,
    },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// The service's response envelope could not be read.
    #[error("parse error: {0}")]
    Parse(String),
}

impl GenerationError {
    /// Creates a service error.
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_request_asks_for_json() {
        let request = GenerationRequest::new("prompt", json!({"type": "OBJECT"}));
        assert_eq!(request.response_mime_type, "application/json");
        assert!((request.temperature - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn builder_overrides_temperature_and_id() {
        let id = AnalysisId::new();
        let request = GenerationRequest::new("p", json!({}))
            .with_temperature(0.3)
            .with_analysis_id(id);
        assert!((request.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(request.analysis_id, id);
    }

    #[test]
    fn service_error_displays_message_verbatim() {
        assert_eq!(
            GenerationError::service("quota exceeded").to_string(),
            "quota exceeded"
        );
    }
}
