//! Gemini Provider - Implementation of GenerativeModel for Google's Gemini API.
//!
//! Calls `models/{model}:generateContent` with a JSON response schema and
//! returns the concatenated text parts of the first candidate.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::default()
//!     .with_model("gemini-2.5-flash")
//!     .with_timeout(Duration::from_secs(120));
//!
//! let provider = GeminiProvider::new(config)?;
//! ```
//!
//! The API key is not part of the configuration; it is passed on every call.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::ports::{
    GenerationError, GenerationRequest, GenerationResponse, GenerativeModel, ModelInfo,
};

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini REST base URL.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";
const INVALID_KEY_REASON: &str = "API_KEY_INVALID";

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Model to use (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout; `None` waits for the service indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl GeminiConfig {
    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Network` if the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GenerationError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Converts our request to Gemini's format.
    fn to_gemini_request(request: &GenerationRequest) -> GeminiRequest<'_> {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: &request.response_mime_type,
                response_schema: &request.response_schema,
                temperature: request.temperature,
            },
        }
    }

    /// Sends the request.
    async fn send_request(
        &self,
        credential: &SecretString,
        request: &GenerationRequest,
    ) -> Result<Response, GenerationError> {
        self.client
            .post(self.generate_url())
            .header(API_KEY_HEADER, credential.expose_secret().as_str())
            .json(&Self::to_gemini_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::network("request timed out")
                } else if e.is_connect() {
                    GenerationError::network(format!("Connection failed: {}", e))
                } else {
                    GenerationError::network(e.to_string())
                }
            })
    }

    /// Reads the response body and maps it to text or an error.
    async fn parse_response(&self, response: Response) -> Result<GenerationResponse, GenerationError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::network(format!("Failed to read response: {}", e)))?;

        debug!(status = status.as_u16(), body_bytes = body.len(), "Gemini response received");

        if !status.is_success() {
            return Err(map_error_response(status.as_u16(), &body));
        }

        let text = extract_text(&body)?;
        Ok(GenerationResponse::new(text, &self.config.model))
    }
}

#[async_trait]
impl GenerativeModel for GeminiProvider {
    async fn generate(
        &self,
        credential: &SecretString,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        debug!(
            analysis_id = %request.analysis_id,
            model = %self.config.model,
            prompt_bytes = request.prompt.len(),
            "Sending Gemini generateContent request"
        );
        let response = self.send_request(credential, &request).await?;
        self.parse_response(response).await
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo::new("gemini", &self.config.model)
    }
}

/// Maps a non-success response to a port error.
///
/// A rejected key is recognised by a 401 status or by `API_KEY_INVALID`
/// appearing as a detail reason or inside the message. Everything else
/// carries the service's own message.
fn map_error_response(status: u16, body: &str) -> GenerationError {
    let envelope = serde_json::from_str::<GeminiErrorEnvelope>(body).ok();

    if status == 401 {
        return GenerationError::InvalidCredential;
    }

    match envelope {
        Some(GeminiErrorEnvelope { error }) => {
            let invalid_key = error.message.contains(INVALID_KEY_REASON)
                || error
                    .details
                    .iter()
                    .any(|d| d.reason.as_deref() == Some(INVALID_KEY_REASON));
            if invalid_key {
                GenerationError::InvalidCredential
            } else if error.message.is_empty() {
                GenerationError::service(format!("Gemini returned status {}", status))
            } else {
                GenerationError::service(error.message)
            }
        }
        None if body.trim().is_empty() => {
            GenerationError::service(format!("Gemini returned status {}", status))
        }
        None => GenerationError::service(format!("Gemini returned status {}: {}", status, body.trim())),
    }
}

/// Pulls the generated text out of a successful response envelope.
fn extract_text(body: &str) -> Result<String, GenerationError> {
    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::parse(format!("Failed to parse response: {}", e)))?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        return match response.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => Err(GenerationError::service(format!(
                "Request was blocked: {}",
                reason
            ))),
            None => Err(GenerationError::parse("No candidates in response")),
        };
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::parse(match candidate.finish_reason {
            Some(reason) => format!("Candidate has no text (finish reason {})", reason),
            None => "Candidate has no text".to_string(),
        }));
    }

    Ok(text)
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a serde_json::Value,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    details: Vec<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(GeminiConfig::default()).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = GeminiConfig::default()
            .with_model("gemini-2.5-pro")
            .with_base_url("http://localhost:8080/v1beta/")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn default_config_has_no_timeout() {
        let config = GeminiConfig::default();
        assert_eq!(config.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.base_url, DEFAULT_GEMINI_BASE_URL);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn generate_url_targets_model() {
        let provider = GeminiProvider::new(
            GeminiConfig::default().with_base_url("http://localhost:8080/v1beta/"),
        )
        .unwrap();
        assert_eq!(
            provider.generate_url(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn request_body_carries_prompt_schema_and_temperature() {
        let request = GenerationRequest::new("Analyze this", json!({"type": "OBJECT"}))
            .with_temperature(0.25);
        let body = serde_json::to_value(GeminiProvider::to_gemini_request(&request)).unwrap();

        assert_eq!(
            body,
            json!({
                "contents": [{"role": "user", "parts": [{"text": "Analyze this"}]}],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {"type": "OBJECT"},
                    "temperature": 0.25
                }
            })
        );
    }

    #[test]
    fn model_info_names_gemini() {
        let info = provider().model_info();
        assert_eq!(info.provider, "gemini");
        assert_eq!(info.model, "gemini-2.5-flash");
    }

    #[test]
    fn extract_text_joins_parts() {
        let body = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"tableRows\":"}, {"text": "[]}"}]},
                "finishReason": "STOP"
            }]
        })
        .to_string();
        assert_eq!(extract_text(&body).unwrap(), "{\"tableRows\":[]}");
    }

    #[test]
    fn extract_text_rejects_garbage_envelope() {
        assert!(matches!(
            extract_text("<html>oops</html>"),
            Err(GenerationError::Parse(_))
        ));
    }

    #[test]
    fn extract_text_without_candidates_is_parse_error() {
        assert!(matches!(
            extract_text(r#"{"candidates": []}"#),
            Err(GenerationError::Parse(_))
        ));
    }

    #[test]
    fn blocked_prompt_is_service_error() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        assert_eq!(
            extract_text(body),
            Err(GenerationError::service("Request was blocked: SAFETY"))
        );
    }

    #[test]
    fn empty_candidate_reports_finish_reason() {
        let body = r#"{"candidates": [{"finishReason": "MAX_TOKENS"}]}"#;
        match extract_text(body) {
            Err(GenerationError::Parse(message)) => assert!(message.contains("MAX_TOKENS")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn invalid_key_reason_maps_to_invalid_credential() {
        let body = json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [{
                    "@type": "type.googleapis.com/google.rpc.ErrorInfo",
                    "reason": "API_KEY_INVALID",
                    "domain": "googleapis.com"
                }]
            }
        })
        .to_string();
        assert_eq!(map_error_response(400, &body), GenerationError::InvalidCredential);
    }

    #[test]
    fn invalid_key_in_message_without_details_maps_to_invalid_credential() {
        let body = json!({
            "error": {
                "code": 400,
                "message": "[400 Bad Request] API_KEY_INVALID: API key not valid.",
                "status": "INVALID_ARGUMENT"
            }
        })
        .to_string();
        assert_eq!(map_error_response(400, &body), GenerationError::InvalidCredential);
    }

    #[test]
    fn unauthorized_status_maps_to_invalid_credential() {
        assert_eq!(map_error_response(401, ""), GenerationError::InvalidCredential);
    }

    #[test]
    fn other_errors_keep_service_message_verbatim() {
        let body = json!({
            "error": {
                "code": 503,
                "message": "The model is overloaded. Please try again later.",
                "status": "UNAVAILABLE"
            }
        })
        .to_string();
        assert_eq!(
            map_error_response(503, &body),
            GenerationError::service("The model is overloaded. Please try again later.")
        );
    }

    #[test]
    fn unparseable_error_body_includes_status() {
        assert_eq!(
            map_error_response(502, "Bad Gateway"),
            GenerationError::service("Gemini returned status 502: Bad Gateway")
        );
        assert_eq!(
            map_error_response(500, "  "),
            GenerationError::service("Gemini returned status 500")
        );
    }
}
