//! Mock Generative Model for testing.
//!
//! Provides a configurable mock implementation of the GenerativeModel port,
//! allowing tests to run without calling the real service.
//!
//! # Features
//!
//! - Pre-configured responses (raw text, consumed in order)
//! - Simulated delays
//! - Error injection
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let model = MockGenerativeModel::new()
//!     .with_response(r#"{"tableRows": [], "totals": {...}}"#)
//!     .with_error(MockError::InvalidCredential);
//!
//! let response = model.generate(&credential, request).await?;
//! ```

use async_trait::async_trait;
use secrecy::SecretString;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::export::to_pretty_json;
use crate::domain::tos::sample::sample_result;
use crate::ports::{
    GenerationError, GenerationRequest, GenerationResponse, GenerativeModel, ModelInfo,
};

/// Mock generative model for testing.
///
/// Configurable to return specific responses, simulate delays, or inject errors.
/// Once the queue is exhausted it answers with the sample table.
#[derive(Debug, Clone)]
pub struct MockGenerativeModel {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Model info to return.
    info: ModelInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this raw text.
    Success { text: String },
    /// Return an error.
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate a rejected API key.
    InvalidCredential,
    /// Simulate a service-reported failure.
    Service { message: String },
    /// Simulate a network error.
    Network { message: String },
    /// Simulate an unreadable response envelope.
    Parse { message: String },
}

impl From<MockError> for GenerationError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::InvalidCredential => GenerationError::InvalidCredential,
            MockError::Service { message } => GenerationError::service(message),
            MockError::Network { message } => GenerationError::network(message),
            MockError::Parse { message } => GenerationError::parse(message),
        }
    }
}

impl Default for MockGenerativeModel {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockGenerativeModel {
    /// Creates a new mock model with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ModelInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful raw-text response to the queue.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        lock(&self.responses).push_back(MockResponse::Success { text: text.into() });
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        lock(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this model.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<GenerationRequest> {
        lock(&self.calls).clone()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    /// Gets the next response or the sample table.
    fn next_response(&self) -> MockResponse {
        lock(&self.responses).pop_front().unwrap_or_else(|| {
            match to_pretty_json(&sample_result()) {
                Ok(text) => MockResponse::Success { text },
                Err(e) => MockResponse::Error(MockError::Parse {
                    message: e.to_string(),
                }),
            }
        })
    }
}

#[async_trait]
impl GenerativeModel for MockGenerativeModel {
    async fn generate(
        &self,
        _credential: &SecretString,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        // Record the call
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success { text } => {
                Ok(GenerationResponse::new(text, self.info.model.clone()))
            }
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn model_info(&self) -> ModelInfo {
        self.info.clone()
    }
}
