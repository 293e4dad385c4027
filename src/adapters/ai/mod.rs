//! Generative Model Adapters.
//!
//! Implementations of the GenerativeModel port.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini `generateContent` with a response schema
//! - `MockGenerativeModel` - Configurable mock for testing

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{
    GeminiConfig, GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL,
};
pub use mock_provider::{MockError, MockGenerativeModel, MockResponse};
