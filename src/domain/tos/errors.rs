//! Analysis error taxonomy.

use thiserror::Error;

/// Everything that can stop an analysis from producing a table.
///
/// Callers branch on the variant: `MissingCredential` means prompt for a key,
/// `InvalidCredential` means discard the stored key and prompt again, the
/// rest are surfaced as failures. There are no partial results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// No credential was supplied.
    #[error("API key is missing. Please provide a valid API key.")]
    MissingCredential,

    /// The generation service rejected the credential.
    #[error("API key not valid. Please pass a valid API key.")]
    InvalidCredential,

    /// The response could not be parsed as structured data.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    /// The response parsed but does not have the expected shape.
    #[error("API returned data in an unexpected format: {message}")]
    UnexpectedResponseShape { message: String },

    /// Any other failure reported by the generation service.
    #[error("{message}")]
    Service { message: String },
}

impl AnalysisError {
    /// Creates a malformed response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Creates an unexpected shape error.
    pub fn unexpected_shape(message: impl Into<String>) -> Self {
        Self::UnexpectedResponseShape {
            message: message.into(),
        }
    }

    /// Creates a service error carrying the service's message verbatim.
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
        }
    }

    /// True when the caller should drop any cached credential.
    pub fn should_clear_credential(&self) -> bool {
        matches!(self, Self::InvalidCredential)
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCredential => "MISSING_CREDENTIAL",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            Self::UnexpectedResponseShape { .. } => "UNEXPECTED_RESPONSE_SHAPE",
            Self::Service { .. } => "ANALYSIS_SERVICE_ERROR",
        }
    }
}
