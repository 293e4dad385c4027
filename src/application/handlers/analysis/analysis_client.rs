//! AnalysisClient - Runs one syllabus/exam analysis against a generative model.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{debug, info, warn, Instrument};

use crate::domain::foundation::AnalysisId;
use crate::domain::tos::{
    build_analysis_prompt, normalize_response, response_schema, AnalysisError,
    ConsistencyChecker, ConsistencyReport, TOSResult,
};
use crate::ports::{GenerationError, GenerationRequest, GenerativeModel};

/// Default sampling temperature for analysis requests.
pub const DEFAULT_ANALYSIS_TEMPERATURE: f32 = 0.1;

/// A successful analysis together with its consistency findings.
#[derive(Debug, Clone)]
pub struct CheckedAnalysis {
    pub analysis_id: AnalysisId,
    pub result: TOSResult,
    pub report: ConsistencyReport,
}

/// Orchestrates prompt building, the model call and normalization.
///
/// Holds no credential; the caller passes one into every call. Safe to share
/// across tasks.
pub struct AnalysisClient {
    model: Arc<dyn GenerativeModel>,
    temperature: f32,
    checker: ConsistencyChecker,
}

impl AnalysisClient {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            model,
            temperature: DEFAULT_ANALYSIS_TEMPERATURE,
            checker: ConsistencyChecker::default(),
        }
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the consistency checker.
    pub fn with_checker(mut self, checker: ConsistencyChecker) -> Self {
        self.checker = checker;
        self
    }

    /// Analyzes a syllabus and exam, returning the table.
    ///
    /// Consistency findings are logged and otherwise ignored.
    pub async fn analyze(
        &self,
        credential: SecretString,
        syllabus: &str,
        exam: &str,
    ) -> Result<TOSResult, AnalysisError> {
        self.analyze_checked(credential, syllabus, exam)
            .await
            .map(|checked| checked.result)
    }

    /// Analyzes a syllabus and exam, returning the table and its findings.
    ///
    /// # Errors
    ///
    /// - `MissingCredential` for a blank credential, before any request
    /// - `InvalidCredential` when the service rejects the key
    /// - `MalformedResponse` / `UnexpectedResponseShape` for a bad response
    /// - `Service` for anything else the service reports
    pub async fn analyze_checked(
        &self,
        credential: SecretString,
        syllabus: &str,
        exam: &str,
    ) -> Result<CheckedAnalysis, AnalysisError> {
        if credential.expose_secret().trim().is_empty() {
            return Err(AnalysisError::MissingCredential);
        }

        let analysis_id = AnalysisId::new();
        let span = tracing::info_span!("analysis", analysis_id = %analysis_id);

        async move {
            let model_info = self.model.model_info();
            info!(
                provider = %model_info.provider,
                model = %model_info.model,
                syllabus_bytes = syllabus.len(),
                exam_bytes = exam.len(),
                "Starting analysis"
            );

            let prompt = build_analysis_prompt(syllabus, exam);
            let request = GenerationRequest::new(prompt, response_schema().to_json())
                .with_temperature(self.temperature)
                .with_analysis_id(analysis_id);

            let response = self
                .model
                .generate(&credential, request)
                .await
                .map_err(map_generation_error)?;
            debug!(response_bytes = response.text.len(), "Received model response");

            let result = normalize_response(&response.text)?;
            let report = self.checker.check(&result);
            for finding in report.iter() {
                warn!(%finding, "Analysis result is inconsistent");
            }

            info!(
                rows = result.row_count(),
                total_items = result.totals.total_items,
                findings = report.len(),
                "Analysis complete"
            );

            Ok::<_, AnalysisError>(CheckedAnalysis {
                analysis_id,
                result,
                report,
            })
        }
        .instrument(span)
        .await
    }
}

/// Maps port errors onto the analysis taxonomy.
fn map_generation_error(err: GenerationError) -> AnalysisError {
    match err {
        GenerationError::InvalidCredential => AnalysisError::InvalidCredential,
        GenerationError::Parse(message) => AnalysisError::malformed(message),
        GenerationError::Service { message } => AnalysisError::service(message),
        GenerationError::Network(message) => AnalysisError::service(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockError, MockGenerativeModel};
    use crate::domain::export::to_pretty_json;
    use crate::domain::tos::sample::{sample_result, SAMPLE_EXAM, SAMPLE_SYLLABUS};
    use crate::domain::tos::ConsistencyFinding;

    fn key() -> SecretString {
        SecretString::new("test-key".to_string())
    }

    fn client(model: &MockGenerativeModel) -> AnalysisClient {
        AnalysisClient::new(Arc::new(model.clone()))
    }

    #[tokio::test]
    async fn blank_credential_is_missing_without_a_call() {
        let model = MockGenerativeModel::new();

        let err = client(&model)
            .analyze(SecretString::new("   ".to_string()), SAMPLE_SYLLABUS, SAMPLE_EXAM)
            .await
            .unwrap_err();

        assert_eq!(err, AnalysisError::MissingCredential);
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn sample_response_produces_sample_result() {
        let model = MockGenerativeModel::new()
            .with_response(to_pretty_json(&sample_result()).unwrap());

        let result = client(&model)
            .analyze(key(), SAMPLE_SYLLABUS, SAMPLE_EXAM)
            .await
            .unwrap();

        assert_eq!(result, sample_result());
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn request_carries_prompt_schema_and_temperature() {
        let model = MockGenerativeModel::new();

        client(&model)
            .with_temperature(0.2)
            .analyze(key(), "SYL", "EXAM")
            .await
            .unwrap();

        let call = &model.get_calls()[0];
        assert_eq!(call.prompt, build_analysis_prompt("SYL", "EXAM"));
        assert_eq!(call.response_schema, response_schema().to_json());
        assert_eq!(call.response_mime_type, "application/json");
        assert!((call.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn invalid_credential_is_reported_as_such() {
        let model = MockGenerativeModel::new().with_error(MockError::InvalidCredential);

        let err = client(&model)
            .analyze(key(), SAMPLE_SYLLABUS, SAMPLE_EXAM)
            .await
            .unwrap_err();

        assert_eq!(err, AnalysisError::InvalidCredential);
        assert!(err.should_clear_credential());
    }

    #[tokio::test]
    async fn service_failure_keeps_message() {
        let model = MockGenerativeModel::new().with_error(MockError::Service {
            message: "Resource has been exhausted (e.g. check quota).".to_string(),
        });

        let err = client(&model)
            .analyze(key(), SAMPLE_SYLLABUS, SAMPLE_EXAM)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AnalysisError::service("Resource has been exhausted (e.g. check quota).")
        );
    }

    #[tokio::test]
    async fn non_json_text_is_malformed() {
        let model = MockGenerativeModel::new().with_response("I cannot help with that.");

        let err = client(&model)
            .analyze(key(), SAMPLE_SYLLABUS, SAMPLE_EXAM)
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn unreadable_envelope_is_malformed() {
        let model = MockGenerativeModel::new().with_error(MockError::Parse {
            message: "No candidates in response".to_string(),
        });

        let err = client(&model)
            .analyze(key(), SAMPLE_SYLLABUS, SAMPLE_EXAM)
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn missing_totals_is_unexpected_shape() {
        let model = MockGenerativeModel::new().with_response(r#"{"tableRows": []}"#);

        let err = client(&model)
            .analyze(key(), SAMPLE_SYLLABUS, SAMPLE_EXAM)
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::UnexpectedResponseShape { .. }));
    }

    #[tokio::test]
    async fn inconsistent_totals_are_reported_not_fatal() {
        let mut result = sample_result();
        result.totals.total_items = 7;
        let model = MockGenerativeModel::new().with_response(to_pretty_json(&result).unwrap());

        let checked = client(&model)
            .analyze_checked(key(), SAMPLE_SYLLABUS, SAMPLE_EXAM)
            .await
            .unwrap();

        assert_eq!(checked.result.totals.total_items, 7);
        assert!(checked
            .report
            .iter()
            .any(|f| matches!(f, ConsistencyFinding::TotalsMismatch { .. })));
    }

    #[tokio::test]
    async fn each_analysis_gets_its_own_id() {
        let model = MockGenerativeModel::new();
        let client = client(&model);

        let first = client.analyze_checked(key(), "s", "e").await.unwrap();
        let second = client.analyze_checked(key(), "s", "e").await.unwrap();

        assert_ne!(first.analysis_id, second.analysis_id);
        assert_eq!(model.get_calls()[0].analysis_id, first.analysis_id);
    }
}
