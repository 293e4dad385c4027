//! Result normalizer.
//!
//! Turns the raw text returned by the generation service into a typed
//! [`TOSResult`]. The model is treated as untrusted: nothing is coerced or
//! defaulted, and any deviation from the response contract is an error.

use serde_json::Value;

use super::errors::AnalysisError;
use super::result::TOSResult;

/// Parses and validates a raw structured response.
///
/// # Errors
///
/// - [`AnalysisError::MalformedResponse`] if the text is not JSON.
/// - [`AnalysisError::UnexpectedResponseShape`] if `tableRows` or `totals`
///   is absent or of the wrong kind, if any required row or totals field is
///   missing or mistyped, or if a row has a blank topic.
pub fn normalize_response(raw: &str) -> Result<TOSResult, AnalysisError> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| AnalysisError::malformed(format!("response is not valid JSON: {}", e)))?;

    check_top_level(&value)?;

    let result: TOSResult = serde_json::from_value(value)
        .map_err(|e| AnalysisError::unexpected_shape(e.to_string()))?;

    if let Some(index) = result
        .table_rows
        .iter()
        .position(|row| row.topic.trim().is_empty())
    {
        return Err(AnalysisError::unexpected_shape(format!(
            "tableRows[{}].topic is empty",
            index
        )));
    }

    Ok(result)
}

fn check_top_level(value: &Value) -> Result<(), AnalysisError> {
    let object = value
        .as_object()
        .ok_or_else(|| AnalysisError::unexpected_shape("top-level value is not an object"))?;

    match object.get("tableRows") {
        Some(Value::Array(_)) => {}
        Some(_) => return Err(AnalysisError::unexpected_shape("tableRows is not an array")),
        None => return Err(AnalysisError::unexpected_shape("missing tableRows")),
    }

    match object.get("totals") {
        Some(Value::Object(_)) => Ok(()),
        Some(_) => Err(AnalysisError::unexpected_shape("totals is not an object")),
        None => Err(AnalysisError::unexpected_shape("missing totals")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tos::sample::sample_result;
    use serde_json::json;

    fn sample_json() -> Value {
        serde_json::to_value(sample_result()).unwrap()
    }

    #[test]
    fn accepts_well_formed_response() {
        let raw = sample_json().to_string();
        assert_eq!(normalize_response(&raw).unwrap(), sample_result());
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let raw = format!("\n  {}  \n", sample_json());
        assert!(normalize_response(&raw).is_ok());
    }

    #[test]
    fn non_json_is_malformed() {
        let err = normalize_response("Sure! Here is your table:").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse { .. }));
    }

    #[test]
    fn truncated_json_is_malformed() {
        let raw = sample_json().to_string();
        let err = normalize_response(&raw[..raw.len() / 2]).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse { .. }));
    }

    #[test]
    fn missing_totals_is_unexpected_shape() {
        let mut value = sample_json();
        value.as_object_mut().unwrap().remove("totals");
        let err = normalize_response(&value.to_string()).unwrap_err();
        assert_eq!(err, AnalysisError::unexpected_shape("missing totals"));
    }

    #[test]
    fn missing_rows_is_unexpected_shape() {
        let raw = json!({ "totals": sample_json()["totals"] }).to_string();
        let err = normalize_response(&raw).unwrap_err();
        assert_eq!(err, AnalysisError::unexpected_shape("missing tableRows"));
    }

    #[test]
    fn rows_must_be_an_array() {
        let raw = json!({ "tableRows": {}, "totals": sample_json()["totals"] }).to_string();
        assert!(matches!(
            normalize_response(&raw),
            Err(AnalysisError::UnexpectedResponseShape { .. })
        ));
    }

    #[test]
    fn top_level_array_is_unexpected_shape() {
        assert!(matches!(
            normalize_response("[1, 2, 3]"),
            Err(AnalysisError::UnexpectedResponseShape { .. })
        ));
    }

    #[test]
    fn missing_row_field_is_not_coerced() {
        let mut value = sample_json();
        value["tableRows"][2]
            .as_object_mut()
            .unwrap()
            .remove("itemPlacement");
        let err = normalize_response(&value.to_string()).unwrap_err();
        match err {
            AnalysisError::UnexpectedResponseShape { message } => {
                assert!(message.contains("itemPlacement"), "{}", message)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_blooms_level_is_unexpected_shape() {
        let mut value = sample_json();
        value["totals"]["bloomsDistribution"]
            .as_object_mut()
            .unwrap()
            .remove("creating");
        assert!(matches!(
            normalize_response(&value.to_string()),
            Err(AnalysisError::UnexpectedResponseShape { .. })
        ));
    }

    #[test]
    fn mistyped_count_is_unexpected_shape() {
        let mut value = sample_json();
        value["tableRows"][0]["totalItems"] = json!("one");
        assert!(matches!(
            normalize_response(&value.to_string()),
            Err(AnalysisError::UnexpectedResponseShape { .. })
        ));
    }

    #[test]
    fn blank_topic_is_unexpected_shape() {
        let mut value = sample_json();
        value["tableRows"][4]["topic"] = json!("   ");
        let err = normalize_response(&value.to_string()).unwrap_err();
        assert_eq!(err, AnalysisError::unexpected_shape("tableRows[4].topic is empty"));
    }

    #[test]
    fn empty_rows_are_accepted() {
        let raw = json!({ "tableRows": [], "totals": sample_json()["totals"] }).to_string();
        let result = normalize_response(&raw).unwrap();
        assert!(result.is_empty());
    }
}
