//! Canonical JSON form of a table ("Copy as JSON").

use crate::domain::tos::TOSResult;

use super::errors::ExportError;

/// Pretty-prints a table with two-space indentation.
///
/// Field order follows the data model declaration order, so the output is
/// stable across runs.
pub fn to_pretty_json(result: &TOSResult) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Parses a table previously produced by [`to_pretty_json`].
pub fn from_json(text: &str) -> Result<TOSResult, ExportError> {
    Ok(serde_json::from_str(text)?)
}
