//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a single analysis run.
///
/// Attached to the `analysis` tracing span and carried on each
/// `GenerationRequest`, where model adapters log it next to their own
/// request details. It is not sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(Uuid);

impl AnalysisId {
    /// Creates a new random AnalysisId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an AnalysisId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AnalysisId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_id_new_is_unique() {
        assert_ne!(AnalysisId::new(), AnalysisId::new());
    }

    #[test]
    fn analysis_id_round_trips_through_string() {
        let id = AnalysisId::new();
        let parsed: AnalysisId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn analysis_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<AnalysisId>().is_err());
    }

    #[test]
    fn analysis_id_serializes_transparently() {
        let uuid = Uuid::new_v4();
        let id = AnalysisId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
        assert_eq!(id.as_uuid(), &uuid);
    }
}
