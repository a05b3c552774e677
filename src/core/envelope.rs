//! JSON bodies returned by the cron endpoints

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::core::pipeline::StepOutcome;

/// Format a timestamp as ISO-8601 UTC with millisecond precision
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Body of a successful run.
///
/// Serialized as `success`, then one field per step in pipeline order,
/// then `executed_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessEnvelope {
    results: Vec<(&'static str, Value)>,
    executed_at: DateTime<Utc>,
}

impl SuccessEnvelope {
    pub fn new(outcomes: Vec<StepOutcome>, executed_at: DateTime<Utc>) -> Self {
        let results = outcomes
            .into_iter()
            .map(|outcome| (outcome.step.field, outcome.value))
            .collect();
        Self {
            results,
            executed_at,
        }
    }
}

impl Serialize for SuccessEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.results.len() + 2))?;
        map.serialize_entry("success", &true)?;
        for (field, value) in &self.results {
            map.serialize_entry(field, value)?;
        }
        map.serialize_entry("executed_at", &iso_timestamp(self.executed_at))?;
        map.end()
    }
}

/// Body of every rejected or failed request
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
