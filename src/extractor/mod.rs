mod openai;

pub use openai::OpenAiCompletion;

use crate::error::{model_output_error, AppResult};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Structured event extracted from free-form text.
///
/// Fields the model cannot determine are null rather than omitted or
/// fabricated. `start`/`end` are kept as the ISO 8601 strings the model
/// produced so the response body can be forwarded verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EventCandidate {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    /// Best-effort IANA timezone identifier, not validated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub description: Option<String>,
}

/// Completion service used to extract event fields from text.
///
/// Any provider honoring the same prompt contract can stand in here;
/// tests substitute a mock.
#[async_trait::async_trait]
pub trait CompletionService: Send + Sync + 'static {
    /// Ask the model to extract event fields from `text`, returning its raw output
    async fn complete(&self, text: &str) -> AppResult<String>;
}

/// Validate raw model output before it is forwarded to the client.
///
/// The output must parse as a JSON object matching [`EventCandidate`],
/// and `start`/`end`, when present, must pass the strict datetime check.
pub fn validate_output(raw: &str) -> AppResult<EventCandidate> {
    let candidate: EventCandidate = serde_json::from_str(raw)
        .map_err(|e| model_output_error(&format!("response is not a valid JSON object: {e}")))?;

    if let Some(start) = &candidate.start {
        parse_event_datetime(start).ok_or_else(|| {
            model_output_error(&format!("'start' is not an ISO 8601 datetime: {start}"))
        })?;
    }
    if let Some(end) = &candidate.end {
        parse_event_datetime(end).ok_or_else(|| {
            model_output_error(&format!("'end' is not an ISO 8601 datetime: {end}"))
        })?;
    }

    Ok(candidate)
}

/// Strict datetime check for model-produced timestamps.
///
/// Accepts RFC 3339 (trailing `Z` or numeric offset) or a naive
/// `YYYY-MM-DDTHH:MM:SS` with optional fractional seconds. Bare dates and
/// free-text strings are rejected.
pub fn parse_event_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()
}
