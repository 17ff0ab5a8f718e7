//! Shared types for the HTTP layer.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::core_state::CoreState;
use crate::models::{Bleeding, Breathing, Consciousness, SymptomRecord};
use crate::triage::messages::DISCLAIMER;
use crate::triage::TriageResult;

// ═══════════════════════════════════════════════════════════
// API context: shared state for the router
// ═══════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

// ═══════════════════════════════════════════════════════════
// Request parsing
// ═══════════════════════════════════════════════════════════

/// Parse a request body as JSON, falling back to `Value::Null`.
///
/// Both POST routes accept anything: an unreadable body is an empty report.
pub fn lenient_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

/// The `text` member of an extraction request, or `""`.
pub fn extract_text(body: &Value) -> String {
    body.get("text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// ═══════════════════════════════════════════════════════════
// Responses
// ═══════════════════════════════════════════════════════════

/// `POST /triage` response body.
#[derive(Debug, Serialize)]
pub struct TriageResponse {
    /// Display label with colour badge.
    pub level: &'static str,
    pub call_now: bool,
    pub steps: Vec<String>,
    pub summary: TriageSummary,
    pub disclaimer: &'static str,
}

/// Echo of the key inputs plus the notes behind the decision.
///
/// Inputs that could not be read come back as `null`.
#[derive(Debug, Serialize)]
pub struct TriageSummary {
    pub age: Option<u32>,
    pub breathing: Option<Breathing>,
    pub conscious: Option<Consciousness>,
    pub bleeding: Option<Bleeding>,
    pub notes: Vec<String>,
}

impl TriageResponse {
    pub fn new(record: &SymptomRecord, result: TriageResult) -> Self {
        Self {
            level: result.level.label(),
            call_now: result.call_now,
            steps: result.steps,
            summary: TriageSummary {
                age: record.age,
                breathing: record.breathing,
                conscious: record.conscious,
                bleeding: record.bleeding,
                notes: result.notes,
            },
            disclaimer: DISCLAIMER,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub models_loaded: usize,
    pub models_expected: usize,
    pub model_errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_json_swallows_garbage() {
        assert_eq!(lenient_json(b"not json"), Value::Null);
        assert_eq!(lenient_json(b""), Value::Null);
        assert_eq!(lenient_json(br#"{"a":1}"#)["a"], 1);
    }

    #[test]
    fn extract_text_defaults_to_empty() {
        assert_eq!(extract_text(&Value::Null), "");
        assert_eq!(extract_text(&serde_json::json!({ "text": 42 })), "");
        assert_eq!(extract_text(&serde_json::json!({ "text": "دوخة" })), "دوخة");
    }

    #[test]
    fn summary_echoes_parsed_inputs() {
        let record = SymptomRecord {
            age: Some(30),
            breathing: Some(Breathing::Abnormal),
            ..Default::default()
        };
        let result = crate::triage::decide(&record);
        let json = serde_json::to_value(TriageResponse::new(&record, result)).unwrap();

        assert_eq!(json["summary"]["age"], 30);
        assert_eq!(json["summary"]["breathing"], "abnormal");
        assert!(json["summary"]["conscious"].is_null());
        assert_eq!(json["disclaimer"], DISCLAIMER);
        assert_eq!(json["level"], "🔴 طارئ جدًا");
    }
}
