use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TriageLevel
// ---------------------------------------------------------------------------

/// Urgency tier, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TriageLevel {
    /// Home care and monitoring.
    Simple,
    /// Clinic or emergency visit within hours.
    Moderate,
    /// Call emergency services now.
    VeryUrgent,
}

impl TriageLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Moderate => "moderate",
            Self::VeryUrgent => "very_urgent",
        }
    }

    /// Patient-facing badge text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Simple => "🟢 بسيط",
            Self::Moderate => "🟡 متوسط",
            Self::VeryUrgent => "🔴 طارئ جدًا",
        }
    }
}

// ---------------------------------------------------------------------------
// TriageResult
// ---------------------------------------------------------------------------

/// Outcome of one triage decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TriageResult {
    pub level: TriageLevel,
    /// Whether emergency services should be contacted immediately.
    pub call_now: bool,
    /// Ordered first-aid instructions.
    pub steps: Vec<String>,
    /// Red-flag reasons, or the scoring notes that explain the level.
    pub notes: Vec<String>,
    /// Severity score; `None` when a red flag short-circuited scoring.
    pub score: Option<u32>,
}
