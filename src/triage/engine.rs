use crate::models::{Bleeding, Consciousness, PainLevel, SymptomRecord, YesNo};

use super::messages::{RedFlagReasons, ScoreNotes, Steps};
use super::types::{TriageLevel, TriageResult};

/// Scores at or above this are seen within hours rather than at home.
pub const MODERATE_SCORE_THRESHOLD: u32 = 3;

/// Ages below this are a sensitive group (0 means "not given").
const YOUNG_AGE_LIMIT: u32 = 5;
/// Ages above this are a sensitive group.
const ELDERLY_AGE_LIMIT: u32 = 65;

/// Decide urgency, emergency contact and first-aid steps for one record.
///
/// Pure and infallible: missing fields are read with their defaults.
/// Red flags short-circuit; otherwise the severity score splits the
/// remaining cases into two tiers.
pub fn decide(record: &SymptomRecord) -> TriageResult {
    let reasons = red_flags(record);
    if !reasons.is_empty() {
        tracing::debug!(reasons = reasons.len(), "Red flag triage");
        return very_urgent(record, reasons);
    }

    let (score, notes) = severity_score(record);
    let result = if score >= MODERATE_SCORE_THRESHOLD {
        moderate(record, score, notes)
    } else {
        simple(record, score, notes)
    };
    tracing::debug!(score, level = result.level.as_str(), "Scored triage");
    result
}

/// Every red-flag condition that holds, in fixed order.
pub fn red_flags(record: &SymptomRecord) -> Vec<&'static str> {
    let mut reasons = Vec::new();
    if record.breathing().is_impaired() {
        reasons.push(RedFlagReasons::BREATHING);
    }
    if record.conscious() == Consciousness::No {
        reasons.push(RedFlagReasons::UNCONSCIOUS);
    }
    if record.bleeding() == Bleeding::Severe {
        reasons.push(RedFlagReasons::SEVERE_BLEEDING);
    }
    if record.chest_pain() == YesNo::Yes {
        reasons.push(RedFlagReasons::CHEST_PAIN);
    }
    reasons
}

/// Additive severity score with one note per contribution.
pub fn severity_score(record: &SymptomRecord) -> (u32, Vec<&'static str>) {
    let mut score = 0;
    let mut notes = Vec::new();

    if record.bleeding() == Bleeding::Mild {
        score += 1;
        notes.push(ScoreNotes::MILD_BLEEDING);
    }

    let age = record.scoring_age();
    if age != 0 && (age < YOUNG_AGE_LIMIT || age > ELDERLY_AGE_LIMIT) {
        score += 1;
        notes.push(ScoreNotes::SENSITIVE_AGE);
    }

    match record.pain_level() {
        PainLevel::Moderate => {
            score += 1;
            notes.push(ScoreNotes::MODERATE_PAIN);
        }
        PainLevel::Severe => {
            score += 2;
            notes.push(ScoreNotes::SEVERE_PAIN);
        }
        PainLevel::None | PainLevel::Mild => {}
    }

    if record.vomiting() == YesNo::Yes {
        score += 1;
        notes.push(ScoreNotes::VOMITING);
    }

    if record.dizziness() == YesNo::Yes {
        score += 1;
        notes.push(ScoreNotes::DIZZINESS);
    }

    (score, notes)
}

fn very_urgent(record: &SymptomRecord, reasons: Vec<&'static str>) -> TriageResult {
    let mut steps = vec![Steps::CALL_EMERGENCY];
    if record.breathing().is_impaired() {
        steps.push(Steps::CPR);
    }
    if record.bleeding() == Bleeding::Severe {
        steps.push(Steps::DIRECT_PRESSURE);
    }
    steps.push(Steps::NOTHING_BY_MOUTH);

    TriageResult {
        level: TriageLevel::VeryUrgent,
        call_now: true,
        steps: to_owned(steps),
        notes: to_owned(reasons),
        score: None,
    }
}

fn moderate(record: &SymptomRecord, score: u32, notes: Vec<&'static str>) -> TriageResult {
    let mut steps = vec![Steps::VISIT_WITHIN_HOURS];
    if record.bleeding() == Bleeding::Mild {
        steps.push(Steps::WOUND_CARE);
    }
    if matches!(record.pain_level(), PainLevel::Moderate | PainLevel::Severe) {
        steps.push(Steps::REST_AND_IMMOBILIZE);
    }
    if record.vomiting() == YesNo::Yes {
        steps.push(Steps::SMALL_SIPS);
    }
    steps.push(Steps::ESCALATE_IF_WORSE);

    TriageResult {
        level: TriageLevel::Moderate,
        call_now: false,
        steps: to_owned(steps),
        notes: to_owned(notes),
        score: Some(score),
    }
}

fn simple(record: &SymptomRecord, score: u32, notes: Vec<&'static str>) -> TriageResult {
    let mut steps = vec![Steps::HOME_CARE];
    if record.bleeding() == Bleeding::Mild {
        steps.push(Steps::WOUND_CARE);
    }
    if record.pain_level() == PainLevel::Mild {
        steps.push(Steps::MILD_ANALGESIC);
    }
    if record.dizziness() == YesNo::Yes {
        steps.push(Steps::DIZZINESS_REST);
    }
    steps.push(Steps::SEE_ER_IF_NEW_SYMPTOMS);

    TriageResult {
        level: TriageLevel::Simple,
        call_now: false,
        steps: to_owned(steps),
        notes: to_owned(notes),
        score: Some(score),
    }
}

fn to_owned(items: Vec<&'static str>) -> Vec<String> {
    items.into_iter().map(str::to_string).collect()
}
