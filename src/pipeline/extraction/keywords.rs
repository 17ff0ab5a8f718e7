use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::normalize::normalize_text;
use super::ExtractionError;
use crate::models::{Bleeding, Breathing, Consciousness, FieldValue, PainLevel, SymptomRecord, YesNo};

/// Curated trigger phrases, matched by substring against normalized text.
///
/// Phrases are stored normalized so they compare in the same canonical form
/// as the text. Missing lists in an override file fall back to the built-in
/// lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordLexicon {
    // Presence lists: only used by the default guard.
    pub bleeding: Vec<String>,
    pub vomiting: Vec<String>,
    pub dizziness: Vec<String>,
    pub chest_pain: Vec<String>,

    pub breathing_bad: Vec<String>,
    pub breathing_good: Vec<String>,
    /// Within "bad": laboured breathing → abnormal.
    pub breathing_difficulty: Vec<String>,
    /// Within "bad": stopped breathing → no.
    pub breathing_cessation: Vec<String>,

    pub conscious_no: Vec<String>,
    pub conscious_yes: Vec<String>,

    pub pain_severe: Vec<String>,
    pub pain_moderate: Vec<String>,
    pub pain_mild: Vec<String>,
    pub pain_none: Vec<String>,
}

static BUILTIN: LazyLock<KeywordLexicon> = LazyLock::new(|| {
    KeywordLexicon {
        bleeding: phrases(&[
            "نزيف", "ينزف", "نزف", "دم", "جرح", "مجرح", "قطع", "دم كثير", "دم خفيف",
            "ينقط دم", "ينزف شوي",
        ]),
        vomiting: phrases(&[
            "قيء", "استفراغ", "يتقيأ", "تقيؤ", "يرجع", "ترجيع", "طرش", "تطريش", "طرّش",
            "يطرش", "يطرّش", "يطـرش",
        ]),
        dizziness: phrases(&["دوخه", "دوار", "يدوخ", "دوخة"]),
        chest_pain: phrases(&["صدر", "الم صدر", "الم بالصدر", "وجع صدر", "ضيق صدر"]),
        breathing_bad: phrases(&[
            "ما يتنفس", "لا يتنفس", "انقطاع تنفس", "اختناق", "صعوبه تنفس", "ضيق تنفس",
            "تنفس بصعوبه",
        ]),
        breathing_good: phrases(&["يتنفس طبيعي", "تنفسه طبيعي", "يتنفس عادي", "يتنفس"]),
        breathing_difficulty: phrases(&["صعوبه", "ضيق", "بصعوبه"]),
        breathing_cessation: phrases(&["لا يتنفس", "ما يتنفس", "انقطاع"]),
        conscious_no: phrases(&["فاقد وعي", "مغمي عليه", "اغمى عليه", "ما يرد", "غير واعي"]),
        conscious_yes: phrases(&["واعي", "يرد", "يتكلم", "يتجاوب"]),
        pain_severe: phrases(&["الم شديد", "يوجعه مره", "يوجعه مرة"]),
        pain_moderate: phrases(&["الم متوسط"]),
        pain_mild: phrases(&["الم بسيط", "الم خفيف"]),
        pain_none: phrases(&["بدون الم", "ما فيه الم"]),
    }
});

fn phrases(list: &[&str]) -> Vec<String> {
    list.iter().map(|p| normalize_text(p)).collect()
}

impl Default for KeywordLexicon {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl KeywordLexicon {
    /// The built-in Gulf-Arabic lexicon.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Load an override lexicon from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ExtractionError> {
        let raw = std::fs::read_to_string(path)?;
        let mut lexicon: Self = serde_json::from_str(&raw)
            .map_err(|e| ExtractionError::LexiconParse(e.to_string()))?;
        lexicon.normalize_phrases();
        lexicon.validate()?;
        tracing::info!(path = %path.display(), "Keyword lexicon loaded");
        Ok(lexicon)
    }

    fn lists_mut(&mut self) -> [(&'static str, &mut Vec<String>); 14] {
        [
            ("bleeding", &mut self.bleeding),
            ("vomiting", &mut self.vomiting),
            ("dizziness", &mut self.dizziness),
            ("chest_pain", &mut self.chest_pain),
            ("breathing_bad", &mut self.breathing_bad),
            ("breathing_good", &mut self.breathing_good),
            ("breathing_difficulty", &mut self.breathing_difficulty),
            ("breathing_cessation", &mut self.breathing_cessation),
            ("conscious_no", &mut self.conscious_no),
            ("conscious_yes", &mut self.conscious_yes),
            ("pain_severe", &mut self.pain_severe),
            ("pain_moderate", &mut self.pain_moderate),
            ("pain_mild", &mut self.pain_mild),
            ("pain_none", &mut self.pain_none),
        ]
    }

    fn normalize_phrases(&mut self) {
        for (_, list) in self.lists_mut() {
            for phrase in list.iter_mut() {
                *phrase = normalize_text(phrase);
            }
        }
    }

    /// An empty phrase would match every text.
    fn validate(&mut self) -> Result<(), ExtractionError> {
        for (name, list) in self.lists_mut() {
            if list.iter().any(|p| p.is_empty()) {
                return Err(ExtractionError::EmptyPhrase(name.to_string()));
            }
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════
    // Keyword rules
    // ═══════════════════════════════════════════════════════════

    /// Resolve breathing, consciousness and pain level from explicit phrases.
    ///
    /// Only fields with a matching phrase are set. These assignments take
    /// precedence over every later stage.
    pub fn apply_rules(&self, text: &str) -> SymptomRecord {
        SymptomRecord {
            breathing: self.breathing_rule(text),
            conscious: self.conscious_rule(text),
            pain_level: self.pain_rule(text),
            ..Default::default()
        }
    }

    fn breathing_rule(&self, text: &str) -> Option<Breathing> {
        if contains_any(text, &self.breathing_bad) {
            // Difficulty outranks cessation when both markers appear.
            if contains_any(text, &self.breathing_difficulty) {
                Some(Breathing::Abnormal)
            } else if contains_any(text, &self.breathing_cessation) {
                Some(Breathing::No)
            } else {
                Some(Breathing::Abnormal)
            }
        } else if contains_any(text, &self.breathing_good) {
            Some(Breathing::Yes)
        } else {
            None
        }
    }

    fn conscious_rule(&self, text: &str) -> Option<Consciousness> {
        if contains_any(text, &self.conscious_no) {
            Some(Consciousness::No)
        } else if contains_any(text, &self.conscious_yes) {
            Some(Consciousness::Yes)
        } else {
            None
        }
    }

    fn pain_rule(&self, text: &str) -> Option<PainLevel> {
        [
            (&self.pain_severe, PainLevel::Severe),
            (&self.pain_moderate, PainLevel::Moderate),
            (&self.pain_mild, PainLevel::Mild),
            (&self.pain_none, PainLevel::None),
        ]
        .into_iter()
        .find(|(list, _)| contains_any(text, list))
        .map(|(_, level)| level)
    }

    // ═══════════════════════════════════════════════════════════
    // Default guard
    // ═══════════════════════════════════════════════════════════

    /// Negative defaults for bleeding, vomiting, dizziness and chest pain
    /// when the text carries no keyword for them at all.
    ///
    /// Breathing, consciousness and pain level are not guarded.
    pub fn guard_defaults(&self, text: &str) -> Vec<FieldValue> {
        let mut defaults = Vec::new();
        if !contains_any(text, &self.bleeding) {
            defaults.push(FieldValue::Bleeding(Bleeding::None));
        }
        if !contains_any(text, &self.vomiting) {
            defaults.push(FieldValue::Vomiting(YesNo::No));
        }
        if !contains_any(text, &self.dizziness) {
            defaults.push(FieldValue::Dizziness(YesNo::No));
        }
        if !contains_any(text, &self.chest_pain) {
            defaults.push(FieldValue::ChestPain(YesNo::No));
        }
        defaults
    }
}

fn contains_any(text: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|p| text.contains(p.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(raw: &str) -> SymptomRecord {
        KeywordLexicon::builtin().apply_rules(&normalize_text(raw))
    }

    fn guard(raw: &str) -> Vec<FieldValue> {
        KeywordLexicon::builtin().guard_defaults(&normalize_text(raw))
    }

    // =================================================================
    // BREATHING
    // =================================================================

    #[test]
    fn difficulty_marker_is_abnormal() {
        assert_eq!(rules("عنده ضيق تنفس").breathing, Some(Breathing::Abnormal));
        assert_eq!(rules("يتنفس بصعوبه").breathing, Some(Breathing::Abnormal));
    }

    #[test]
    fn cessation_marker_is_no() {
        assert_eq!(rules("طاح وما يتنفس").breathing, Some(Breathing::No));
        assert_eq!(rules("انقطاع تنفس").breathing, Some(Breathing::No));
    }

    #[test]
    fn difficulty_outranks_cessation() {
        assert_eq!(
            rules("ما يتنفس وعنده ضيق").breathing,
            Some(Breathing::Abnormal)
        );
    }

    #[test]
    fn bad_without_sub_marker_defaults_to_abnormal() {
        assert_eq!(rules("حالة اختناق").breathing, Some(Breathing::Abnormal));
    }

    #[test]
    fn bad_phrases_checked_before_good() {
        // "ما يتنفس" also contains the good phrase "يتنفس"
        assert_eq!(rules("ما يتنفس").breathing, Some(Breathing::No));
    }

    #[test]
    fn good_breathing_is_yes() {
        assert_eq!(rules("يتنفس طبيعي").breathing, Some(Breathing::Yes));
        assert_eq!(rules("تنفسه طبيعي").breathing, Some(Breathing::Yes));
    }

    #[test]
    fn no_breathing_phrase_leaves_field_unresolved() {
        assert_eq!(rules("طاح من الدرج").breathing, None);
    }

    // =================================================================
    // CONSCIOUSNESS
    // =================================================================

    #[test]
    fn unconscious_phrases() {
        assert_eq!(rules("مغمي عليه").conscious, Some(Consciousness::No));
        assert_eq!(rules("أغمى عليه فجأة").conscious, Some(Consciousness::No));
        // "ما يرد" also contains the yes-phrase "يرد"
        assert_eq!(rules("ما يرد علينا").conscious, Some(Consciousness::No));
        // "غير واعي" also contains "واعي"
        assert_eq!(rules("غير واعي").conscious, Some(Consciousness::No));
    }

    #[test]
    fn conscious_phrases() {
        assert_eq!(rules("واعي ويتكلم").conscious, Some(Consciousness::Yes));
    }

    // =================================================================
    // PAIN
    // =================================================================

    #[test]
    fn pain_tiers() {
        assert_eq!(rules("ألم شديد في رجله").pain_level, Some(PainLevel::Severe));
        assert_eq!(rules("يوجعه مرة").pain_level, Some(PainLevel::Severe));
        assert_eq!(rules("الم متوسط").pain_level, Some(PainLevel::Moderate));
        assert_eq!(rules("ألم خفيف").pain_level, Some(PainLevel::Mild));
        assert_eq!(rules("بدون ألم").pain_level, Some(PainLevel::None));
        assert_eq!(rules("طاح").pain_level, None);
    }

    #[test]
    fn severe_pain_wins_over_lower_tiers() {
        assert_eq!(
            rules("كان الم بسيط وصار الم شديد").pain_level,
            Some(PainLevel::Severe)
        );
    }

    #[test]
    fn rules_never_set_guarded_fields() {
        let r = rules("نزيف شديد ويطرش ودوخة وألم صدر");
        assert_eq!(r.bleeding, None);
        assert_eq!(r.vomiting, None);
        assert_eq!(r.dizziness, None);
        assert_eq!(r.chest_pain, None);
    }

    // =================================================================
    // DEFAULT GUARD
    // =================================================================

    #[test]
    fn guard_fills_all_four_without_keywords() {
        let defaults = guard("طاح من الدرج");
        assert_eq!(
            defaults,
            vec![
                FieldValue::Bleeding(Bleeding::None),
                FieldValue::Vomiting(YesNo::No),
                FieldValue::Dizziness(YesNo::No),
                FieldValue::ChestPain(YesNo::No),
            ]
        );
    }

    #[test]
    fn guard_skips_fields_with_keywords() {
        let defaults = guard("فيه دم ويدوخ");
        assert!(!defaults.contains(&FieldValue::Bleeding(Bleeding::None)));
        assert!(!defaults.contains(&FieldValue::Dizziness(YesNo::No)));
        assert!(defaults.contains(&FieldValue::Vomiting(YesNo::No)));
        assert!(defaults.contains(&FieldValue::ChestPain(YesNo::No)));
    }

    #[test]
    fn substring_semantics_match_inside_words() {
        // "دم" inside "دموع" counts as a bleeding keyword
        let defaults = guard("عيونه فيها دموع");
        assert!(!defaults.contains(&FieldValue::Bleeding(Bleeding::None)));
    }

    #[test]
    fn hamza_vomiting_phrase_defers_to_classifier_instead_of_defaulting_no() {
        // "يتقيأ" normalizes to "يتقيا" on both sides. Matched against the
        // raw phrase it never hits folded text, and the guard would answer
        // vomiting=no; here it counts as a keyword and the field is left to
        // the classifier.
        let defaults = guard("يتقيأ من الصباح");
        assert!(!defaults.contains(&FieldValue::Vomiting(YesNo::No)));
    }

    // =================================================================
    // OVERRIDE FILES
    // =================================================================

    #[test]
    fn override_file_merges_with_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, r#"{ "dizziness": ["راسه يلف"] }"#).unwrap();

        let lexicon = KeywordLexicon::from_json_file(&path).unwrap();
        assert_eq!(lexicon.dizziness, vec!["راسه يلف".to_string()]);
        assert_eq!(lexicon.bleeding, KeywordLexicon::builtin().bleeding);
    }

    #[test]
    fn override_phrases_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, r#"{ "pain_mild": ["ألم  خفيف!"] }"#).unwrap();

        let lexicon = KeywordLexicon::from_json_file(&path).unwrap();
        assert_eq!(lexicon.pain_mild, vec!["الم خفيف".to_string()]);
    }

    #[test]
    fn override_rejects_empty_phrase() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, r#"{ "bleeding": ["دم", "!!"] }"#).unwrap();

        let err = KeywordLexicon::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyPhrase(ref name) if name == "bleeding"));
    }

    #[test]
    fn override_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = KeywordLexicon::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::LexiconParse(_)));
    }

    #[test]
    fn missing_override_file_is_io_error() {
        let err = KeywordLexicon::from_json_file(Path::new("/nonexistent/lexicon.json"))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Io(_)));
    }
}
