use std::sync::Arc;

use super::age::extract_age;
use super::classifier::{ClassifierRegistry, Prediction, RegistryStatus};
use super::keywords::KeywordLexicon;
use super::normalize::normalize_text;
use crate::models::{SymptomField, SymptomRecord};

/// Free text → partial symptom record.
///
/// Stage order is fixed: normalize → keyword rules → default guard →
/// age → classifiers for whatever is still unresolved. Each stage only
/// fills fields earlier stages left empty.
#[derive(Clone)]
pub struct SymptomExtractor {
    lexicon: Arc<KeywordLexicon>,
    registry: Arc<ClassifierRegistry>,
}

impl SymptomExtractor {
    pub fn new(lexicon: Arc<KeywordLexicon>, registry: Arc<ClassifierRegistry>) -> Self {
        Self { lexicon, registry }
    }

    /// Built-in lexicon and no classifiers.
    pub fn rules_only() -> Self {
        Self::new(
            Arc::new(KeywordLexicon::builtin()),
            Arc::new(ClassifierRegistry::empty()),
        )
    }

    pub fn registry_status(&self) -> RegistryStatus {
        self.registry.status()
    }

    /// Extract whatever the text says about the tracked symptom fields.
    ///
    /// Never fails. Fields no stage could resolve are absent.
    pub fn extract(&self, raw_text: &str) -> SymptomRecord {
        // Step 1: Canonical form for every later stage
        let text = normalize_text(raw_text);

        // Step 2: Explicit phrases win over everything else
        let mut record = self.lexicon.apply_rules(&text);

        // Step 3: No keyword at all → negative default, before any model runs
        for value in self.lexicon.guard_defaults(&text) {
            record.assign_if_unresolved(value);
        }

        // Step 4: Age
        record.age = extract_age(&text);

        // Step 5: Classifier fallback
        for field in SymptomField::ALL {
            if record.is_resolved(field) {
                continue;
            }
            match self.registry.predict(field, &text) {
                Prediction::Resolved(value) => record.assign(value),
                Prediction::Unavailable => {
                    tracing::debug!(field = field.as_str(), "No classifier, field left unresolved");
                }
                Prediction::Failed(reason) => {
                    tracing::warn!(field = field.as_str(), reason = %reason, "Classifier failed, field omitted");
                }
            }
        }

        record
    }
}
