use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use super::linear_model::LinearTextModel;
use crate::models::{FieldValue, SymptomField};

/// Model load and inference errors.
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Missing model file: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("Failed to load {}: {reason}", .path.display())]
    ModelLoad { path: PathBuf, reason: String },

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}

/// A pre-trained text classifier for one symptom field.
pub trait FieldClassifier: Send + Sync {
    /// Predict a single categorical label for normalized text.
    fn predict(&self, text: &str) -> Result<String, ClassifierError>;
}

/// Outcome of asking the registry about one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
    /// The classifier produced a valid label for the field.
    Resolved(FieldValue),
    /// No classifier is registered for the field.
    Unavailable,
    /// Inference failed or produced a label outside the field's variants.
    Failed(String),
}

/// Registry health metadata for observability.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RegistryStatus {
    pub models_loaded: usize,
    pub models_expected: usize,
    pub model_errors: Vec<String>,
}

/// Per-field classifiers, read-only once built.
///
/// Built at start-up and injected into the extraction pipeline; fields
/// without a classifier simply report `Prediction::Unavailable`.
#[derive(Default)]
pub struct ClassifierRegistry {
    classifiers: HashMap<SymptomField, Box<dyn FieldClassifier>>,
    load_errors: Vec<String>,
}

impl ClassifierRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register (or replace) the classifier for `field`.
    pub fn with_classifier(
        mut self,
        field: SymptomField,
        classifier: impl FieldClassifier + 'static,
    ) -> Self {
        self.classifiers.insert(field, Box::new(classifier));
        self
    }

    /// Load `<dir>/<field>.json` for every tracked field.
    ///
    /// Never fails: a missing or corrupt file is recorded as a load error
    /// and the field stays unavailable.
    pub fn load_from_dir(dir: &Path) -> Self {
        let mut registry = Self::empty();

        for field in SymptomField::ALL {
            let path = model_path(dir, field);
            match LinearTextModel::load(&path) {
                Ok(model) => {
                    tracing::info!(
                        field = field.as_str(),
                        classes = model.classes.len(),
                        features = model.n_features(),
                        "Classifier loaded"
                    );
                    registry.classifiers.insert(field, Box::new(model));
                }
                Err(e) => {
                    tracing::warn!(field = field.as_str(), error = %e, "Classifier unavailable");
                    registry.load_errors.push(e.to_string());
                }
            }
        }

        registry
    }

    pub fn has(&self, field: SymptomField) -> bool {
        self.classifiers.contains_key(&field)
    }

    /// Ask the classifier for `field` to label `text`.
    pub fn predict(&self, field: SymptomField, text: &str) -> Prediction {
        let Some(classifier) = self.classifiers.get(&field) else {
            return Prediction::Unavailable;
        };

        let label = match classifier.predict(text) {
            Ok(label) => label,
            Err(e) => return Prediction::Failed(e.to_string()),
        };

        match field.parse_label(label.trim()) {
            Ok(value) => Prediction::Resolved(value),
            Err(e) => Prediction::Failed(e.to_string()),
        }
    }

    pub fn status(&self) -> RegistryStatus {
        RegistryStatus {
            models_loaded: self.classifiers.len(),
            models_expected: SymptomField::ALL.len(),
            model_errors: self.load_errors.clone(),
        }
    }
}

/// Where the model for `field` lives under `dir`.
pub fn model_path(dir: &Path, field: SymptomField) -> PathBuf {
    dir.join(format!("{}.json", field.as_str()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Always returns the same label.
    pub struct FixedClassifier(pub &'static str);

    impl FieldClassifier for FixedClassifier {
        fn predict(&self, _text: &str) -> Result<String, ClassifierError> {
            Ok(self.0.to_string())
        }
    }

    /// Always fails at inference time.
    pub struct BrokenClassifier;

    impl FieldClassifier for BrokenClassifier {
        fn predict(&self, _text: &str) -> Result<String, ClassifierError> {
            Err(ClassifierError::Inference("model exploded".into()))
        }
    }

    /// Panics at inference time.
    pub struct PanickingClassifier;

    impl FieldClassifier for PanickingClassifier {
        fn predict(&self, _text: &str) -> Result<String, ClassifierError> {
            panic!("weights corrupted in memory")
        }
    }

    /// Sleeps before answering.
    pub struct SlowClassifier(pub std::time::Duration);

    impl FieldClassifier for SlowClassifier {
        fn predict(&self, _text: &str) -> Result<String, ClassifierError> {
            std::thread::sleep(self.0);
            Ok("none".to_string())
        }
    }
}
