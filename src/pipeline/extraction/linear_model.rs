//! Exported TF-IDF + linear text classifier.
//!
//! The offline trainer exports one JSON file per symptom field. Inference
//! mirrors the trainer's feature pipeline: lowercase, tokens of two or more
//! word characters, word n-grams, raw counts × idf, L2 normalization, then
//! linear scores.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::classifier::{ClassifierError, FieldClassifier};

/// Maximal runs of letters, numbers and underscore, at least two long.
///
/// Combining marks (shadda, harakat) are not word characters here, so
/// "يطرّش" yields "يطر" and drops the trailing single letter.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}_]{2,}").expect("Invalid token pattern"));

fn default_ngram_range() -> (usize, usize) {
    (1, 2)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearTextModel {
    /// Class labels, in the order the scores are laid out.
    pub classes: Vec<String>,
    /// N-gram → feature index.
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature.
    pub idf: Vec<f64>,
    /// One row for a two-class model, one row per class otherwise.
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
}

impl LinearTextModel {
    /// Load and validate a model file.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ClassifierError::ModelNotFound(path.to_path_buf()),
            _ => ClassifierError::ModelLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

        let model: Self = serde_json::from_str(&raw).map_err(|e| ClassifierError::ModelLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        model.validate().map_err(|e| ClassifierError::ModelLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(model)
    }

    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    fn expected_rows(&self) -> usize {
        if self.classes.len() == 2 {
            1
        } else {
            self.classes.len()
        }
    }

    /// Check that every dimension lines up.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        let invalid = |msg: String| Err(ClassifierError::InvalidModel(msg));

        if self.classes.len() < 2 {
            return invalid(format!("need at least 2 classes, got {}", self.classes.len()));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return invalid(format!("bad ngram_range ({min_n}, {max_n})"));
        }

        let n = self.n_features();
        if let Some((term, idx)) = self.vocabulary.iter().find(|(_, &idx)| idx >= n) {
            return invalid(format!("vocabulary entry '{term}' -> {idx} exceeds {n} features"));
        }

        let rows = self.expected_rows();
        if self.coef.len() != rows {
            return invalid(format!("expected {rows} coefficient rows, got {}", self.coef.len()));
        }
        if let Some(row) = self.coef.iter().find(|row| row.len() != n) {
            return invalid(format!("coefficient row has {} entries, expected {n}", row.len()));
        }
        if self.intercept.len() != rows {
            return invalid(format!("expected {rows} intercepts, got {}", self.intercept.len()));
        }

        let all_finite = self
            .idf
            .iter()
            .chain(self.intercept.iter())
            .chain(self.coef.iter().flatten())
            .all(|v| v.is_finite());
        if !all_finite {
            return invalid("non-finite weight".to_string());
        }

        Ok(())
    }

    /// Sparse, L2-normalized TF-IDF features for `text`.
    fn features(&self, text: &str) -> HashMap<usize, f64> {
        let lowered = text.to_lowercase();
        let tokens = tokenize(&lowered);

        let mut counts: HashMap<usize, f64> = HashMap::new();
        let (min_n, max_n) = self.ngram_range;
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                let gram = window.join(" ");
                if let Some(&idx) = self.vocabulary.get(&gram) {
                    *counts.entry(idx).or_insert(0.0) += 1.0;
                }
            }
        }

        for (idx, value) in counts.iter_mut() {
            *value *= self.idf[*idx];
        }

        let norm = counts.values().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in counts.values_mut() {
                *value /= norm;
            }
        }
        counts
    }

    /// Linear decision scores, one per coefficient row.
    pub fn decision_scores(&self, text: &str) -> Vec<f64> {
        let features = self.features(text);
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| features.iter().map(|(&idx, x)| row[idx] * x).sum::<f64>() + b)
            .collect()
    }
}

fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

impl FieldClassifier for LinearTextModel {
    fn predict(&self, text: &str) -> Result<String, ClassifierError> {
        let scores = self.decision_scores(text);
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(ClassifierError::Inference("non-finite decision score".into()));
        }

        let class_idx = if scores.len() == 1 {
            usize::from(scores[0] > 0.0)
        } else {
            // First maximum wins on ties.
            let mut best = 0;
            for (i, s) in scores.iter().enumerate() {
                if *s > scores[best] {
                    best = i;
                }
            }
            best
        };

        self.classes
            .get(class_idx)
            .cloned()
            .ok_or_else(|| ClassifierError::Inference(format!("class index {class_idx} out of range")))
    }
}
