//! Transport-agnostic application state.
//!
//! `CoreState` is built once at start-up and shared behind an `Arc` by
//! every request handler. Everything inside is read-only after
//! construction, so no locking is needed.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::AppConfig;
use crate::models::SymptomRecord;
use crate::pipeline::extraction::{
    ClassifierRegistry, ExtractionError, KeywordLexicon, RegistryStatus, SymptomExtractor,
};
use crate::triage::{self, TriageResult};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Lexicon error: {0}")]
    Lexicon(#[from] ExtractionError),
    #[error("Extraction timed out after {0:?}")]
    ExtractTimeout(Duration),
    #[error("Extraction task failed: {0}")]
    TaskFailed(String),
}

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    extractor: SymptomExtractor,
    pub extract_timeout: Duration,
}

impl CoreState {
    /// Load the lexicon and classifiers named by `config`.
    ///
    /// A bad lexicon override aborts start-up. Missing or corrupt models
    /// do not; they show up in `health()`.
    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        let lexicon = match &config.lexicon_path {
            Some(path) => KeywordLexicon::from_json_file(path)?,
            None => KeywordLexicon::builtin(),
        };

        let registry = ClassifierRegistry::load_from_dir(&config.models_dir);
        let status = registry.status();
        tracing::info!(
            models_dir = %config.models_dir.display(),
            loaded = status.models_loaded,
            expected = status.models_expected,
            "Classifier registry ready"
        );

        Ok(Self::new(
            SymptomExtractor::new(Arc::new(lexicon), Arc::new(registry)),
            config.extract_timeout,
        ))
    }

    pub fn new(extractor: SymptomExtractor, extract_timeout: Duration) -> Self {
        Self {
            extractor,
            extract_timeout,
        }
    }

    pub fn triage(&self, record: &SymptomRecord) -> TriageResult {
        triage::decide(record)
    }

    /// Synchronous extraction on the calling thread.
    pub fn extract(&self, text: &str) -> SymptomRecord {
        self.extractor.extract(text)
    }

    /// Extraction on the blocking pool, bounded by `extract_timeout`.
    pub async fn extract_bounded(&self, text: String) -> Result<SymptomRecord, CoreError> {
        let extractor = self.extractor.clone();
        let task = tokio::task::spawn_blocking(move || extractor.extract(&text));

        match tokio::time::timeout(self.extract_timeout, task).await {
            Ok(Ok(record)) => Ok(record),
            Ok(Err(e)) => Err(CoreError::TaskFailed(e.to_string())),
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.extract_timeout.as_millis() as u64,
                    "Extraction timed out"
                );
                Err(CoreError::ExtractTimeout(self.extract_timeout))
            }
        }
    }

    pub fn health(&self) -> RegistryStatus {
        self.extractor.registry_status()
    }
}
