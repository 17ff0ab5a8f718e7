pub mod normalize;
pub mod age;
pub mod keywords;
pub mod linear_model;
pub mod classifier;
pub mod orchestrator;

pub use normalize::normalize_text;
pub use age::extract_age;
pub use keywords::KeywordLexicon;
pub use linear_model::LinearTextModel;
pub use classifier::*;
pub use orchestrator::SymptomExtractor;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lexicon parsing failed: {0}")]
    LexiconParse(String),

    #[error("Empty phrase in lexicon list '{0}'")]
    EmptyPhrase(String),
}
