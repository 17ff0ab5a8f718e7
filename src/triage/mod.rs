//! Triage decision engine: structured symptoms → urgency, emergency flag
//! and first-aid steps.

pub mod engine;
pub mod messages;
pub mod types;

pub use engine::decide;
pub use types::{TriageLevel, TriageResult};
