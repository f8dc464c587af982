/// Parallel driver over a vocabulary
pub mod analyzer;
/// Structural checks on a finished result
pub mod invariants;
/// Persisted result shape and the single-writer merge
pub mod result;

pub use analyzer::{analyze, analyze_with_registry};
pub use invariants::InvariantViolation;
pub use result::{AnalysisDetails, AnalysisResult, RunInfo, aggregate};
