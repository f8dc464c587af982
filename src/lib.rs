//! Tokenizer vocabulary analysis for Japanese text
//!
//! Every non-special token of a vocabulary is decoded and classified into
//! overlapping categories (Japanese scripts, English, digits, symbol runs).
//! The result is saved as a JSON report plus per-category id lists, which
//! can then be turned into logit biases for generation.

pub mod analysis;
pub mod bias;
pub mod charset;
pub mod classifier;
pub mod core;
pub mod report;
pub mod vocab;

pub use analysis::{AnalysisResult, analyze};
pub use bias::LogitBias;
pub use charset::{CharClassRegistry, is_complete_japanese_utf8};
pub use classifier::{Category, CategorySet, TokenClassifier};
pub use crate::core::{AnalysisOptions, ReportOptions};
pub use vocab::{Vocabulary, load_vocabulary};
