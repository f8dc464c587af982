/// Per-token classification into the 13 report categories
///
/// `flags` scans a decoded token once; `classify` wraps the scan and the
/// assignment rules behind a registry-bound classifier.
pub mod category;
pub mod flags;
pub mod classify;

pub use category::{Category, CategoryKind, CategorySet, UnknownCategory};
pub use classify::TokenClassifier;
pub use flags::TokenFlags;
