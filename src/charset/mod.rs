/// Character classes and the per-character predicates built on them
///
/// The registry is immutable constant data; predicates are methods on it so a
/// classifier only ever needs a shared reference.
pub mod registry;
pub mod predicates;

pub use registry::{CharClass, CharClassRegistry};
pub use predicates::is_complete_japanese_utf8;
