use crate::charset::CharClassRegistry;

use super::category::CategorySet;
use super::flags::TokenFlags;

/// Assigns decoded tokens to categories
///
/// The classifier holds only a shared reference to the registry, so a single
/// instance can be used from every worker thread at once.
#[derive(Debug, Clone, Copy)]
pub struct TokenClassifier<'r> {
    registry: &'r CharClassRegistry,
}

impl<'r> TokenClassifier<'r> {
    pub fn new(registry: &'r CharClassRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r CharClassRegistry {
        self.registry
    }

    /// Scan a decoded token without applying the assignment rules
    pub fn flags(&self, text: &str) -> TokenFlags {
        TokenFlags::scan(self.registry, text)
    }

    /// Classify one decoded token
    ///
    /// # Arguments
    /// * `text` - The decoded text of a single vocabulary entry
    ///
    /// # Returns
    /// The categories the token belongs to. An empty string yields the empty
    /// set, so the token only ever counts toward the `uncategorized` residual.
    pub fn classify(&self, text: &str) -> CategorySet {
        self.flags(text).categories()
    }
}

impl Default for TokenClassifier<'static> {
    fn default() -> Self {
        Self::new(CharClassRegistry::standard())
    }
}
