/// Biasing generation toward a category of tokens
///
/// Id lists produced by the analyzer become additive logit biases, either
/// applied directly to a logits row or exported as the `{ "id": bias }` map
/// that HTTP generation APIs accept.
pub mod ids;

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::classifier::Category;
use crate::report::ReportError;

pub use ids::{load_bias_ids, resolve_ids_file};

#[derive(Debug, Error)]
pub enum BiasError {
    #[error("Token id file not found: {0}")]
    NotFound(PathBuf),

    #[error("Category {category} is missing from report {path}")]
    MissingCategory { category: Category, path: PathBuf },

    #[error("Bias limit must be a finite number, got {0}")]
    InvalidLimit(f32),

    #[error("Could not read token ids from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ReportError,
    },
}

/// Additive bias per token id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogitBias {
    biases: BTreeMap<u32, f32>,
}

impl LogitBias {
    pub fn new() -> Self {
        Self::default()
    }

    /// The same bias for every id
    pub fn uniform<I: IntoIterator<Item = u32>>(ids: I, bias: f32) -> Self {
        Self { biases: ids.into_iter().map(|id| (id, bias)).collect() }
    }

    pub fn insert(&mut self, token_id: u32, bias: f32) {
        self.biases.insert(token_id, bias);
    }

    pub fn get(&self, token_id: u32) -> Option<f32> {
        self.biases.get(&token_id).copied()
    }

    pub fn len(&self) -> usize {
        self.biases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biases.is_empty()
    }

    /// Add each bias to its logit in place
    ///
    /// Ids at or beyond `logits.len()` are skipped, so a bias built from one
    /// vocabulary can be applied to a model with a smaller output layer.
    pub fn apply(&self, logits: &mut [f32]) {
        for (&token_id, &bias) in &self.biases {
            if let Some(logit) = logits.get_mut(token_id as usize) {
                *logit += bias;
            }
        }
    }

    /// Clamp every bias into `[-limit, limit]`
    ///
    /// # Returns
    /// The clamped biases and whether any value had to change
    ///
    /// # Errors
    /// `InvalidLimit` when `limit` is NaN or infinite
    pub fn clamped(&self, limit: f32) -> Result<(Self, bool), BiasError> {
        if !limit.is_finite() {
            return Err(BiasError::InvalidLimit(limit));
        }
        let limit = limit.abs();
        let mut changed = false;
        let biases = self
            .biases
            .iter()
            .map(|(&id, &bias)| {
                let clamped = bias.clamp(-limit, limit);
                changed |= clamped != bias;
                (id, clamped)
            })
            .collect();
        Ok((Self { biases }, changed))
    }

    /// `{ "<id>": bias }` with string keys (keys sort as strings)
    pub fn to_api_map(&self) -> BTreeMap<String, f32> {
        self.biases.iter().map(|(id, bias)| (id.to_string(), *bias)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        let bias = LogitBias::uniform([1, 3, 99], 1.5);
        let mut logits = vec![0.0, 0.0, -1.0, 2.0];
        bias.apply(&mut logits);
        assert_eq!(logits, vec![0.0, 1.5, -1.0, 3.5]);
    }

    #[test]
    fn test_apply_empty() {
        let mut logits = vec![0.25; 3];
        LogitBias::new().apply(&mut logits);
        assert_eq!(logits, vec![0.25; 3]);
    }

    #[test]
    fn test_clamped() {
        let mut bias = LogitBias::uniform([1, 2], 150.0);
        bias.insert(3, -250.0);
        bias.insert(4, 5.0);
        let (clamped, changed) = bias.clamped(100.0).unwrap();
        assert!(changed);
        assert_eq!(clamped.get(1), Some(100.0));
        assert_eq!(clamped.get(3), Some(-100.0));
        assert_eq!(clamped.get(4), Some(5.0));

        let (same, changed) = LogitBias::uniform([1], 5.0).clamped(100.0).unwrap();
        assert!(!changed);
        assert_eq!(same.get(1), Some(5.0));
    }

    #[test]
    fn test_clamped_rejects_non_finite_limit() {
        let bias = LogitBias::uniform([1], 5.0);
        assert!(matches!(bias.clamped(f32::NAN), Err(BiasError::InvalidLimit(_))));
        assert!(matches!(bias.clamped(f32::INFINITY), Err(BiasError::InvalidLimit(_))));
        assert!(matches!(bias.clamped(f32::NEG_INFINITY), Err(BiasError::InvalidLimit(_))));

        let (zeroed, changed) = bias.clamped(-0.0).unwrap();
        assert!(changed);
        assert_eq!(zeroed.get(1), Some(0.0));
    }

    #[test]
    fn test_to_api_map() {
        let map = LogitBias::uniform([12, 7], 2.0).to_api_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["12"], 2.0);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"12":2.0,"7":2.0}"#);
    }
}
