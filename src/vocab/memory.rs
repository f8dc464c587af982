use std::collections::BTreeSet;

use super::{VocabError, Vocabulary};

/// Vocabulary held in memory as already-decoded pieces
///
/// A `None` entry stands for an id whose text cannot be decoded.
#[derive(Debug, Clone, Default)]
pub struct MemoryVocabulary {
    pieces: Vec<Option<String>>,
    special_ids: BTreeSet<u32>,
}

impl MemoryVocabulary {
    pub fn new(pieces: Vec<Option<String>>) -> Self {
        Self { pieces, special_ids: BTreeSet::new() }
    }

    /// Build from pieces that all decode successfully
    pub fn from_pieces<I, S>(pieces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(pieces.into_iter().map(|piece| Some(piece.into())).collect())
    }

    pub fn with_special_ids<I: IntoIterator<Item = u32>>(mut self, ids: I) -> Self {
        self.special_ids.extend(ids);
        self
    }
}

impl Vocabulary for MemoryVocabulary {
    fn vocab_size(&self) -> usize {
        self.pieces.len()
    }

    fn decode(&self, token_id: u32) -> Result<String, VocabError> {
        match self.pieces.get(token_id as usize) {
            Some(Some(piece)) => Ok(piece.clone()),
            Some(None) => Err(VocabError::decode(token_id, "no text for this id")),
            None => Err(VocabError::OutOfRange { token_id, vocab_size: self.pieces.len() }),
        }
    }

    fn special_ids(&self) -> BTreeSet<u32> {
        self.special_ids.clone()
    }
}
