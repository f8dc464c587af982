use std::collections::BTreeSet;
use std::path::Path;

use sentencepiece::SentencePieceProcessor;

use super::{VocabError, Vocabulary};

/// SentencePiece `.model` vocabulary
///
/// Wraps `sentencepiece::SentencePieceProcessor`. The processor is
/// thread-safe (`Send + Sync`), so ids are decoded concurrently.
pub struct SentencePieceVocabulary {
    inner: SentencePieceProcessor,
}

impl SentencePieceVocabulary {
    /// Load a SentencePiece model file (typically `tokenizer.model`)
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid
    /// SentencePiece model
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, VocabError> {
        let path = path.as_ref();
        let inner = SentencePieceProcessor::open(path).map_err(|e| VocabError::load(path, e))?;
        Ok(Self { inner })
    }
}

impl Vocabulary for SentencePieceVocabulary {
    fn vocab_size(&self) -> usize {
        self.inner.len()
    }

    fn decode(&self, token_id: u32) -> Result<String, VocabError> {
        if token_id as usize >= self.inner.len() {
            return Err(VocabError::OutOfRange { token_id, vocab_size: self.inner.len() });
        }
        self.inner
            .decode_piece_ids(&[token_id])
            .map_err(|e| VocabError::decode(token_id, e))
    }

    /// BOS, EOS, padding and unknown pieces
    fn special_ids(&self) -> BTreeSet<u32> {
        [self.inner.bos_id(), self.inner.eos_id(), self.inner.pad_id(), Some(self.inner.unk_id())]
            .into_iter()
            .flatten()
            .collect()
    }
}
