use std::collections::BTreeSet;
use std::path::Path;

use tokenizers::Tokenizer;

use super::{VocabError, Vocabulary};

/// Hugging Face `tokenizer.json` vocabulary
///
/// This struct wraps `tokenizers::Tokenizer` to decode one id at a time.
///
/// # Thread Safety
/// The underlying tokenizer is `Send + Sync`; decode calls only borrow it
/// immutably, so the analyzer decodes ids from every worker thread.
pub struct HfVocabulary {
    inner: Tokenizer,
    vocab_size: usize,
    special_ids: BTreeSet<u32>,
}

impl HfVocabulary {
    /// Load a tokenizer from a `tokenizer.json` file
    ///
    /// # Arguments
    /// * `path` - Path to the serialized Hugging Face tokenizer
    ///
    /// # Returns
    /// * `Result<Self>` - The loaded vocabulary or a load error
    ///
    /// # Note
    /// The vocabulary size excludes added tokens, matching the base vocabulary
    /// range. Added tokens flagged `special` are the reserved ids.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, VocabError> {
        let path = path.as_ref();
        let inner = Tokenizer::from_file(path).map_err(|e| VocabError::load(path, e))?;
        Ok(Self::from_tokenizer(inner))
    }

    pub fn from_tokenizer(inner: Tokenizer) -> Self {
        let vocab_size = inner.get_vocab_size(false);
        let special_ids = inner
            .get_added_tokens_decoder()
            .iter()
            .filter(|(_, token)| token.special)
            .map(|(id, _)| *id)
            .collect();
        Self { inner, vocab_size, special_ids }
    }
}

impl Vocabulary for HfVocabulary {
    fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// Special tokens are not skipped and no spacing cleanup is applied, so
    /// leading spaces of word-initial pieces survive.
    fn decode(&self, token_id: u32) -> Result<String, VocabError> {
        if token_id as usize >= self.vocab_size {
            return Err(VocabError::OutOfRange { token_id, vocab_size: self.vocab_size });
        }
        self.inner
            .decode(&[token_id], false)
            .map_err(|e| VocabError::decode(token_id, e))
    }

    fn special_ids(&self) -> BTreeSet<u32> {
        self.special_ids.clone()
    }
}
