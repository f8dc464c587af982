//! Vocabulary sources the analyzer can read token text from
//!
//! A vocabulary knows its size, can decode one id at a time (which may fail
//! for that id only) and reports the reserved ids to leave out of the analysis.
//! Implementations must be usable from several threads at once.

pub mod memory;
pub mod hf;
pub mod spm;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

pub use hf::HfVocabulary;
pub use memory::MemoryVocabulary;
pub use spm::SentencePieceVocabulary;

pub trait Vocabulary: Send + Sync {
    /// Number of ids in the base vocabulary; ids run from 0 to `vocab_size() - 1`
    fn vocab_size(&self) -> usize;

    /// Decode a single token id into its text
    fn decode(&self, token_id: u32) -> Result<String, VocabError>;

    /// Reserved ids (padding, BOS/EOS, control tokens...)
    fn special_ids(&self) -> BTreeSet<u32>;
}

#[derive(Debug, Error)]
pub enum VocabError {
    #[error("Failed to load vocabulary from {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("Unsupported vocabulary file: {0} (expected tokenizer.json or *.model)")]
    UnsupportedFormat(PathBuf),

    #[error("No tokenizer file found in directory {0}")]
    NotFound(PathBuf),

    #[error("Token id {token_id} is out of range for vocabulary size {vocab_size}")]
    OutOfRange { token_id: u32, vocab_size: usize },

    #[error("Failed to decode token id {token_id}: {reason}")]
    Decode { token_id: u32, reason: String },
}

impl VocabError {
    pub(crate) fn load(path: &Path, reason: impl ToString) -> Self {
        VocabError::Load { path: path.to_path_buf(), reason: reason.to_string() }
    }

    pub(crate) fn decode(token_id: u32, reason: impl ToString) -> Self {
        VocabError::Decode { token_id, reason: reason.to_string() }
    }
}

/// Load a vocabulary from a tokenizer file or a model directory
///
/// # Arguments
/// * `path` - `tokenizer.json` (or any `.json`), a SentencePiece `.model`, a
///   or a directory containing one of those
///
/// # Errors
/// Any failure here is fatal for the run: there is no partial analysis
/// without a vocabulary.
pub fn load_vocabulary<P: AsRef<Path>>(path: P) -> Result<Box<dyn Vocabulary>, VocabError> {
    let path = path.as_ref();
    let file = if path.is_dir() { find_tokenizer_file(path)? } else { path.to_path_buf() };
    info!("Loading vocabulary from {}", file.display());

    let vocab: Box<dyn Vocabulary> = match extension_of(&file).as_deref() {
        Some("json") => Box::new(HfVocabulary::load_from_file(&file)?),
        Some("model") => Box::new(SentencePieceVocabulary::load_from_file(&file)?),
        _ => return Err(VocabError::UnsupportedFormat(file)),
    };
    info!(
        "Vocabulary loaded. Vocab size: {}. Special ids: {}",
        vocab.vocab_size(),
        vocab.special_ids().len()
    );
    Ok(vocab)
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn find_tokenizer_file(dir: &Path) -> Result<PathBuf, VocabError> {
    for name in ["tokenizer.json", "tokenizer.model"] {
        let candidate = dir.join(name);
        debug!("Looking for {}", candidate.display());
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    Err(VocabError::NotFound(dir.to_path_buf()))
}
