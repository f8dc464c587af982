/// Persisting and presenting analysis results
///
/// The JSON report is the primary artifact. Per-category id lists use a small
/// bracketed text format that the logit bias tool reads back.
pub mod json;
pub mod summary;
pub mod token_list;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::analysis::InvariantViolation;

pub use json::{load_analysis_json, report_path, save_analysis_json};
pub use summary::{Examples, Summary, print_examples, print_summary, render_examples, render_summary};
pub use token_list::{format_token_list, parse_token_list, save_token_list, token_list_path};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid token list: {0}")]
    ListFormat(String),

    #[error("Report failed validation: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl ReportError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ReportError::Io { path: path.to_path_buf(), source }
    }
}

/// File-name form of a model id: last path component, `/` and `-` replaced by `_`
pub fn model_file_stem(model_id: &str) -> String {
    let trimmed = model_id.trim_end_matches(['/', '\\']);
    let base = Path::new(trimmed)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(trimmed);
    base.replace(['/', '-'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_file_stem() {
        assert_eq!(model_file_stem("llm-jp-3-1.8b"), "llm_jp_3_1.8b");
        assert_eq!(model_file_stem("/models/llm-jp/llm-jp-3-1.8b/"), "llm_jp_3_1.8b");
        assert_eq!(model_file_stem("tokenizer.json"), "tokenizer.json");
        assert_eq!(model_file_stem("plain"), "plain");
    }
}
