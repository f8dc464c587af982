use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use super::{ReportError, model_file_stem};
use crate::classifier::Category;

/// `<output_dir>/<category>_<model>.txt`
pub fn token_list_path(output_dir: &Path, category: Category, model_id: &str) -> PathBuf {
    output_dir.join(format!("{}_{}.txt", category, model_file_stem(model_id)))
}

/// Render ids as `<category>_ids = [1,2,3]` followed by a newline
pub fn format_token_list(category: Category, ids: &[u32]) -> String {
    let joined = ids.iter().map(u32::to_string).collect::<Vec<_>>().join(",");
    format!("{category}_ids = [{joined}]\n")
}

/// Save one category's ids in the token list format
///
/// # Returns
/// The written path, or `None` when `ids` is empty and nothing was written
pub fn save_token_list(
    ids: &[u32],
    category: Category,
    output_dir: &Path,
    model_id: &str,
) -> Result<Option<PathBuf>, ReportError> {
    if ids.is_empty() {
        info!("No tokens in category {category}, skipping file save");
        return Ok(None);
    }
    fs::create_dir_all(output_dir).map_err(|e| ReportError::io(output_dir, e))?;
    let path = token_list_path(output_dir, category, model_id);
    fs::write(&path, format_token_list(category, ids)).map_err(|e| ReportError::io(&path, e))?;
    info!("Saved {} token ids for {category} to {}", ids.len(), path.display());
    Ok(Some(path))
}

/// Parse the first bracketed, comma-separated id list in `text`
///
/// Whitespace around entries and empty entries are ignored, so `[]`, `[ ]`
/// and `[1, 2,]` are all accepted.
pub fn parse_token_list(text: &str) -> Result<Vec<u32>, ReportError> {
    let open = text
        .find('[')
        .ok_or_else(|| ReportError::ListFormat("no opening '[' found".to_string()))?;
    let rest = &text[open + 1..];
    let close = rest
        .find(']')
        .ok_or_else(|| ReportError::ListFormat("no closing ']' found".to_string()))?;

    let mut ids = Vec::new();
    for entry in rest[..close].split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.parse::<u32>() {
            Ok(id) => ids.push(id),
            Err(e) => {
                warn!("Rejecting token list entry {entry:?}");
                return Err(ReportError::ListFormat(format!("invalid token id {entry:?}: {e}")));
            }
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(
            format_token_list(Category::ContainsJapanese, &[5, 10, 300]),
            "contains_japanese_ids = [5,10,300]\n"
        );
        assert_eq!(format_token_list(Category::Uncategorized, &[]), "uncategorized_ids = []\n");
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse_token_list("contains_japanese_ids = [5,10,300]\n").unwrap(), vec![5, 10, 300]);
        assert_eq!(parse_token_list("x = [ 1, 2 ,\n 3, ]").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_token_list("x = []").unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_token_list("5,10"), Err(ReportError::ListFormat(_))));
        assert!(matches!(parse_token_list("[5,10"), Err(ReportError::ListFormat(_))));
        assert!(matches!(parse_token_list("[5,abc]"), Err(ReportError::ListFormat(_))));
        assert!(matches!(parse_token_list("[-1]"), Err(ReportError::ListFormat(_))));
    }

    #[test]
    fn test_save_token_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_token_list(&[7, 8], Category::PureEnglish, dir.path(), "models/llm-jp-3")
            .unwrap()
            .expect("non-empty list should be written");
        assert_eq!(path.file_name().unwrap(), "pure_english_llm_jp_3.txt");
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "pure_english_ids = [7,8]\n");
        assert_eq!(parse_token_list(&text).unwrap(), vec![7, 8]);
    }

    #[test]
    fn test_empty_list_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let saved = save_token_list(&[], Category::PureEnglish, dir.path(), "m").unwrap();
        assert!(saved.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
