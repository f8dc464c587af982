use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde_json::Value;

use super::BiasError;
use crate::classifier::Category;
use crate::core::config::DEFAULT_BASE_FILENAME;
use crate::report::{ReportError, model_file_stem, parse_token_list};

/// Read the ids of `category` from a token list or an analysis report
///
/// `.txt` files use the token list format, `.json` files are analysis reports
/// read through `token_ids.<category>`. Any other extension is tried as a
/// report first, then as a token list.
pub fn load_bias_ids<P: AsRef<Path>>(path: P, category: Category) -> Result<Vec<u32>, BiasError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(BiasError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|e| read_error(path, ReportError::io(path, e)))?;
    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);

    let ids = match extension.as_deref() {
        Some("txt") => parse_token_list(&text).map_err(|e| read_error(path, e))?,
        Some("json") => ids_from_report(&text, category, path)?,
        _ => match serde_json::from_str::<Value>(&text) {
            Ok(_) => ids_from_report(&text, category, path)?,
            Err(_) => {
                warn!("{} is not a JSON report, reading it as a token list", path.display());
                parse_token_list(&text).map_err(|e| read_error(path, e))?
            }
        },
    };
    info!("Loaded {} token ids from {}", ids.len(), path.display());
    Ok(ids)
}

/// Find the id file to use for `category`
///
/// When `path` does not exist, look next to it for `<category>_<model>.txt`
/// and then `<base>_<model>.json`. A `model_name` is needed for the fallbacks.
pub fn resolve_ids_file(path: &Path, category: Category, model_name: Option<&str>) -> Result<PathBuf, BiasError> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    let Some(model_name) = model_name else {
        return Err(BiasError::NotFound(path.to_path_buf()));
    };
    let dir = path.parent().unwrap_or(Path::new(""));
    let stem = model_file_stem(model_name);
    let candidates = [
        dir.join(format!("{category}_{stem}.txt")),
        dir.join(format!("{DEFAULT_BASE_FILENAME}_{stem}.json")),
    ];
    for candidate in candidates {
        if candidate.is_file() {
            warn!("{} not found, using {}", path.display(), candidate.display());
            return Ok(candidate);
        }
    }
    Err(BiasError::NotFound(path.to_path_buf()))
}

fn ids_from_report(text: &str, category: Category, path: &Path) -> Result<Vec<u32>, BiasError> {
    let report: Value = serde_json::from_str(text).map_err(|e| read_error(path, e.into()))?;
    let ids = report
        .get("token_ids")
        .and_then(|lists| lists.get(category.as_str()))
        .ok_or_else(|| BiasError::MissingCategory { category, path: path.to_path_buf() })?;
    serde_json::from_value(ids.clone()).map_err(|e| read_error(path, e.into()))
}

fn read_error(path: &Path, source: ReportError) -> BiasError {
    BiasError::Read { path: path.to_path_buf(), source }
}
