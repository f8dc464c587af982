use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use super::{ReportError, model_file_stem};
use crate::analysis::AnalysisResult;
use crate::core::ReportOptions;

/// `<output_dir>/<base_filename>_<model>.json`
pub fn report_path(options: &ReportOptions, model_id: &str) -> PathBuf {
    options
        .output_dir
        .join(format!("{}_{}.json", options.base_filename, model_file_stem(model_id)))
}

/// Write the result as pretty-printed JSON, creating the output directory if needed
///
/// Non-ASCII text is written as-is rather than escaped.
pub fn save_analysis_json(result: &AnalysisResult, options: &ReportOptions) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(&options.output_dir).map_err(|e| ReportError::io(&options.output_dir, e))?;
    let path = report_path(options, &result.model_id);
    let mut json = serde_json::to_string_pretty(result)?;
    json.push('\n');
    fs::write(&path, json).map_err(|e| ReportError::io(&path, e))?;
    info!("Analysis results saved to {}", path.display());
    Ok(path)
}

/// Read a saved report back and check that it is internally consistent
pub fn load_analysis_json<P: AsRef<Path>>(path: P) -> Result<AnalysisResult, ReportError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    let result: AnalysisResult = serde_json::from_str(&text)?;
    result.check_invariants()?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::classifier::Category;
    use crate::core::AnalysisOptions;
    use crate::vocab::MemoryVocabulary;

    fn sample() -> AnalysisResult {
        let vocab = MemoryVocabulary::from_pieces(["<pad>", "日本語", "hello", "!!", "ｶﾀｶﾅ"]).with_special_ids([0]);
        let options = AnalysisOptions { min_token_id: 0, show_progress: false, ..AnalysisOptions::default() };
        analyze(&vocab, "org/日本語-model", &options)
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let options = ReportOptions { output_dir: dir.path().join("out"), ..ReportOptions::default() };
        let result = sample();

        let path = save_analysis_json(&result, &options).unwrap();
        assert_eq!(path.file_name().unwrap(), "token_analysis_jp_日本語_model.json");

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"model_id\": \"org/日本語-model\""));

        let loaded = load_analysis_json(&path).unwrap();
        assert_eq!(loaded, result);
        assert_eq!(loaded.ids(Category::ContainsKatakanaHalf), &[4]);
    }

    #[test]
    fn test_load_rejects_inconsistent_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut result = sample();
        result.statistics.insert(Category::PureEnglish, 42);
        let path = dir.path().join("bad.json");
        fs::write(&path, serde_json::to_string(&result).unwrap()).unwrap();

        let err = load_analysis_json(&path).unwrap_err();
        assert!(matches!(err, ReportError::Invariant(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_analysis_json("/nonexistent/report.json").unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }
}
