use std::path::PathBuf;

use crate::classifier::Category;

/// Default first id analyzed; ids below it are skipped even if not special
pub const DEFAULT_MIN_TOKEN_ID: u32 = 102;
/// Decode failures logged individually before switching to debug level
pub const DEFAULT_MAX_LOGGED_ERRORS: usize = 20;
pub const DEFAULT_OUTPUT_DIR: &str = "token_analysis_output";
pub const DEFAULT_BASE_FILENAME: &str = "token_analysis_jp";
/// Largest absolute bias accepted by HTTP generation APIs
pub const DEFAULT_BIAS_LIMIT: f32 = 100.0;

/// Parameters of one analysis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub min_token_id: u32,
    pub max_logged_errors: usize,
    pub show_progress: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            min_token_id: DEFAULT_MIN_TOKEN_ID,
            max_logged_errors: DEFAULT_MAX_LOGGED_ERRORS,
            show_progress: true,
        }
    }
}

/// What gets written and shown once an analysis is done
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub output_dir: PathBuf,
    pub base_filename: String,
    /// Categories whose id lists are saved as `<category>_<model>.txt`
    pub saved_categories: Vec<Category>,
    /// Categories to print example tokens for, with the number of examples
    pub example_categories: Vec<(Category, usize)>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            base_filename: DEFAULT_BASE_FILENAME.to_string(),
            saved_categories: vec![
                Category::ContainsJapanese,
                Category::PureJapaneseScript,
                Category::ContainsKatakanaHalf,
                Category::ContainsFullwidthAscii,
                Category::PureEnglish,
                Category::SpecialCharPattern,
                Category::Uncategorized,
            ],
            example_categories: vec![
                (Category::Uncategorized, 20),
                (Category::SpecialCharPattern, 20),
                (Category::PureJapaneseScript, 15),
                (Category::ContainsKatakanaHalf, 15),
                (Category::ContainsFullwidthAscii, 15),
                (Category::ContainsJapanese, 10),
                (Category::PureEnglish, 10),
            ],
        }
    }
}
