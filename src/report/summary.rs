use std::fmt;

use crate::analysis::AnalysisResult;
use crate::classifier::Category;
use crate::vocab::Vocabulary;

const RULE_WIDTH: usize = 50;

/// Statistics block for a finished analysis, rendered through `Display`
pub struct Summary<'a>(pub &'a AnalysisResult);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let details = &result.analysis_details;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "\n{rule}")?;
        writeln!(f, "Analysis Summary ({})", result.model_id)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Total Vocab Size: {}", result.vocab_size)?;
        writeln!(f, "Special Tokens Excluded: {}", result.num_special_tokens)?;
        if details.num_tokens_analyzed == 0 {
            writeln!(f, "Analyzed Range: empty (from ID {})", details.min_token_id_analyzed)?;
        } else {
            writeln!(
                f,
                "Analyzed Range: ID {} to {}",
                details.min_token_id_analyzed, details.max_token_id_analyzed
            )?;
        }
        writeln!(f, "Non-Special Tokens Analyzed: {}", details.num_tokens_analyzed)?;
        if details.num_errors > 0 {
            writeln!(f, "Errors During Analysis: {}", details.num_errors)?;
        }
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(f, "Category Statistics:")?;
        let width = Category::ALL.iter().map(|c| c.as_str().len()).max().unwrap_or(0);
        for category in Category::ALL {
            writeln!(f, "  {:<width$} : {}", category.as_str(), result.count(category))?;
        }
        writeln!(f, "{rule}")
    }
}

/// Up to `max` example tokens of one category with their decoded text
///
/// Text is debug-escaped so whitespace and control characters stay visible.
/// A decode failure is shown in place of the text.
pub struct Examples<'a, V: Vocabulary + ?Sized> {
    pub vocab: &'a V,
    pub category: Category,
    pub ids: &'a [u32],
    pub max: usize,
}

impl<V: Vocabulary + ?Sized> fmt::Display for Examples<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n--- Examples: {} (first {}) ---", self.category, self.max)?;
        if self.ids.is_empty() {
            return writeln!(f, "  (none)");
        }
        for &token_id in self.ids.iter().take(self.max) {
            match self.vocab.decode(token_id) {
                Ok(text) => writeln!(f, "  ID: {token_id:<6} | Token: {text:?}")?,
                Err(err) => writeln!(f, "  ID: {token_id:<6} | Error decoding: {err}")?,
            }
        }
        Ok(())
    }
}

pub fn render_summary(result: &AnalysisResult) -> String {
    Summary(result).to_string()
}

pub fn print_summary(result: &AnalysisResult) {
    print!("{}", Summary(result));
}

pub fn render_examples<V: Vocabulary + ?Sized>(vocab: &V, category: Category, ids: &[u32], max: usize) -> String {
    Examples { vocab, category, ids, max }.to_string()
}

/// Print the configured examples for every category in `categories`
pub fn print_examples<V: Vocabulary + ?Sized>(vocab: &V, result: &AnalysisResult, categories: &[(Category, usize)]) {
    for &(category, max) in categories {
        print!("{}", Examples { vocab, category, ids: result.ids(category), max });
    }
}
