use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::classifier::{Category, CategorySet};

/// Where the analysis ran and what it skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    pub min_token_id_analyzed: u32,
    /// `vocab_size - 1`, saturating at 0; only meaningful when
    /// `num_tokens_analyzed > 0`
    pub max_token_id_analyzed: u32,
    pub num_tokens_analyzed: usize,
    pub num_errors: usize,
    pub excluded_special_ids: Vec<u32>,
}

/// Persisted outcome of one vocabulary analysis
///
/// Built once by [`aggregate`] and never mutated afterwards. All 13
/// categories are always present in `statistics` and `token_ids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub model_id: String,
    pub vocab_size: usize,
    pub num_special_tokens: usize,
    pub analysis_details: AnalysisDetails,
    pub statistics: BTreeMap<Category, usize>,
    pub token_ids: BTreeMap<Category, Vec<u32>>,
}

impl AnalysisResult {
    /// Sorted ids of one category (empty if the key is somehow absent)
    pub fn ids(&self, category: Category) -> &[u32] {
        self.token_ids.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, category: Category) -> usize {
        self.statistics.get(&category).copied().unwrap_or(0)
    }
}

/// Run-level facts the aggregator copies into the result
#[derive(Debug, Clone)]
pub struct RunInfo {
    pub model_id: String,
    pub vocab_size: usize,
    pub min_token_id: u32,
    pub max_token_id: u32,
    pub special_ids: BTreeSet<u32>,
}

/// Merge per-token categories into the final result
///
/// # Arguments
/// * `run` - Model id, vocabulary size, analyzed range and excluded ids
/// * `analyzed_ids` - Every id that was attempted, including failed decodes
/// * `per_token` - Categories of the successfully decoded ids
/// * `decode_errors` - Number of ids whose decode failed
///
/// # Returns
/// The result with `uncategorized = analyzed_ids - covered`, where `covered`
/// is the union of every other category. Ids outside `analyzed_ids` are
/// ignored, so `|analyzed_ids| = |covered| + |uncategorized|` always holds.
pub fn aggregate<I>(
    run: RunInfo,
    analyzed_ids: &BTreeSet<u32>,
    per_token: I,
    decode_errors: usize,
) -> AnalysisResult
where
    I: IntoIterator<Item = (u32, CategorySet)>,
{
    let mut buckets: BTreeMap<Category, BTreeSet<u32>> =
        Category::ALL.into_iter().map(|category| (category, BTreeSet::new())).collect();
    let mut covered: BTreeSet<u32> = BTreeSet::new();

    for (token_id, categories) in per_token {
        if !analyzed_ids.contains(&token_id) {
            continue;
        }
        for category in categories.iter().filter(|c| *c != Category::Uncategorized) {
            if let Some(bucket) = buckets.get_mut(&category) {
                bucket.insert(token_id);
            }
            covered.insert(token_id);
        }
    }
    let uncategorized: BTreeSet<u32> = analyzed_ids.difference(&covered).copied().collect();
    buckets.insert(Category::Uncategorized, uncategorized);

    let statistics = buckets.iter().map(|(category, ids)| (*category, ids.len())).collect();
    let token_ids = buckets
        .into_iter()
        .map(|(category, ids)| (category, ids.into_iter().collect()))
        .collect();

    AnalysisResult {
        model_id: run.model_id,
        vocab_size: run.vocab_size,
        num_special_tokens: run.special_ids.len(),
        analysis_details: AnalysisDetails {
            min_token_id_analyzed: run.min_token_id,
            max_token_id_analyzed: run.max_token_id,
            num_tokens_analyzed: analyzed_ids.len(),
            num_errors: decode_errors,
            excluded_special_ids: run.special_ids.into_iter().collect(),
        },
        statistics,
        token_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Category::*;

    fn run() -> RunInfo {
        RunInfo {
            model_id: "test/model".into(),
            vocab_size: 10,
            min_token_id: 2,
            max_token_id: 9,
            special_ids: BTreeSet::from([0, 1]),
        }
    }

    fn set(categories: &[Category]) -> CategorySet {
        categories.iter().copied().collect()
    }

    #[test]
    fn test_residual_is_set_difference() {
        let analyzed: BTreeSet<u32> = (2..10).collect();
        let per_token = vec![
            (2, set(&[ContainsJapanese, ContainsHiragana, PureJapaneseScript])),
            (3, set(&[ContainsBasicEnglish, PureEnglish])),
            (4, set(&[])),
            (5, set(&[SpecialCharPattern])),
        ];
        let result = aggregate(run(), &analyzed, per_token, 1);

        assert_eq!(result.ids(Uncategorized), &[4, 6, 7, 8, 9]);
        assert_eq!(result.ids(ContainsJapanese), &[2]);
        assert_eq!(result.count(PureEnglish), 1);
        assert_eq!(result.analysis_details.num_tokens_analyzed, 8);
        assert_eq!(result.analysis_details.num_errors, 1);
        assert_eq!(result.analysis_details.excluded_special_ids, vec![0, 1]);
        assert_eq!(result.num_special_tokens, 2);
        result.check_invariants().expect("aggregated result should be consistent");
    }

    #[test]
    fn test_all_keys_present_when_empty() {
        let result = aggregate(run(), &BTreeSet::new(), Vec::new(), 0);
        assert_eq!(result.statistics.len(), 13);
        assert_eq!(result.token_ids.len(), 13);
        assert!(result.statistics.values().all(|count| *count == 0));
    }

    #[test]
    fn test_ids_outside_analyzed_set_are_ignored() {
        let analyzed: BTreeSet<u32> = BTreeSet::from([5]);
        let per_token = vec![(0, set(&[PureEnglish, ContainsBasicEnglish])), (5, set(&[ContainsDigit]))];
        let result = aggregate(run(), &analyzed, per_token, 0);
        assert!(result.ids(PureEnglish).is_empty());
        assert_eq!(result.ids(ContainsDigit), &[5]);
    }

    #[test]
    fn test_uncategorized_in_input_is_recomputed() {
        let analyzed: BTreeSet<u32> = BTreeSet::from([2, 3]);
        let per_token = vec![(2, set(&[Uncategorized, ContainsDigit]))];
        let result = aggregate(run(), &analyzed, per_token, 0);
        assert_eq!(result.ids(Uncategorized), &[3]);
    }

    #[test]
    fn test_json_shape() {
        let analyzed: BTreeSet<u32> = BTreeSet::from([2]);
        let result = aggregate(run(), &analyzed, vec![(2, set(&[ContainsDigit]))], 0);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["model_id"], "test/model");
        assert_eq!(json["analysis_details"]["min_token_id_analyzed"], 2);
        assert_eq!(json["statistics"]["contains_digit"], 1);
        assert_eq!(json["token_ids"]["contains_digit"], serde_json::json!([2]));
        assert_eq!(json["token_ids"]["special_char_pattern"], serde_json::json!([]));
    }
}
