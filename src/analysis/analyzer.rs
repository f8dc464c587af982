use std::collections::BTreeSet;

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rayon::prelude::*;

use super::result::{AnalysisResult, RunInfo, aggregate};
use crate::charset::CharClassRegistry;
use crate::classifier::{CategorySet, TokenClassifier};
use crate::core::AnalysisOptions;
use crate::vocab::{VocabError, Vocabulary};

/// What happened to a single id
#[derive(Debug)]
enum TokenOutcome {
    Classified(CategorySet),
    Empty,
    Failed(VocabError),
}

/// Classify every non-special id of a vocabulary
///
/// # Arguments
/// * `vocab` - The vocabulary to read token text from
/// * `model_id` - Name recorded in the result
/// * `options` - Id cutoff, error log cap and progress display
///
/// # Returns
/// The aggregated result over ids `min_token_id..vocab_size` minus the
/// special ids. Per-token decode failures never abort the run: they are
/// counted in `num_errors` and end up in `uncategorized`.
///
/// # Performance
/// Decoding and classification run on the rayon pool. Outcomes are collected
/// in id order and merged by a single writer, so the result does not depend
/// on scheduling.
pub fn analyze<V: Vocabulary + ?Sized>(
    vocab: &V,
    model_id: &str,
    options: &AnalysisOptions,
) -> AnalysisResult {
    analyze_with_registry(vocab, model_id, options, CharClassRegistry::standard())
}

pub fn analyze_with_registry<V: Vocabulary + ?Sized>(
    vocab: &V,
    model_id: &str,
    options: &AnalysisOptions,
    registry: &CharClassRegistry,
) -> AnalysisResult {
    info!("Starting analysis of {model_id}");
    let vocab_size = vocab.vocab_size();
    let special_ids = vocab.special_ids();
    debug!("Excluded special token ids: {special_ids:?}");

    let upper = u32::try_from(vocab_size).unwrap_or(u32::MAX);
    let analyzed_ids: Vec<u32> = (options.min_token_id..upper)
        .filter(|id| !special_ids.contains(id))
        .collect();
    let run = RunInfo {
        model_id: model_id.to_string(),
        vocab_size,
        min_token_id: options.min_token_id,
        // stays 0 for an empty vocabulary; the range is empty then
        max_token_id: upper.saturating_sub(1),
        special_ids,
    };
    if analyzed_ids.is_empty() {
        warn!(
            "No tokens to analyze (vocab size {vocab_size}, min_token_id {}). Check min_token_id and the vocabulary.",
            run.min_token_id
        );
        return aggregate(run, &BTreeSet::new(), Vec::new(), 0);
    }

    info!(
        "Analyzing {} non-special tokens (id range {} to {})",
        analyzed_ids.len(),
        run.min_token_id,
        run.max_token_id
    );

    let classifier = TokenClassifier::new(registry);
    let bar = progress_bar(analyzed_ids.len(), model_id, options.show_progress);
    let outcomes: Vec<(u32, TokenOutcome)> = analyzed_ids
        .par_iter()
        .progress_with(bar.clone())
        .map(|&token_id| (token_id, classify_one(vocab, &classifier, token_id)))
        .collect();
    bar.finish_and_clear();

    let mut error_count = 0usize;
    let mut per_token = Vec::with_capacity(outcomes.len());
    for (token_id, outcome) in outcomes {
        match outcome {
            TokenOutcome::Classified(categories) => per_token.push((token_id, categories)),
            TokenOutcome::Empty => debug!("Token id {token_id} decoded to an empty string, skipping"),
            TokenOutcome::Failed(err) => {
                error_count += 1;
                if error_count <= options.max_logged_errors {
                    warn!("Unexpected error while analyzing token id {token_id}: {err}");
                } else {
                    debug!("Error details for token id {token_id}: {err}");
                }
            }
        }
    }
    if error_count > 0 {
        warn!("{error_count} errors occurred during token analysis");
        if error_count > options.max_logged_errors {
            warn!("Only the first {} errors were logged", options.max_logged_errors);
        }
    }

    info!("Analysis complete. Aggregating results...");
    let analyzed_set: BTreeSet<u32> = analyzed_ids.into_iter().collect();
    let result = aggregate(run, &analyzed_set, per_token, error_count);
    info!("Aggregation complete");
    result
}

fn classify_one<V: Vocabulary + ?Sized>(
    vocab: &V,
    classifier: &TokenClassifier<'_>,
    token_id: u32,
) -> TokenOutcome {
    match vocab.decode(token_id) {
        Ok(text) if text.is_empty() => TokenOutcome::Empty,
        Ok(text) => TokenOutcome::Classified(classifier.classify(&text)),
        Err(err) => TokenOutcome::Failed(err),
    }
}

fn progress_bar(len: usize, model_id: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    ) {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar.set_message(format!("Analyzing tokens ({model_id})"));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Category::*;
    use crate::vocab::MemoryVocabulary;

    fn options(min_token_id: u32) -> AnalysisOptions {
        AnalysisOptions { min_token_id, max_logged_errors: 2, show_progress: false }
    }

    fn vocab() -> MemoryVocabulary {
        MemoryVocabulary::new(vec![
            Some("<s>".into()),
            Some("</s>".into()),
            Some("あ".into()),
            Some("トークン".into()),
            Some("、".into()),
            Some("ＡＢＣ".into()),
            Some(" a".into()),
            Some("東京1".into()),
            Some("---".into()),
            Some(" ---".into()),
            Some("hello".into()),
            Some(String::new()),
            None,
            Some("привет".into()),
        ])
        .with_special_ids([0, 1])
    }

    #[test]
    fn test_analyze_small_vocabulary() {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .is_test(true)
            .try_init();

        let result = analyze(&vocab(), "test/tiny", &options(0));
        result.check_invariants().expect("result should satisfy every invariant");

        assert_eq!(result.vocab_size, 14);
        assert_eq!(result.num_special_tokens, 2);
        assert_eq!(result.analysis_details.num_tokens_analyzed, 12);
        assert_eq!(result.analysis_details.num_errors, 1);
        assert_eq!(result.analysis_details.max_token_id_analyzed, 13);

        assert_eq!(result.ids(ContainsJapanese), &[2, 3, 4, 5, 7]);
        assert_eq!(result.ids(PureJapaneseScript), &[2, 3]);
        assert_eq!(result.ids(ContainsJpPunctSymbol), &[4]);
        assert_eq!(result.ids(ContainsFullwidthAscii), &[5]);
        assert_eq!(result.ids(ContainsBasicEnglish), &[6, 10]);
        assert_eq!(result.ids(PureEnglish), &[10]);
        assert_eq!(result.ids(ContainsDigit), &[7]);
        assert_eq!(result.ids(ContainsKanji), &[7]);
        assert_eq!(result.ids(SpecialCharPattern), &[8]);
        // " ---", the empty decode, the failed decode and Cyrillic
        assert_eq!(result.ids(Uncategorized), &[9, 11, 12, 13]);
    }

    #[test]
    fn test_min_token_id_cutoff() {
        let result = analyze(&vocab(), "test/tiny", &options(8));
        assert_eq!(result.analysis_details.min_token_id_analyzed, 8);
        assert_eq!(result.analysis_details.num_tokens_analyzed, 6);
        assert!(result.ids(ContainsJapanese).is_empty());
        result.check_invariants().unwrap();
    }

    #[test]
    fn test_nothing_to_analyze() {
        let result = analyze(&vocab(), "test/tiny", &options(100));
        assert_eq!(result.analysis_details.num_tokens_analyzed, 0);
        assert_eq!(result.token_ids.len(), 13);
        assert_eq!(result.analysis_details.excluded_special_ids, vec![0, 1]);
        result.check_invariants().unwrap();
    }

    #[test]
    fn test_empty_vocabulary() {
        let result = analyze(&MemoryVocabulary::default(), "empty", &options(0));
        assert_eq!(result.vocab_size, 0);
        assert_eq!(result.analysis_details.num_tokens_analyzed, 0);
        assert_eq!(result.analysis_details.max_token_id_analyzed, 0);
        assert!(result.token_ids.values().all(Vec::is_empty));
        result.check_invariants().unwrap();
    }

    #[test]
    fn test_error_count_beyond_log_cap() {
        let vocab = MemoryVocabulary::new(vec![None; 5]);
        let result = analyze(&vocab, "broken", &options(0));
        assert_eq!(result.analysis_details.num_errors, 5);
        assert_eq!(result.ids(Uncategorized), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_parallel_run_is_deterministic() {
        let pieces: Vec<String> = (0..2000)
            .map(|i| match i % 5 {
                0 => format!("語{i}"),
                1 => format!("word{i}"),
                2 => "!?".repeat(i % 3 + 1),
                3 => "カタカナ".to_string(),
                _ => format!(" {i}"),
            })
            .collect();
        let vocab = MemoryVocabulary::from_pieces(pieces);
        let first = analyze(&vocab, "big", &options(0));
        let second = analyze(&vocab, "big", &options(0));
        assert_eq!(first, second);
        first.check_invariants().unwrap();
        assert_eq!(first.count(ContainsKatakanaFull), 400);
        assert_eq!(first.count(SpecialCharPattern), 400);
    }
}
