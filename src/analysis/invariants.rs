use std::collections::BTreeSet;

use thiserror::Error;

use super::result::AnalysisResult;
use crate::classifier::Category::{self, *};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("Category {0} is missing from the result")]
    MissingCategory(Category),

    #[error("Category {category} reports {count} tokens but lists {listed}")]
    CountMismatch { category: Category, count: usize, listed: usize },

    #[error("Token ids of {0} are not strictly increasing")]
    Unsorted(Category),

    #[error("Token {token_id} is in {subset} but not in {superset}")]
    NotSubset { subset: Category, superset: Category, token_id: u32 },

    #[error("Token {token_id} is in both {first} and {second}")]
    Overlap { first: Category, second: Category, token_id: u32 },

    #[error("{analyzed} tokens analyzed but {covered} categorized + {uncategorized} uncategorized")]
    Accounting { analyzed: usize, covered: usize, uncategorized: usize },
}

const SUBSETS: [(Category, Category); 8] = [
    (PureJapaneseScript, ContainsJapanese),
    (ContainsHiragana, ContainsJapanese),
    (ContainsKatakanaFull, ContainsJapanese),
    (ContainsKatakanaHalf, ContainsJapanese),
    (ContainsKanji, ContainsJapanese),
    (ContainsJpPunctSymbol, ContainsJapanese),
    (ContainsFullwidthAscii, ContainsJapanese),
    (PureEnglish, ContainsBasicEnglish),
];

const DISJOINT: [(Category, Category); 8] = [
    (PureJapaneseScript, PureEnglish),
    (PureJapaneseScript, SpecialCharPattern),
    (PureJapaneseScript, Uncategorized),
    (PureEnglish, ContainsJapanese),
    (PureEnglish, SpecialCharPattern),
    (PureEnglish, Uncategorized),
    (SpecialCharPattern, ContainsJapanese),
    (SpecialCharPattern, ContainsBasicEnglish),
];

impl AnalysisResult {
    /// Verify the structural guarantees of an analysis result
    ///
    /// Checks that every category is present with a matching count and a
    /// sorted id list, the subset and disjointness relations between
    /// categories, that `uncategorized` shares no id with any other category,
    /// and that categorized plus uncategorized ids add up to the analyzed count.
    ///
    /// # Errors
    /// Returns the first violation found
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for category in Category::ALL {
            let ids = self
                .token_ids
                .get(&category)
                .ok_or(InvariantViolation::MissingCategory(category))?;
            let count = *self
                .statistics
                .get(&category)
                .ok_or(InvariantViolation::MissingCategory(category))?;
            if count != ids.len() {
                return Err(InvariantViolation::CountMismatch { category, count, listed: ids.len() });
            }
            if ids.windows(2).any(|pair| pair[0] >= pair[1]) {
                return Err(InvariantViolation::Unsorted(category));
            }
        }

        for (subset, superset) in SUBSETS {
            let outer = self.id_set(superset);
            if let Some(&token_id) = self.ids(subset).iter().find(|id| !outer.contains(*id)) {
                return Err(InvariantViolation::NotSubset { subset, superset, token_id });
            }
        }

        let residual_pairs = Category::ALL
            .into_iter()
            .filter(|c| *c != Uncategorized)
            .map(|c| (Uncategorized, c));
        for (first, second) in DISJOINT.into_iter().chain(residual_pairs) {
            let other = self.id_set(second);
            if let Some(&token_id) = self.ids(first).iter().find(|id| other.contains(*id)) {
                return Err(InvariantViolation::Overlap { first, second, token_id });
            }
        }

        let covered: BTreeSet<u32> = Category::ALL
            .into_iter()
            .filter(|c| *c != Uncategorized)
            .flat_map(|c| self.ids(c).iter().copied())
            .collect();
        let analyzed = self.analysis_details.num_tokens_analyzed;
        let uncategorized = self.ids(Uncategorized).len();
        if analyzed != covered.len() + uncategorized {
            return Err(InvariantViolation::Accounting { analyzed, covered: covered.len(), uncategorized });
        }
        Ok(())
    }

    fn id_set(&self, category: Category) -> BTreeSet<u32> {
        self.ids(category).iter().copied().collect()
    }
}
