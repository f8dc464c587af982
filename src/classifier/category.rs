use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a category only asks "contains X" or is a derived, exclusive bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Inclusive,
    Exclusive,
}

/// The 13 buckets a vocabulary entry can be assigned to
///
/// The declaration order is the order used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ContainsJapanese,
    PureJapaneseScript,
    PureEnglish,
    ContainsHiragana,
    ContainsKatakanaFull,
    ContainsKatakanaHalf,
    ContainsKanji,
    ContainsJpPunctSymbol,
    ContainsFullwidthAscii,
    ContainsBasicEnglish,
    ContainsDigit,
    SpecialCharPattern,
    Uncategorized,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::ContainsJapanese,
        Category::PureJapaneseScript,
        Category::PureEnglish,
        Category::ContainsHiragana,
        Category::ContainsKatakanaFull,
        Category::ContainsKatakanaHalf,
        Category::ContainsKanji,
        Category::ContainsJpPunctSymbol,
        Category::ContainsFullwidthAscii,
        Category::ContainsBasicEnglish,
        Category::ContainsDigit,
        Category::SpecialCharPattern,
        Category::Uncategorized,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::ContainsJapanese => "contains_japanese",
            Category::PureJapaneseScript => "pure_japanese_script",
            Category::PureEnglish => "pure_english",
            Category::ContainsHiragana => "contains_hiragana",
            Category::ContainsKatakanaFull => "contains_katakana_full",
            Category::ContainsKatakanaHalf => "contains_katakana_half",
            Category::ContainsKanji => "contains_kanji",
            Category::ContainsJpPunctSymbol => "contains_jp_punct_symbol",
            Category::ContainsFullwidthAscii => "contains_fullwidth_ascii",
            Category::ContainsBasicEnglish => "contains_basic_english",
            Category::ContainsDigit => "contains_digit",
            Category::SpecialCharPattern => "special_char_pattern",
            Category::Uncategorized => "uncategorized",
        }
    }

    pub fn kind(self) -> CategoryKind {
        match self {
            Category::PureJapaneseScript
            | Category::PureEnglish
            | Category::SpecialCharPattern
            | Category::Uncategorized => CategoryKind::Exclusive,
            _ => CategoryKind::Inclusive,
        }
    }

    /// The Japanese facets that imply `contains_japanese`
    pub fn japanese_facets() -> [Category; 6] {
        [
            Category::ContainsHiragana,
            Category::ContainsKatakanaFull,
            Category::ContainsKatakanaHalf,
            Category::ContainsKanji,
            Category::ContainsJpPunctSymbol,
            Category::ContainsFullwidthAscii,
        ]
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown token category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A set of categories for one token, stored as a bit mask
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CategorySet(u16);

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category) {
        self.0 |= category.bit();
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate in report order
    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|category| self.contains(*category))
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut set = CategorySet::new();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

impl fmt::Debug for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Category::as_str)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names_match_as_str() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
            let back: Category = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("pure_english".parse::<Category>(), Ok(Category::PureEnglish));
        assert_eq!(
            "contains_halfwidth_katakana".parse::<Category>(),
            Err(UnknownCategory("contains_halfwidth_katakana".to_string()))
        );
    }

    #[test]
    fn test_kinds() {
        let exclusive: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|c| c.kind() == CategoryKind::Exclusive)
            .collect();
        assert_eq!(
            exclusive,
            vec![
                Category::PureJapaneseScript,
                Category::PureEnglish,
                Category::SpecialCharPattern,
                Category::Uncategorized
            ]
        );
    }

    #[test]
    fn test_category_set() {
        let mut set = CategorySet::new();
        assert!(set.is_empty());
        set.insert(Category::ContainsDigit);
        set.insert(Category::ContainsJapanese);
        set.insert(Category::ContainsDigit);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Category::ContainsJapanese));
        assert!(!set.contains(Category::PureEnglish));
        let order: Vec<Category> = set.iter().collect();
        assert_eq!(order, vec![Category::ContainsJapanese, Category::ContainsDigit]);
        assert_eq!(format!("{set:?}"), r#"{"contains_japanese", "contains_digit"}"#);
    }
}
