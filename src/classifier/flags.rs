use crate::charset::CharClassRegistry;

use super::category::{Category, CategorySet};

/// Character-level facts about one decoded token, gathered in a single scan
///
/// The `has_*` fields are "at least one character" flags. The `all_*` fields
/// and `symbol_only` are whole-token checks; on an empty token the `all_*`
/// fields stay vacuously true, which the decision rules guard against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenFlags {
    pub has_hiragana: bool,
    pub has_katakana_full: bool,
    pub has_katakana_half: bool,
    /// Unified, extension or compatibility ideographs
    pub has_kanji: bool,
    pub has_jp_punct_symbol: bool,
    pub has_fullwidth_ascii: bool,
    pub has_basic_english: bool,
    /// ASCII digits only; full-width digits set `has_fullwidth_ascii`
    pub has_digit: bool,
    pub all_pure_japanese_script: bool,
    pub all_basic_english: bool,
    /// Same result as [`CharClassRegistry::is_symbol_only_token`] on the whole token
    pub symbol_only: bool,
}

impl TokenFlags {
    pub fn scan(registry: &CharClassRegistry, text: &str) -> Self {
        let mut flags = TokenFlags {
            has_hiragana: false,
            has_katakana_full: false,
            has_katakana_half: false,
            has_kanji: false,
            has_jp_punct_symbol: false,
            has_fullwidth_ascii: false,
            has_basic_english: false,
            has_digit: false,
            all_pure_japanese_script: true,
            all_basic_english: true,
            symbol_only: !text.is_empty(),
        };

        for c in text.chars() {
            let is_hiragana = registry.hiragana.contains(c);
            let is_katakana_full = registry.katakana_full.contains(c);
            let is_katakana_half = registry.katakana_half.contains(c);
            let is_kanji = registry.is_kanji(c);
            let is_basic_english = registry.basic_english.contains(c);

            flags.has_hiragana |= is_hiragana;
            flags.has_katakana_full |= is_katakana_full;
            flags.has_katakana_half |= is_katakana_half;
            flags.has_kanji |= is_kanji || registry.kanji_compat.contains(c);
            flags.has_jp_punct_symbol |= registry.is_jp_punct_symbol(c);
            flags.has_fullwidth_ascii |= registry.fullwidth_ascii.contains(c);
            flags.has_basic_english |= is_basic_english;
            flags.has_digit |= c.is_ascii_digit();

            if !(is_hiragana || is_katakana_full || is_katakana_half || is_kanji) {
                flags.all_pure_japanese_script = false;
            }
            if !is_basic_english {
                flags.all_basic_english = false;
            }
            if !registry.is_symbol_char(c) {
                flags.symbol_only = false;
            }
        }
        flags
    }

    pub fn is_related_to_japanese(&self) -> bool {
        self.has_hiragana
            || self.has_katakana_full
            || self.has_katakana_half
            || self.has_kanji
            || self.has_jp_punct_symbol
            || self.has_fullwidth_ascii
    }

    /// At least one script letter, as opposed to only punctuation or full-width ASCII
    pub fn has_script_letter(&self) -> bool {
        self.has_hiragana || self.has_katakana_full || self.has_katakana_half || self.has_kanji
    }

    /// Apply the assignment rules to the scanned flags
    ///
    /// `uncategorized` is never produced here; it is the residual computed
    /// when results are aggregated.
    pub fn categories(&self) -> CategorySet {
        let mut set = CategorySet::new();
        let related = self.is_related_to_japanese();

        if related {
            set.insert(Category::ContainsJapanese);
            let facets = [
                (self.has_hiragana, Category::ContainsHiragana),
                (self.has_katakana_full, Category::ContainsKatakanaFull),
                (self.has_katakana_half, Category::ContainsKatakanaHalf),
                (self.has_kanji, Category::ContainsKanji),
                (self.has_jp_punct_symbol, Category::ContainsJpPunctSymbol),
                (self.has_fullwidth_ascii, Category::ContainsFullwidthAscii),
            ];
            for (present, category) in facets {
                if present {
                    set.insert(category);
                }
            }
            if self.all_pure_japanese_script && self.has_script_letter() {
                set.insert(Category::PureJapaneseScript);
            }
        }

        if self.has_basic_english {
            set.insert(Category::ContainsBasicEnglish);
            if self.all_basic_english && !related {
                set.insert(Category::PureEnglish);
            }
        }

        // Inclusive: digits co-occur with script and English categories
        if self.has_digit {
            set.insert(Category::ContainsDigit);
        }

        // symbol_only already implies the first three guards
        if !related && !self.has_basic_english && !self.has_digit && self.symbol_only {
            set.insert(Category::SpecialCharPattern);
        }

        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> TokenFlags {
        TokenFlags::scan(CharClassRegistry::standard(), text)
    }

    #[test]
    fn test_scan_empty() {
        let flags = scan("");
        assert!(!flags.is_related_to_japanese());
        assert!(!flags.has_basic_english);
        assert!(!flags.symbol_only);
        assert!(flags.categories().is_empty());
    }

    #[test]
    fn test_scan_mixed() {
        let flags = scan("東京1");
        assert!(flags.has_kanji);
        assert!(flags.has_digit);
        assert!(!flags.all_pure_japanese_script);
        assert!(!flags.has_basic_english);
    }

    #[test]
    fn test_fullwidth_digit_is_not_ascii_digit() {
        let flags = scan("１");
        assert!(flags.has_fullwidth_ascii);
        assert!(!flags.has_digit);
    }

    #[test]
    fn test_compat_kanji_is_related_but_not_pure() {
        let flags = scan("\u{F900}");
        assert!(flags.has_kanji);
        assert!(!flags.all_pure_japanese_script);
        let set = flags.categories();
        assert!(set.contains(Category::ContainsKanji));
        assert!(!set.contains(Category::PureJapaneseScript));
    }

    #[test]
    fn test_symbol_only_matches_token_predicate() {
        let registry = CharClassRegistry::standard();
        for text in ["---", " ---", "!!", "a!", "、", "", "¿?", "→→", "\t"] {
            assert_eq!(
                scan(text).symbol_only,
                registry.is_symbol_only_token(text),
                "mismatch for {text:?}"
            );
        }
    }

    #[test]
    fn test_related_flag_matches_char_predicate() {
        let registry = CharClassRegistry::standard();
        let samples = (0x20u32..0x3000).step_by(7).chain(0x3000..0x3100).chain(0xF8F0..0xFFF0);
        for cp in samples {
            if let Some(c) = char::from_u32(cp) {
                let text = c.to_string();
                assert_eq!(
                    scan(&text).is_related_to_japanese(),
                    registry.is_japanese_related(c),
                    "mismatch for U+{cp:04X}"
                );
            }
        }
    }
}
