//! Named Unicode character classes used to classify vocabulary entries
//!
//! Every class is compile-time constant data. Classes may overlap on purpose:
//! the full-width digits and Latin letters are subsets of the full-width
//! printable ASCII block, and several Japanese punctuation marks are also
//! full-width ASCII forms.

/// A named, immutable set of Unicode scalar values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharClass {
    name: &'static str,
    members: Members,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Members {
    /// Inclusive code point ranges
    Ranges(&'static [(char, char)]),
    /// Explicit list of characters
    Chars(&'static str),
}

impl CharClass {
    pub const fn from_ranges(name: &'static str, ranges: &'static [(char, char)]) -> Self {
        Self { name, members: Members::Ranges(ranges) }
    }

    pub const fn from_chars(name: &'static str, chars: &'static str) -> Self {
        Self { name, members: Members::Chars(chars) }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn contains(&self, c: char) -> bool {
        match self.members {
            Members::Ranges(ranges) => ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi),
            Members::Chars(chars) => chars.contains(c),
        }
    }

    /// Number of distinct code points in the class
    pub fn len(&self) -> usize {
        match self.members {
            Members::Ranges(ranges) => ranges
                .iter()
                .map(|&(lo, hi)| (hi as usize) - (lo as usize) + 1)
                .sum(),
            Members::Chars(chars) => {
                let mut seen: Vec<char> = chars.chars().collect();
                seen.sort_unstable();
                seen.dedup();
                seen.len()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub const HIRAGANA: CharClass = CharClass::from_ranges("hiragana", &[('\u{3040}', '\u{309F}')]);

// Includes the prolonged sound mark and the middle dot
pub const KATAKANA_FULL: CharClass =
    CharClass::from_ranges("katakana_full", &[('\u{30A0}', '\u{30FF}')]);

// Half-width katakana plus the half-width voiced sound marks
pub const KATAKANA_HALF: CharClass =
    CharClass::from_ranges("katakana_half", &[('\u{FF65}', '\u{FF9F}')]);

pub const KANJI_COMMON: CharClass =
    CharClass::from_ranges("kanji_common", &[('\u{4E00}', '\u{9FFF}')]);

pub const KANJI_EXTENSIONS: CharClass = CharClass::from_ranges(
    "kanji_extensions",
    &[
        ('\u{3400}', '\u{4DBF}'),   // CJK Extension A
        ('\u{20000}', '\u{2A6DF}'), // CJK Extension B
        ('\u{2A700}', '\u{2B73F}'), // CJK Extension C
        ('\u{2B740}', '\u{2B81F}'), // CJK Extension D
        ('\u{2B820}', '\u{2CEAF}'), // CJK Extension E
        ('\u{2CEB0}', '\u{2EBEF}'), // CJK Extension F
        ('\u{30000}', '\u{3134F}'), // CJK Extension G
    ],
);

pub const KANJI_COMPAT: CharClass = CharClass::from_ranges(
    "kanji_compat",
    &[
        ('\u{F900}', '\u{FAFF}'),   // CJK Compatibility Ideographs
        ('\u{2F800}', '\u{2FA1F}'), // CJK Compatibility Ideographs Supplement
    ],
);

pub const JP_PUNCT: CharClass =
    CharClass::from_chars("jp_punct", "、。「」『』【】・（）：；？！｡｢｣､");

// Ideographic space, wave dash, middle dot, full-width yen sign
pub const JP_SYMBOLS: CharClass = CharClass::from_chars("jp_symbols", "\u{3000}〜・￥");

pub const FULLWIDTH_ASCII: CharClass =
    CharClass::from_ranges("fullwidth_ascii", &[('\u{FF01}', '\u{FF5E}')]);

pub const FULLWIDTH_DIGITS: CharClass =
    CharClass::from_ranges("fullwidth_digits", &[('\u{FF10}', '\u{FF19}')]);

pub const FULLWIDTH_LATIN: CharClass = CharClass::from_ranges(
    "fullwidth_latin",
    &[('\u{FF21}', '\u{FF3A}'), ('\u{FF41}', '\u{FF5A}')],
);

pub const BASIC_ENGLISH: CharClass =
    CharClass::from_ranges("basic_english", &[('A', 'Z'), ('a', 'z')]);

/// The full set of character classes the classifier reads from
///
/// The registry is plain data: build it once (or use [`CharClassRegistry::standard`])
/// and share it by reference with every classifier and worker thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharClassRegistry {
    pub hiragana: CharClass,
    pub katakana_full: CharClass,
    pub katakana_half: CharClass,
    pub kanji_common: CharClass,
    pub kanji_extensions: CharClass,
    pub kanji_compat: CharClass,
    pub jp_punct: CharClass,
    pub jp_symbols: CharClass,
    pub fullwidth_ascii: CharClass,
    pub fullwidth_digits: CharClass,
    pub fullwidth_latin: CharClass,
    pub basic_english: CharClass,
}

static STANDARD: CharClassRegistry = CharClassRegistry {
    hiragana: HIRAGANA,
    katakana_full: KATAKANA_FULL,
    katakana_half: KATAKANA_HALF,
    kanji_common: KANJI_COMMON,
    kanji_extensions: KANJI_EXTENSIONS,
    kanji_compat: KANJI_COMPAT,
    jp_punct: JP_PUNCT,
    jp_symbols: JP_SYMBOLS,
    fullwidth_ascii: FULLWIDTH_ASCII,
    fullwidth_digits: FULLWIDTH_DIGITS,
    fullwidth_latin: FULLWIDTH_LATIN,
    basic_english: BASIC_ENGLISH,
};

impl CharClassRegistry {
    /// Process-wide registry with the standard Japanese/English tables
    pub fn standard() -> &'static CharClassRegistry {
        &STANDARD
    }

    pub fn classes(&self) -> [&CharClass; 12] {
        [
            &self.hiragana,
            &self.katakana_full,
            &self.katakana_half,
            &self.kanji_common,
            &self.kanji_extensions,
            &self.kanji_compat,
            &self.jp_punct,
            &self.jp_symbols,
            &self.fullwidth_ascii,
            &self.fullwidth_digits,
            &self.fullwidth_latin,
            &self.basic_english,
        ]
    }

    /// Look a class up by name
    pub fn get(&self, name: &str) -> Option<&CharClass> {
        self.classes().into_iter().find(|class| class.name() == name)
    }

    /// Unified ideographs and their extension blocks (compatibility forms excluded)
    pub fn is_kanji(&self, c: char) -> bool {
        self.kanji_common.contains(c) || self.kanji_extensions.contains(c)
    }

    pub fn is_jp_punct_symbol(&self, c: char) -> bool {
        self.jp_punct.contains(c) || self.jp_symbols.contains(c)
    }
}

impl Default for CharClassRegistry {
    fn default() -> Self {
        STANDARD
    }
}
