use unicode_categories::UnicodeCategories;

use super::registry::CharClassRegistry;

/// Letters (L*) and numbers (Nd, Nl, No); combining marks are not alphanumeric
pub fn is_alphanumeric(c: char) -> bool {
    c.is_letter() || c.is_number()
}

/// Unicode whitespace plus the ASCII information separators U+001C to U+001F
pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c)
}

impl CharClassRegistry {
    /// Check whether a character belongs to any Japanese-related class
    ///
    /// This covers the scripts (hiragana, both katakana widths, kanji including
    /// compatibility forms), Japanese punctuation and symbols, and every
    /// full-width ASCII form. Full-width Latin letters count: in CJK text they
    /// signal the script selection, not the source language.
    pub fn is_japanese_related(&self, c: char) -> bool {
        self.hiragana.contains(c)
            || self.katakana_full.contains(c)
            || self.katakana_half.contains(c)
            || self.is_kanji(c)
            || self.kanji_compat.contains(c)
            || self.is_jp_punct_symbol(c)
            || self.fullwidth_ascii.contains(c)
            || self.fullwidth_digits.contains(c)
            || self.fullwidth_latin.contains(c)
    }

    /// Check whether a character is a Japanese script letter
    ///
    /// Only hiragana, katakana (full and half width) and kanji from the unified
    /// and extension blocks qualify. Punctuation, full-width ASCII and
    /// compatibility ideographs do not.
    pub fn is_pure_japanese_script(&self, c: char) -> bool {
        self.hiragana.contains(c)
            || self.katakana_full.contains(c)
            || self.katakana_half.contains(c)
            || self.is_kanji(c)
    }

    /// A character outside every defined class: not alphanumeric, not
    /// whitespace, not basic English and not Japanese-related
    ///
    /// See [`is_alphanumeric`] and [`is_whitespace`] for the exact classes.
    pub fn is_symbol_char(&self, c: char) -> bool {
        !is_alphanumeric(c)
            && !is_whitespace(c)
            && !self.basic_english.contains(c)
            && !self.is_japanese_related(c)
    }

    /// Check whether a token is made only of symbol characters
    ///
    /// # Returns
    /// `false` for the empty string, otherwise `true` iff every character
    /// satisfies [`CharClassRegistry::is_symbol_char`]
    pub fn is_symbol_only_token(&self, token: &str) -> bool {
        !token.is_empty() && token.chars().all(|c| self.is_symbol_char(c))
    }
}

/// Check that a byte sequence decodes to exactly one Japanese script character
///
/// Byte-level vocabularies often split a multi-byte character across tokens.
/// A truncated sequence fails UTF-8 validation and is reported as incomplete.
pub fn is_complete_japanese_utf8(bytes: &[u8]) -> bool {
    let Ok(text) = std::str::from_utf8(bytes) else {
        return false;
    };
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => CharClassRegistry::standard().is_pure_japanese_script(c),
        _ => false,
    }
}
