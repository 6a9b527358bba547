//! Token normalization shared by the merger and preset parsing.

use crate::constants::normalize::{MAX_WORD_CHARS, WORD_SEPARATORS};
use crate::types::Word;

/// Normalize a raw token into a canonical lexicon word.
///
/// Trims, lowercases, and accepts only Cyrillic letter runs joined by a
/// single apostrophe or hyphen. Returns `None` for anything else.
pub fn normalize_word(raw: &str) -> Option<Word> {
    let lowered = raw.trim().to_lowercase();
    let len = lowered.chars().count();
    if len == 0 || len > MAX_WORD_CHARS {
        return None;
    }
    if !is_letter_run_token(&lowered) {
        return None;
    }
    if lowered.chars().all(char::is_numeric) {
        return None;
    }
    Some(lowered)
}

/// Like [`normalize_word`], for optional fields.
pub fn normalize_token(raw: Option<&str>) -> Option<Word> {
    raw.and_then(normalize_word)
}

/// True if `word` is already in canonical form.
pub fn is_normalized(word: &str) -> bool {
    normalize_word(word).as_deref() == Some(word)
}

fn is_letter_run_token(token: &str) -> bool {
    let mut prev_letter = false;
    for ch in token.chars() {
        if is_cyrillic(ch) {
            prev_letter = true;
        } else if WORD_SEPARATORS.contains(&ch) && prev_letter {
            prev_letter = false;
        } else {
            return false;
        }
    }
    // Trailing separator leaves `prev_letter` unset.
    prev_letter
}

/// Characters of the Unicode Cyrillic script.
fn is_cyrillic(ch: char) -> bool {
    matches!(
        ch,
        '\u{0400}'..='\u{0484}'
            | '\u{0487}'..='\u{052F}'
            | '\u{1C80}'..='\u{1C88}'
            | '\u{1D2B}'
            | '\u{1D78}'
            | '\u{2DE0}'..='\u{2DFF}'
            | '\u{A640}'..='\u{A69F}'
            | '\u{FE2E}'..='\u{FE2F}'
            | '\u{1E030}'..='\u{1E06D}'
            | '\u{1E08F}'
    )
}
