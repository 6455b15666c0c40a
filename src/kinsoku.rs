//! Prohibition Rule Tables (kinsoku shori)
//!
//! Static classification of characters that may not open a line, may not
//! close a line, or may not be separated from their neighbour.

use regex::Regex;
use std::sync::LazyLock;

/// Characters that may never open a line.
pub const LINE_START_FORBIDDEN: &[char] = &[
    // Closing brackets and quotes
    ',', ')', ']', '｝', '、', '〕', '〉', '》', '」', '』', '】', '〙', '〗', '〟', '’', '”', '｠', '»',
    // Iteration marks, prolonged sound mark, small kana
    'ゝ', 'ゞ', 'ー', 'ァ', 'ィ', 'ゥ', 'ェ', 'ォ', 'ッ', 'ャ', 'ュ', 'ョ', 'ヮ', 'ヵ', 'ヶ',
    'ぁ', 'ぃ', 'ぅ', 'ぇ', 'ぉ', 'っ', 'ゃ', 'ゅ', 'ょ', 'ゎ', 'ゕ', 'ゖ',
    'ㇰ', 'ㇱ', 'ㇲ', 'ㇳ', 'ㇴ', 'ㇵ', 'ㇶ', 'ㇷ', 'ㇸ', 'ㇹ', 'ㇺ', 'ㇻ', 'ㇼ', 'ㇽ', 'ㇾ', 'ㇿ',
    '々', '〻',
    // Hyphens
    '‐', '゠', '–', '〜', '～',
    // Terminators
    '?', '!', '‼', '⁇', '⁈', '⁉',
    // Middle dots, colons, full stops
    '・', ':', ';', '/', '。', '.',
];

/// Characters that may never close a line.
pub const LINE_END_FORBIDDEN: &[char] = &[
    '(', '[', '｛', '〔', '〈', '《', '「', '『', '【', '〘', '〖', '〝', '‘', '“', '｟', '«',
];

static INSEPARABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z]{2}|,[0-9]|[0-9],|[0-9]{2}|——|……|‥‥|〳〳|〴〴|〵〵)$")
        .expect("BUG: invalid INSEPARABLE regex literal")
});

pub fn is_line_start_forbidden(ch: char) -> bool {
    LINE_START_FORBIDDEN.contains(&ch)
}

pub fn is_line_end_forbidden(ch: char) -> bool {
    LINE_END_FORBIDDEN.contains(&ch)
}

/// Whether `prev` followed by `next` forms a pair that must stay on one line:
/// two ASCII letters, two ASCII digits, a comma next to a digit, or one of the
/// doubled marks (dashes, ellipses, reduplication marks).
pub fn is_inseparable(prev: char, next: char) -> bool {
    let mut pair = String::with_capacity(8);
    pair.push(prev);
    pair.push(next);
    INSEPARABLE.is_match(&pair)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_and_end_tables_are_disjoint() {
        for ch in LINE_START_FORBIDDEN {
            assert!(!is_line_end_forbidden(*ch), "{ch} is in both tables");
        }
    }

    #[test]
    fn test_line_start_forbidden() {
        for ch in ['、', '。', '」', 'っ', 'ー', '!', ',', '.'] {
            assert!(is_line_start_forbidden(ch), "{ch}");
        }
        for ch in ['あ', '「', 'A', '1', ' '] {
            assert!(!is_line_start_forbidden(ch), "{ch}");
        }
    }

    #[test]
    fn test_line_end_forbidden() {
        for ch in ['「', '『', '(', '[', '“', '«'] {
            assert!(is_line_end_forbidden(ch), "{ch}");
        }
        // Full-width parenthesis is not in the table.
        assert!(!is_line_end_forbidden('（'));
        assert!(!is_line_end_forbidden('」'));
    }

    #[test]
    fn test_inseparable_pairs() {
        assert!(is_inseparable('a', 'B'));
        assert!(is_inseparable('1', '2'));
        assert!(is_inseparable('1', ','));
        assert!(is_inseparable(',', '3'));
        assert!(is_inseparable('—', '—'));
        assert!(is_inseparable('…', '…'));
        assert!(is_inseparable('‥', '‥'));
        assert!(is_inseparable('〳', '〳'));
    }

    #[test]
    fn test_separable_pairs() {
        assert!(!is_inseparable('a', ' '));
        assert!(!is_inseparable('a', '1'));
        assert!(!is_inseparable(',', ','));
        assert!(!is_inseparable('あ', 'い'));
        assert!(!is_inseparable('—', '…'));
        // Full-width letters are not covered by the Latin rule.
        assert!(!is_inseparable('Ａ', 'Ｂ'));
    }
}
