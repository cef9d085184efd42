//! Character classification and low-level scanning.
//!
//! Every character falls into exactly one [`CharClass`]:
//!
//! | Class        | Members                                              |
//! |--------------|------------------------------------------------------|
//! | `Whitespace` | space, tab, `\n`, `\r`, form feed                    |
//! | `Separator`  | `` ~!@#$%^&*()-=+[{]}\|;:'",.<>/? ``                 |
//! | `Word`       | everything else (letters, digits, `_`, non-ASCII)    |
//!
//! A **word** is a maximal run of `Word` characters. Unlike Vim, separators
//! never form words of their own: `a::b` contains two words.
//!
//! The scanning helpers here work on char offsets into a [`Rope`] and are
//! shared by the text-object resolvers.

use ropey::Rope;

// ---------------------------------------------------------------------------
// Character classification
// ---------------------------------------------------------------------------

/// Character class for word boundary detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Space, tab, line feed, carriage return, form feed.
    Whitespace,
    /// Letters, digits, and anything not in the other two classes.
    Word,
    /// Punctuation from the fixed separator set.
    Separator,
}

const SEPARATORS: &str = "~!@#$%^&*()-=+[{]}\\|;:'\",.<>/?";

/// Classify a character.
#[must_use]
pub fn classify(ch: char) -> CharClass {
    if matches!(ch, ' ' | '\t' | '\n' | '\r' | '\u{0C}') {
        CharClass::Whitespace
    } else if SEPARATORS.contains(ch) {
        CharClass::Separator
    } else {
        CharClass::Word
    }
}

/// True if `ch` belongs to a word.
#[inline]
#[must_use]
pub fn is_word_char(ch: char) -> bool {
    classify(ch) == CharClass::Word
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

/// First offset `>= from` whose char satisfies `pred`.
pub(crate) fn find_forward(text: &Rope, from: usize, pred: impl Fn(char) -> bool) -> Option<usize> {
    let len = text.len_chars();
    if from >= len {
        return None;
    }
    text.chars_at(from)
        .position(pred)
        .map(|steps| from + steps)
}

/// Last offset `<= from` whose char satisfies `pred`.
pub(crate) fn find_backward(text: &Rope, from: usize, pred: impl Fn(char) -> bool) -> Option<usize> {
    let len = text.len_chars();
    if len == 0 {
        return None;
    }
    let from = from.min(len - 1);
    let mut chars = text.chars_at(from + 1);
    let mut idx = from + 1;
    while let Some(ch) = chars.prev() {
        idx -= 1;
        if pred(ch) {
            return Some(idx);
        }
    }
    None
}

/// Start of the word run containing `idx` (which must be a word char).
pub(crate) fn run_start(text: &Rope, idx: usize) -> usize {
    if idx == 0 {
        return 0;
    }
    find_backward(text, idx - 1, |c| !is_word_char(c)).map_or(0, |i| i + 1)
}

/// End (exclusive) of the word run containing `idx` (which must be a word char).
pub(crate) fn run_end(text: &Rope, idx: usize) -> usize {
    find_forward(text, idx, |c| !is_word_char(c)).unwrap_or_else(|| text.len_chars())
}

/// Offset of the first occurrence of `needle` starting at or after `from`.
pub(crate) fn index_of(text: &Rope, needle: &[char], from: usize) -> Option<usize> {
    let len = text.len_chars();
    let n = needle.len();
    if n == 0 || n > len {
        return None;
    }
    (from..=len - n).find(|&i| matches_at(text, needle, i))
}

/// Offset of the last occurrence of `needle` starting at or before `from`.
pub(crate) fn last_index_of(text: &Rope, needle: &[char], from: usize) -> Option<usize> {
    let len = text.len_chars();
    let n = needle.len();
    if n == 0 || n > len {
        return None;
    }
    let last = from.min(len - n);
    (0..=last).rev().find(|&i| matches_at(text, needle, i))
}

fn matches_at(text: &Rope, needle: &[char], at: usize) -> bool {
    text.chars_at(at).zip(needle).all(|(a, &b)| a == b)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn rope(s: &str) -> Rope {
        Rope::from_str(s)
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    // -- classify -----------------------------------------------------------

    #[test]
    fn classify_whitespace() {
        for ch in [' ', '\t', '\n', '\r', '\u{0C}'] {
            assert_eq!(classify(ch), CharClass::Whitespace, "{ch:?}");
        }
    }

    #[test]
    fn classify_separators() {
        for ch in "~!@#$%^&*()-=+[{]}\\|;:'\",.<>/?".chars() {
            assert_eq!(classify(ch), CharClass::Separator, "{ch:?}");
        }
    }

    #[test]
    fn classify_word() {
        for ch in ['a', 'Z', '0', '_', 'é', '字', '`'] {
            assert_eq!(classify(ch), CharClass::Word, "{ch:?}");
        }
    }

    // -- find_forward / find_backward ---------------------------------------

    #[test]
    fn find_forward_basic() {
        let t = rope("  ab");
        assert_eq!(find_forward(&t, 0, is_word_char), Some(2));
        assert_eq!(find_forward(&t, 3, is_word_char), Some(3));
        assert_eq!(find_forward(&t, 4, is_word_char), None);
    }

    #[test]
    fn find_backward_basic() {
        let t = rope("ab  ");
        assert_eq!(find_backward(&t, 3, is_word_char), Some(1));
        assert_eq!(find_backward(&t, 0, is_word_char), Some(0));
        assert_eq!(find_backward(&rope("  "), 1, is_word_char), None);
    }

    #[test]
    fn find_backward_clamps_past_end() {
        let t = rope("ab");
        assert_eq!(find_backward(&t, 99, is_word_char), Some(1));
        assert_eq!(find_backward(&rope(""), 0, is_word_char), None);
    }

    // -- runs ---------------------------------------------------------------

    #[test]
    fn run_bounds() {
        let t = rope("foo.bar baz");
        assert_eq!((run_start(&t, 1), run_end(&t, 1)), (0, 3));
        assert_eq!((run_start(&t, 5), run_end(&t, 5)), (4, 7));
        assert_eq!((run_start(&t, 10), run_end(&t, 10)), (8, 11));
    }

    // -- substring search ---------------------------------------------------

    #[test]
    fn index_of_finds_first_at_or_after() {
        let t = rope("abcabc");
        assert_eq!(index_of(&t, &chars("bc"), 0), Some(1));
        assert_eq!(index_of(&t, &chars("bc"), 1), Some(1));
        assert_eq!(index_of(&t, &chars("bc"), 2), Some(4));
        assert_eq!(index_of(&t, &chars("bc"), 5), None);
        assert_eq!(index_of(&t, &[], 0), None);
    }

    #[test]
    fn last_index_of_finds_last_at_or_before() {
        let t = rope("abcabc");
        assert_eq!(last_index_of(&t, &chars("ab"), 5), Some(3));
        assert_eq!(last_index_of(&t, &chars("ab"), 2), Some(0));
        assert_eq!(last_index_of(&t, &chars("x"), 5), None);
        assert_eq!(last_index_of(&t, &chars("abcabcabc"), 9), None);
    }
}
