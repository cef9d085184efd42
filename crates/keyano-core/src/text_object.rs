//! Text objects: named scanning strategies that produce ranges.
//!
//! A text object answers three questions about a range in a text:
//!
//! - [`find_next`](TextObject::find_next): the next occurrence at or after
//!   the range's end,
//! - [`find_prev`](TextObject::find_prev): the previous occurrence before
//!   the range's start,
//! - [`expand`](TextObject::expand): a larger occurrence enclosing the range.
//!
//! Each returns `Option<Range>`. `None` means "no change": the caller must
//! leave the selection exactly as it was. A resolver never returns a range
//! outside the text or with `start > end`.
//!
//! # Variants
//!
//! | Variant           | Matches                                        |
//! |-------------------|------------------------------------------------|
//! | `Word`            | a run of word characters (see [`crate::word`]) |
//! | `Line`            | a full line including its newline              |
//! | `Buffer`          | the whole document                             |
//! | `PairedDelimiter` | a balanced `open … close` span, nesting-aware  |
//! | `SingleDelimiter` | a `token … token` span, no nesting             |
//! | `LiteralSearch`   | an exact substring                             |
//! | `Character`       | a single character                             |

use ropey::Rope;
use tracing::trace;

use crate::position::Range;
use crate::word::{find_backward, find_forward, index_of, is_word_char, last_index_of, run_end, run_start};

// ---------------------------------------------------------------------------
// TextObject
// ---------------------------------------------------------------------------

/// A text object. Closed set of scanning strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextObject {
    Word,
    Line,
    Buffer,
    /// Nesting-aware pair such as `(` `)`. `open` and `close` must differ.
    PairedDelimiter { open: char, close: char },
    /// Non-nesting pair of identical tokens: `"`, `` ` ``, ```` ``` ````.
    SingleDelimiter(String),
    /// Exact, case-sensitive substring.
    LiteralSearch(String),
    Character,
}

impl TextObject {
    /// `( … )`
    pub const PARENTHESES: Self = Self::PairedDelimiter {
        open: '(',
        close: ')',
    };
    /// `{ … }`
    pub const CURLY_BRACKETS: Self = Self::PairedDelimiter {
        open: '{',
        close: '}',
    };
    /// `[ … ]`
    pub const BRACKETS: Self = Self::PairedDelimiter {
        open: '[',
        close: ']',
    };

    /// `" … "`
    #[must_use]
    pub fn quotes() -> Self {
        Self::SingleDelimiter("\"".to_owned())
    }

    /// `` ` … ` ``
    #[must_use]
    pub fn tick() -> Self {
        Self::SingleDelimiter("`".to_owned())
    }

    /// ```` ``` … ``` ````
    #[must_use]
    pub fn triple_tick() -> Self {
        Self::SingleDelimiter("```".to_owned())
    }

    /// The next occurrence at or after `range.end`.
    #[must_use]
    pub fn find_next(&self, text: &Rope, range: Range) -> Option<Range> {
        if !range.fits(text.len_chars()) {
            return None;
        }
        let found = match self {
            Self::Word => word_next(text, range),
            Self::Line => line_next(text, range),
            Self::Buffer => whole(text, range),
            Self::PairedDelimiter { open, close } => paired_next(text, range, *open, *close),
            Self::SingleDelimiter(token) => single_next(text, range, &chars(token)),
            Self::LiteralSearch(token) => literal_next(text, range, &chars(token)),
            Self::Character => character_next(text, range),
        };
        trace!(object = ?self, ?range, ?found, "find_next");
        found
    }

    /// The previous occurrence before `range.start`.
    #[must_use]
    pub fn find_prev(&self, text: &Rope, range: Range) -> Option<Range> {
        if !range.fits(text.len_chars()) {
            return None;
        }
        let found = match self {
            Self::Word => word_prev(text, range),
            Self::Line => line_prev(text, range),
            Self::Buffer => whole(text, range),
            Self::PairedDelimiter { open, close } => paired_prev(text, range, *open, *close),
            Self::SingleDelimiter(token) => single_prev(text, range, &chars(token)),
            Self::LiteralSearch(token) => literal_prev(text, range, &chars(token)),
            Self::Character => character_prev(range),
        };
        trace!(object = ?self, ?range, ?found, "find_prev");
        found
    }

    /// A larger occurrence around `range`.
    #[must_use]
    pub fn expand(&self, text: &Rope, range: Range) -> Option<Range> {
        if !range.fits(text.len_chars()) {
            return None;
        }
        let found = match self {
            Self::Word => word_expand(text, range),
            Self::Line => line_expand(text, range),
            Self::Buffer => whole(text, range),
            Self::PairedDelimiter { open, close } => paired_expand(text, range, *open, *close),
            Self::SingleDelimiter(token) => single_expand(text, range, &chars(token)),
            Self::LiteralSearch(token) => literal_next(text, range, &chars(token)),
            Self::Character => character_expand(text, range),
        };
        trace!(object = ?self, ?range, ?found, "expand");
        found
    }

    /// A view of this object with the two directions swapped, used when the
    /// `Previous` flag is active.
    #[must_use]
    pub const fn reversed(&self) -> Reversed<'_> {
        Reversed(self)
    }
}

/// A [`TextObject`] whose `find_next` and `find_prev` are swapped.
#[derive(Debug, Clone, Copy)]
pub struct Reversed<'a>(&'a TextObject);

/// Anything that can resolve ranges. Implemented by [`TextObject`] and its
/// [`Reversed`] view, so selection code is written once for both directions.
pub trait Resolve {
    fn find_next(&self, text: &Rope, range: Range) -> Option<Range>;
    fn find_prev(&self, text: &Rope, range: Range) -> Option<Range>;
    fn expand(&self, text: &Rope, range: Range) -> Option<Range>;
}

impl Resolve for TextObject {
    fn find_next(&self, text: &Rope, range: Range) -> Option<Range> {
        Self::find_next(self, text, range)
    }
    fn find_prev(&self, text: &Rope, range: Range) -> Option<Range> {
        Self::find_prev(self, text, range)
    }
    fn expand(&self, text: &Rope, range: Range) -> Option<Range> {
        Self::expand(self, text, range)
    }
}

impl Resolve for Reversed<'_> {
    fn find_next(&self, text: &Rope, range: Range) -> Option<Range> {
        self.0.find_prev(text, range)
    }
    fn find_prev(&self, text: &Rope, range: Range) -> Option<Range> {
        self.0.find_next(text, range)
    }
    fn expand(&self, text: &Rope, range: Range) -> Option<Range> {
        self.0.expand(text, range)
    }
}

fn chars(token: &str) -> Vec<char> {
    token.chars().collect()
}

/// `Some(candidate)` unless it equals `range`.
fn changed(candidate: Range, range: Range) -> Option<Range> {
    (candidate != range).then_some(candidate)
}

// ---------------------------------------------------------------------------
// Word
// ---------------------------------------------------------------------------

/// The first word run that starts or continues at/after `range.end`.
fn word_next(text: &Rope, range: Range) -> Option<Range> {
    let idx = find_forward(text, range.end, is_word_char)?;
    Some(Range::new(run_start(text, idx), run_end(text, idx)))
}

/// The last word run with a char before `range.start`.
fn word_prev(text: &Rope, range: Range) -> Option<Range> {
    let before = range.start.checked_sub(1)?;
    let idx = find_backward(text, before, is_word_char)?;
    Some(Range::new(run_start(text, idx), run_end(text, idx)))
}

/// Snap both ends outward to word boundaries. If that changes nothing, take
/// in one more word run on each side.
fn word_expand(text: &Rope, range: Range) -> Option<Range> {
    let snapped = Range::new(
        word_start_at_or_before(text, range.start).unwrap_or(range.start),
        word_end_at_or_after(text, range.end.saturating_sub(1)).map_or(range.end, |e| e.max(range.end)),
    );
    if snapped != range {
        return Some(snapped);
    }

    let start = range
        .start
        .checked_sub(1)
        .and_then(|before| word_start_at_or_before(text, before))
        .unwrap_or(range.start);
    let end = word_end_at_or_after(text, range.end).unwrap_or(range.end);
    changed(Range::new(start, end), range)
}

fn word_start_at_or_before(text: &Rope, from: usize) -> Option<usize> {
    find_backward(text, from, is_word_char).map(|idx| run_start(text, idx))
}

fn word_end_at_or_after(text: &Rope, from: usize) -> Option<usize> {
    find_forward(text, from, is_word_char).map(|idx| run_end(text, idx))
}

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

/// The full line containing `offset`, newline included.
fn line_at(text: &Rope, offset: usize) -> Range {
    let line = text.char_to_line(offset);
    let start = text.line_to_char(line);
    Range::new(start, start + text.line(line).len_chars())
}

fn line_next(text: &Rope, range: Range) -> Option<Range> {
    let line = line_at(text, range.end);
    if line.is_empty() {
        // The empty line after a trailing newline.
        return None;
    }
    changed(line, range)
}

fn line_prev(text: &Rope, range: Range) -> Option<Range> {
    let len = text.len_chars();
    if len == 0 {
        return None;
    }
    let anchor = if range.is_empty() || range.start == 0 {
        range.start
    } else {
        range.start - 1
    };
    let line = line_at(text, anchor.min(len - 1));
    changed(line, range)
}

fn line_expand(text: &Rope, range: Range) -> Option<Range> {
    let len = text.len_chars();
    if len == 0 {
        return None;
    }
    let first = line_at(text, range.start.min(len - 1));
    let last_anchor = if range.is_empty() { range.end } else { range.end - 1 };
    let snapped = first.union(line_at(text, last_anchor.min(len - 1)));

    let following = (snapped.end < len).then(|| line_at(text, snapped.end));
    let preceding = (snapped.start > 0).then(|| line_at(text, snapped.start - 1));

    let grown = if range == first {
        preceding.or(following).map_or(snapped, |other| snapped.union(other))
    } else {
        following.map_or(snapped, |other| snapped.union(other))
    };
    changed(grown, range)
}

// ---------------------------------------------------------------------------
// Buffer
// ---------------------------------------------------------------------------

fn whole(text: &Rope, range: Range) -> Option<Range> {
    changed(Range::new(0, text.len_chars()), range)
}

// ---------------------------------------------------------------------------
// Paired delimiters
// ---------------------------------------------------------------------------

/// From an `open` at `idx`, scan forward for its matching `close`.
///
/// Starts at depth `depth`; each `open` increments, each `close` decrements.
/// Returns the offset of the `close` that brings depth to zero.
fn matching_close(text: &Rope, from: usize, open: char, close: char, mut depth: usize) -> Option<usize> {
    for (i, ch) in text.chars_at(from).enumerate() {
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(from + i);
            }
        }
    }
    None
}

/// From a `close`, scan backward (starting at `from`, inclusive) for the
/// matching `open`. Mirror of [`matching_close`].
fn matching_open(text: &Rope, from: usize, open: char, close: char, mut depth: usize) -> Option<usize> {
    let mut chars = text.chars_at(from + 1);
    let mut idx = from + 1;
    while let Some(ch) = chars.prev() {
        idx -= 1;
        if ch == close {
            depth += 1;
        } else if ch == open {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(idx);
            }
        }
    }
    None
}

/// Given a delimiter at `idx`, the full balanced span it belongs to.
fn pair_around(text: &Rope, idx: usize, open: char, close: char) -> Option<Range> {
    if text.char(idx) == open {
        let end = matching_close(text, idx, open, close, 0)?;
        Some(Range::new(idx, end + 1))
    } else {
        let start = matching_open(text, idx, open, close, 0)?;
        Some(Range::new(start, idx + 1))
    }
}

fn paired_next(text: &Rope, range: Range, open: char, close: char) -> Option<Range> {
    let idx = find_forward(text, range.end, |c| c == open || c == close)?;
    pair_around(text, idx, open, close)
}

fn paired_prev(text: &Rope, range: Range, open: char, close: char) -> Option<Range> {
    let before = range.start.checked_sub(1)?;
    let idx = find_backward(text, before, |c| c == open || c == close)?;
    pair_around(text, idx, open, close)
}

/// One nesting level outward: forward from `range.end` and backward from
/// `range.start`, both seeded at depth 1.
fn paired_expand(text: &Rope, range: Range, open: char, close: char) -> Option<Range> {
    let len = text.len_chars();
    if range.end >= len {
        return None;
    }
    let before = range.start.checked_sub(1)?;
    let end = matching_close(text, range.end, open, close, 1)?;
    let start = matching_open(text, before, open, close, 1)?;
    Some(Range::new(start, end + 1))
}

// ---------------------------------------------------------------------------
// Single delimiters
// ---------------------------------------------------------------------------

fn single_next(text: &Rope, range: Range, token: &[char]) -> Option<Range> {
    let n = token.len();
    let open = index_of(text, token, range.end)?;
    let close = index_of(text, token, open + n)?;
    Some(Range::new(open, close + n))
}

fn single_prev(text: &Rope, range: Range, token: &[char]) -> Option<Range> {
    let n = token.len();
    let close = last_index_of(text, token, range.start.checked_sub(n)?)?;
    let open = last_index_of(text, token, close.checked_sub(n)?)?;
    Some(Range::new(open, close + n))
}

fn single_expand(text: &Rope, range: Range, token: &[char]) -> Option<Range> {
    let n = token.len();
    let open = last_index_of(text, token, range.start.checked_sub(n)?)?;
    let close = index_of(text, token, range.end)?;
    Some(Range::new(open, close + n))
}

// ---------------------------------------------------------------------------
// Literal search
// ---------------------------------------------------------------------------

fn literal_next(text: &Rope, range: Range, token: &[char]) -> Option<Range> {
    let start = index_of(text, token, range.end)?;
    Some(Range::new(start, start + token.len()))
}

fn literal_prev(text: &Rope, range: Range, token: &[char]) -> Option<Range> {
    let start = last_index_of(text, token, range.start.checked_sub(token.len())?)?;
    Some(Range::new(start, start + token.len()))
}

// ---------------------------------------------------------------------------
// Character
// ---------------------------------------------------------------------------

fn character_next(text: &Rope, range: Range) -> Option<Range> {
    (range.end < text.len_chars()).then(|| Range::new(range.end, range.end + 1))
}

fn character_prev(range: Range) -> Option<Range> {
    let start = range.start.checked_sub(1)?;
    Some(Range::new(start, range.start))
}

fn character_expand(text: &Rope, range: Range) -> Option<Range> {
    (range.end < text.len_chars()).then(|| Range::new(range.start + 1, range.end + 1))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
