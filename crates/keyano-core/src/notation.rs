//! Cursor notation: buffer text with inline selection markers.
//!
//! Used by tests and by the command-line host to describe a buffer and its
//! selection set in a single string.
//!
//! # Syntax
//!
//! | Marker     | Meaning                                  |
//! |------------|------------------------------------------|
//! | `\|`       | an empty selection (cursor)              |
//! | `<\|text\|>` | a selection covering `text`              |
//! | `\|\|`     | a literal `\|` character                 |
//!
//! Offsets are char offsets into the unmarked text, in marker order.
//!
//! ```ignore
//! let p = notation::parse("fo|o <|bar|>").unwrap();
//! assert_eq!(p.text, "foo bar");
//! assert_eq!(p.selections, vec![Range::point(2), Range::new(4, 7)]);
//! ```

use thiserror::Error;

use crate::position::Range;

/// Text with markers removed, plus the selections they described.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub text: String,
    pub selections: Vec<Range>,
}

/// Malformed notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("unclosed selection (missing |>)")]
    UnclosedSelection,

    #[error("unexpected |> without a matching <|")]
    UnexpectedSelectionEnd,

    #[error("cursor marker inside a selection at char {0}")]
    CursorInsideSelection(usize),

    #[error("selections overlap at char {0}")]
    Overlapping(usize),
}

/// Parse a marked string.
///
/// # Errors
///
/// Returns a [`NotationError`] for unbalanced or nested markers.
pub fn parse(input: &str) -> Result<Parsed, NotationError> {
    let mut text = String::with_capacity(input.len());
    let mut selections = Vec::new();
    let mut chars = input.chars().peekable();
    let mut offset = 0;
    let mut open: Option<usize> = None;

    while let Some(ch) = chars.next() {
        match ch {
            '|' => match chars.peek() {
                Some('|') => {
                    chars.next();
                    text.push('|');
                    offset += 1;
                }
                Some('>') => {
                    chars.next();
                    let start = open.take().ok_or(NotationError::UnexpectedSelectionEnd)?;
                    selections.push(Range::new(start, offset));
                }
                _ => {
                    if open.is_some() {
                        return Err(NotationError::CursorInsideSelection(offset));
                    }
                    selections.push(Range::point(offset));
                }
            },
            '<' if chars.peek() == Some(&'|') => {
                chars.next();
                if open.is_some() {
                    return Err(NotationError::Overlapping(offset));
                }
                open = Some(offset);
            }
            _ => {
                text.push(ch);
                offset += 1;
            }
        }
    }

    if open.is_some() {
        return Err(NotationError::UnclosedSelection);
    }

    Ok(Parsed { text, selections })
}

/// Render text with markers for the given selections.
///
/// The inverse of [`parse`]. Selections are drawn in document order; literal
/// `|` characters in the text are escaped.
#[must_use]
pub fn format(text: &str, selections: &[Range]) -> String {
    let mut markers: Vec<(usize, &str)> = Vec::with_capacity(selections.len() * 2);
    for sel in selections {
        if sel.is_empty() {
            markers.push((sel.start, "|"));
        } else {
            markers.push((sel.start, "<|"));
            markers.push((sel.end, "|>"));
        }
    }
    // Closing markers sort before opening ones at the same offset.
    markers.sort_by_key(|&(offset, marker)| (offset, marker != "|>"));

    let mut out = String::with_capacity(text.len() + markers.len() * 2);
    let mut pending = markers.into_iter().peekable();
    for (idx, ch) in text.chars().enumerate() {
        while let Some(&(offset, marker)) = pending.peek() {
            if offset > idx {
                break;
            }
            out.push_str(marker);
            pending.next();
        }
        if ch == '|' {
            out.push_str("||");
        } else {
            out.push(ch);
        }
    }
    for (_, marker) in pending {
        out.push_str(marker);
    }
    out
}
