//! Engine error type.
//!
//! Most failures in keyano are not errors at all: a resolver that finds
//! nothing returns `None`, an unbound key does nothing, and a continuation
//! that rejects its input resets the flag stack. [`Error`] covers the rest:
//! edits the buffer boundary refuses, bad configuration values, malformed
//! cursor notation, and file I/O.

use std::io;

use thiserror::Error;

use crate::notation::NotationError;

/// Errors surfaced by the engine and its reference buffer.
#[derive(Debug, Error)]
pub enum Error {
    /// An edit or selection referenced offsets past the end of the text.
    #[error("range {start}..{end} is out of bounds for a buffer of {len} chars")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    /// A keyboard layout name that no table exists for.
    #[error("unknown keyboard layout `{0}` (expected `qwerty` or `colemak`)")]
    UnknownLayout(String),

    /// Cursor notation could not be parsed.
    #[error(transparent)]
    Notation(#[from] NotationError),

    /// Reading or writing a buffer file failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Shorthand used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message() {
        let err = Error::RangeOutOfBounds {
            start: 2,
            end: 9,
            len: 4,
        };
        assert_eq!(
            err.to_string(),
            "range 2..9 is out of bounds for a buffer of 4 chars"
        );
    }

    #[test]
    fn unknown_layout_message() {
        let err = Error::UnknownLayout("dvorak".into());
        assert!(err.to_string().contains("dvorak"));
    }

    #[test]
    fn notation_converts() {
        let err: Error = NotationError::UnclosedSelection.into();
        assert!(matches!(
            err,
            Error::Notation(NotationError::UnclosedSelection)
        ));
    }
}
