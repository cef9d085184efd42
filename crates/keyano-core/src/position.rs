//! Offsets, ranges, and host positions.
//!
//! The engine works entirely in **char offsets**: an offset is an index into
//! the buffer's sequence of Unicode scalar values, `0 ..= len_chars`. This is
//! the same indexing `ropey` uses, so resolvers get O(log n) access through
//! the rope's tree without any conversion.
//!
//! Hosts usually think in `(line, col)` instead. [`Position`] is that
//! coordinate, and the conversion lives on the buffer boundary
//! ([`TextBuffer::offset_to_position`](crate::buffer::TextBuffer::offset_to_position)).
//! Nothing inside the engine ever looks at a `Position`.

use std::fmt;

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open range of char offsets: `[start, end)`.
///
/// `start` is inclusive, `end` is exclusive, and `start <= end` always holds.
/// An empty range (`start == end`) is a cursor. Resolvers signal "nothing
/// found" with `Option::None`, never with a degenerate range.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    /// Create a range. Panics in debug if `start > end`.
    #[inline]
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Range::new requires start <= end");
        Self { start, end }
    }

    /// A zero-width range (cursor) at `offset`.
    #[inline]
    #[must_use]
    pub const fn point(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// True when the range spans zero characters.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Number of chars covered.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// The smallest range covering both.
    #[inline]
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// True when both ends lie within a text of `len` chars.
    #[inline]
    #[must_use]
    pub const fn fits(self, len: usize) -> bool {
        self.start <= self.end && self.end <= len
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Range({}..{})", self.start, self.end)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A host-side position: (line, column), both 0-indexed.
///
/// `col` counts chars from the start of the line, **not** bytes. For the line
/// `"café\n"`, column 4 is the newline.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// Line 0, column 0.
    pub const ZERO: Self = Self { line: 0, col: 0 };

    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for human display.
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_is_empty() {
        let r = Range::point(4);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
    }

    #[test]
    fn union_spans_both() {
        assert_eq!(Range::new(2, 4).union(Range::new(6, 9)), Range::new(2, 9));
    }

    #[test]
    fn fits_checks_length() {
        assert!(Range::new(0, 5).fits(5));
        assert!(!Range::new(0, 6).fits(5));
    }

    #[test]
    fn debug_and_display() {
        assert_eq!(format!("{:?}", Range::new(1, 3)), "Range(1..3)");
        assert_eq!(format!("{}", Range::new(1, 3)), "1..3");
        assert_eq!(format!("{:?}", Position::new(2, 5)), "Pos(2:5)");
        assert_eq!(format!("{}", Position::new(2, 5)), "3:6");
    }

    #[test]
    fn position_ordering() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(1, 2) < Position::new(1, 3));
    }
}
