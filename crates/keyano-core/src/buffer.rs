//! The buffer boundary: what the engine needs from a host editor.
//!
//! [`TextBuffer`] is the whole contract: read the text, read and replace the
//! selection set, and replace a range of text. Everything else a host does
//! (rendering, undo, file management) stays on its side of the line.
//!
//! [`Buffer`] is a rope-backed implementation used by the command-line host
//! and the tests. It wraps a [`ropey::Rope`] the same way an editor buffer
//! would, plus a selection set and an optional file path.
//!
//! # Edits are synchronous
//!
//! `replace_text` returns only once the edit is applied. A command that
//! edits therefore finishes all of its edits before it returns, and the next
//! keystroke always sees the post-edit text and selections.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use ropey::Rope;

use crate::error::{Error, Result};
use crate::position::{Position, Range};

// ---------------------------------------------------------------------------
// TextBuffer
// ---------------------------------------------------------------------------

/// A host document with a selection set.
///
/// Offsets are char offsets into [`text`](Self::text). The selection set is
/// never empty; index 0 is the primary selection.
pub trait TextBuffer {
    /// The current document text.
    fn text(&self) -> &Rope;

    /// The current selection set, primary first.
    fn selections(&self) -> Vec<Range>;

    /// Replace the whole selection set. An empty vector is ignored.
    fn set_selections(&mut self, selections: Vec<Range>);

    /// Replace `range` with `text`. Selections are not adjusted; callers set
    /// them explicitly afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`] if `range` does not fit the text.
    fn replace_text(&mut self, range: Range, text: &str) -> Result<()>;

    /// The primary selection.
    fn primary(&self) -> Range {
        self.selections().first().copied().unwrap_or_default()
    }

    /// Replace the selection set with a single range.
    fn select(&mut self, range: Range) {
        self.set_selections(vec![range]);
    }

    /// Type `text` at every selection, replacing selected text and leaving a
    /// cursor after each insertion.
    ///
    /// # Errors
    ///
    /// Propagates any [`replace_text`](Self::replace_text) failure.
    fn insert_text(&mut self, text: &str) -> Result<()> {
        let edits: Vec<(Range, String)> = self
            .selections()
            .into_iter()
            .map(|sel| (sel, text.to_owned()))
            .collect();
        let inserted = apply_edits(self, &edits)?;
        self.set_selections(inserted.into_iter().map(|r| Range::point(r.end)).collect());
        Ok(())
    }

    /// Convert a char offset to a host `(line, col)`. Offsets past the end
    /// clamp to the end of the text.
    fn offset_to_position(&self, offset: usize) -> Position {
        let text = self.text();
        let offset = offset.min(text.len_chars());
        let line = text.char_to_line(offset);
        Position::new(line, offset - text.line_to_char(line))
    }

    /// Convert a host `(line, col)` to a char offset. `None` when the line
    /// does not exist or the column runs past the line (newline included).
    fn position_to_offset(&self, pos: Position) -> Option<usize> {
        let text = self.text();
        if pos.line >= text.len_lines() {
            return None;
        }
        let line_start = text.line_to_char(pos.line);
        (pos.col <= text.line(pos.line).len_chars()).then_some(line_start + pos.col)
    }
}

/// Apply several non-overlapping edits, last-to-first so earlier offsets stay
/// valid. Returns the range each replacement text occupies afterwards, in the
/// same order as `edits`.
///
/// # Errors
///
/// Propagates the first [`TextBuffer::replace_text`] failure. Edits applied
/// before the failure stay applied.
pub fn apply_edits<B: TextBuffer + ?Sized>(buffer: &mut B, edits: &[(Range, String)]) -> Result<Vec<Range>> {
    let len = buffer.text().len_chars();
    if let Some((bad, _)) = edits.iter().find(|(range, _)| !range.fits(len)) {
        return Err(Error::RangeOutOfBounds {
            start: bad.start,
            end: bad.end,
            len,
        });
    }

    let mut order: Vec<usize> = (0..edits.len()).collect();
    order.sort_by_key(|&i| edits[i].0.start);

    // Final position of each edit: its start shifted by the net growth of
    // every edit before it.
    let mut placed = vec![Range::default(); edits.len()];
    let mut shift: isize = 0;
    for &i in &order {
        let (range, text) = &edits[i];
        let new_len = text.chars().count();
        let start = range.start.saturating_add_signed(shift);
        placed[i] = Range::new(start, start + new_len);
        shift += signed(new_len) - signed(range.len());
    }

    for &i in order.iter().rev() {
        let (range, text) = &edits[i];
        buffer.replace_text(*range, text)?;
    }
    Ok(placed)
}

#[allow(clippy::cast_possible_wrap)]
const fn signed(n: usize) -> isize {
    n as isize
}

// ---------------------------------------------------------------------------
// Buffer
// ---------------------------------------------------------------------------

/// A rope-backed [`TextBuffer`] with an optional file path.
pub struct Buffer {
    rope: Rope,
    selections: Vec<Range>,
    path: Option<PathBuf>,
    modified: bool,
}

impl Buffer {
    /// An empty buffer with a cursor at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// A buffer holding `text`, cursor at 0.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selections: vec![Range::point(0)],
            path: None,
            modified: false,
        }
    }

    /// A buffer from cursor notation (see [`crate::notation`]). With no
    /// markers the cursor starts at 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Notation`] if the markers are malformed.
    pub fn from_notation(marked: &str) -> Result<Self> {
        let parsed = crate::notation::parse(marked)?;
        let mut buf = Self::from_text(&parsed.text);
        buf.set_selections(parsed.selections);
        Ok(buf)
    }

    /// Load a buffer from a file. Cursor at 0, unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read or is not UTF-8.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut buf = Self::from_text(&text);
        buf.path = Some(path.to_path_buf());
        Ok(buf)
    }

    /// Total char count.
    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Collect all text into a `String`.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    /// The text covered by `range`, or `None` if it does not fit.
    #[must_use]
    pub fn slice(&self, range: Range) -> Option<String> {
        range
            .fits(self.len_chars())
            .then(|| self.rope.slice(range.start..range.end).to_string())
    }

    /// The text of every selection, primary first.
    #[must_use]
    pub fn selected_texts(&self) -> Vec<String> {
        self.selections.iter().filter_map(|&r| self.slice(r)).collect()
    }

    /// Text and selections rendered in cursor notation.
    #[must_use]
    pub fn to_notation(&self) -> String {
        crate::notation::format(&self.contents(), &self.selections)
    }

    // -- Metadata -----------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// True once any edit has been applied since load or the last save.
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    // -- File I/O -----------------------------------------------------------

    /// Save to the associated path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if no path is set or the write fails.
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "buffer has no file path"))?;
        self.save_as(&path)
    }

    /// Save to `path` and remember it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the write fails.
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        fs::write(path, self.contents())?;
        self.path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }
}

impl TextBuffer for Buffer {
    fn text(&self) -> &Rope {
        &self.rope
    }

    fn selections(&self) -> Vec<Range> {
        self.selections.clone()
    }

    fn set_selections(&mut self, selections: Vec<Range>) {
        if selections.is_empty() {
            return;
        }
        let len = self.len_chars();
        self.selections = selections
            .into_iter()
            .map(|r| Range::new(r.start.min(len), r.end.min(len)))
            .collect();
    }

    fn replace_text(&mut self, range: Range, text: &str) -> Result<()> {
        let len = self.len_chars();
        if !range.fits(len) {
            return Err(Error::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }
        self.rope.remove(range.start..range.end);
        self.rope.insert(range.start, text);
        self.modified = true;
        Ok(())
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("chars", &self.len_chars())
            .field("selections", &self.selections)
            .field("modified", &self.modified)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
