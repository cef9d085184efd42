//! Jump labels.
//!
//! With the jump flag active, a selection command does not move straight to
//! the next match. Instead every match of the text object in the document is
//! collected in order, each is given a two-letter label (`aa`, `ab`, … `zz`),
//! and the host draws the labels. Typing a label selects its match.
//!
//! Labels are assigned by position in the scan, so the same text and object
//! always produce the same labels.

use std::fmt;

use ropey::Rope;
use tracing::debug;

use crate::position::Range;
use crate::text_object::TextObject;

/// Letters used in labels.
const ALPHABET: u8 = 26;

/// Number of distinct labels, `aa` through `zz`.
pub const LABEL_CAPACITY: usize = (ALPHABET as usize) * (ALPHABET as usize);

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// A two-letter jump label.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label([char; 2]);

impl Label {
    /// The label at `index` in assignment order. `None` past
    /// [`LABEL_CAPACITY`].
    #[must_use]
    pub fn nth(index: usize) -> Option<Self> {
        if index >= LABEL_CAPACITY {
            return None;
        }
        let n = ALPHABET as usize;
        Some(Self([letter(index / n), letter(index % n)]))
    }

    /// The label spelled by two typed keys.
    #[must_use]
    pub const fn from_keys(first: char, second: char) -> Self {
        Self([first, second])
    }

    #[must_use]
    pub const fn chars(self) -> [char; 2] {
        self.0
    }
}

fn letter(i: usize) -> char {
    char::from(b'a' + u8::try_from(i).unwrap_or(0))
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0[0], self.0[1])
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({self})")
    }
}

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// A labelled match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub range: Range,
    pub label: Label,
}

/// Scan `text` for every match of `object` and label them in document order.
///
/// The scan always runs forward from offset 0 by repeated `find_next`. It
/// stops when there are no more matches, when a match does not move past the
/// previous one, or after [`LABEL_CAPACITY`] targets.
#[must_use]
pub fn assign_targets(object: &TextObject, text: &Rope) -> Vec<Target> {
    let mut targets = Vec::new();
    let mut prev = Range::point(0);
    while let Some(range) = object.find_next(text, prev) {
        if !targets.is_empty() && (range.start, range.end) <= (prev.start, prev.end) {
            break;
        }
        let Some(label) = Label::nth(targets.len()) else {
            break;
        };
        targets.push(Target { range, label });
        prev = range;
    }
    debug!(object = ?object, count = targets.len(), "jump targets");
    targets
}

/// The target carrying `label`, if any.
#[must_use]
pub fn find_target(targets: &[Target], label: Label) -> Option<&Target> {
    targets.iter().find(|t| t.label == label)
}

// ---------------------------------------------------------------------------
// DecorationSink
// ---------------------------------------------------------------------------

/// Where jump labels are drawn. Implemented by the host.
pub trait DecorationSink {
    /// Show `targets`, replacing any labels already shown.
    fn show_labels(&mut self, targets: &[Target]);

    /// Remove all labels.
    fn clear_labels(&mut self);
}

/// A sink that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDecorations;

impl DecorationSink for NoDecorations {
    fn show_labels(&mut self, _targets: &[Target]) {}
    fn clear_labels(&mut self) {}
}

/// A sink that remembers what it was asked to show.
///
/// Used by the command-line host to print labels and by tests.
#[derive(Debug, Clone, Default)]
pub struct RecordedDecorations {
    /// Labels currently shown.
    pub shown: Vec<Target>,
    /// Number of `show_labels` calls.
    pub shows: usize,
    /// Number of `clear_labels` calls.
    pub clears: usize,
}

impl DecorationSink for RecordedDecorations {
    fn show_labels(&mut self, targets: &[Target]) {
        self.shown = targets.to_vec();
        self.shows += 1;
    }

    fn clear_labels(&mut self) {
        self.shown.clear();
        self.clears += 1;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(targets: &[Target]) -> Vec<String> {
        targets.iter().map(|t| t.label.to_string()).collect()
    }

    #[test]
    fn label_order() {
        assert_eq!(Label::nth(0).unwrap().to_string(), "aa");
        assert_eq!(Label::nth(1).unwrap().to_string(), "ab");
        assert_eq!(Label::nth(25).unwrap().to_string(), "az");
        assert_eq!(Label::nth(26).unwrap().to_string(), "ba");
        assert_eq!(Label::nth(675).unwrap().to_string(), "zz");
        assert_eq!(Label::nth(676), None);
    }

    #[test]
    fn from_keys_matches_nth() {
        assert_eq!(Label::from_keys('a', 'b'), Label::nth(1).unwrap());
        assert_eq!(Label::from_keys('c', 'a').chars(), ['c', 'a']);
    }

    #[test]
    fn words_are_labelled_in_order() {
        let text = Rope::from_str("one two three");
        let targets = assign_targets(&TextObject::Word, &text);
        assert_eq!(labels(&targets), ["aa", "ab", "ac"]);
        assert_eq!(targets[1].range, Range::new(4, 7));
    }

    #[test]
    fn assignment_is_deterministic() {
        let text = Rope::from_str("(a) (b (c))");
        let a = assign_targets(&TextObject::PARENTHESES, &text);
        let b = assign_targets(&TextObject::PARENTHESES, &text);
        assert_eq!(a, b);
    }

    #[test]
    fn no_matches_no_targets() {
        let text = Rope::from_str("   ");
        assert!(assign_targets(&TextObject::Word, &text).is_empty());
        assert!(assign_targets(&TextObject::Word, &Rope::new()).is_empty());
    }

    #[test]
    fn capped_at_capacity() {
        let text = Rope::from_str(&"x ".repeat(700));
        let targets = assign_targets(&TextObject::Word, &text);
        assert_eq!(targets.len(), LABEL_CAPACITY);
        assert_eq!(targets.last().unwrap().label.to_string(), "zz");
    }

    #[test]
    fn buffer_object_yields_one_target() {
        let text = Rope::from_str("abc");
        let targets = assign_targets(&TextObject::Buffer, &text);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].range, Range::new(0, 3));
    }

    #[test]
    fn find_target_by_label() {
        let text = Rope::from_str("one two three");
        let targets = assign_targets(&TextObject::Word, &text);
        let hit = find_target(&targets, Label::from_keys('a', 'c')).unwrap();
        assert_eq!(hit.range, Range::new(8, 13));
        assert!(find_target(&targets, Label::from_keys('z', 'z')).is_none());
    }

    #[test]
    fn recorded_decorations() {
        let mut sink = RecordedDecorations::default();
        let targets = assign_targets(&TextObject::Word, &Rope::from_str("a b"));
        sink.show_labels(&targets);
        assert_eq!(sink.shown.len(), 2);
        sink.clear_labels();
        assert!(sink.shown.is_empty());
        assert_eq!((sink.shows, sink.clears), (1, 1));
    }
}
