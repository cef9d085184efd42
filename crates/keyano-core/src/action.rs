//! Buffer actions: the commands that edit text or switch mode.
//!
//! Every edit goes through [`TextBuffer::replace_text`], last selection
//! first, and finishes before the action returns. Actions read an optional
//! repeat count off the stack and leave everything below it.

use std::fmt;

use ropey::Rope;
use tracing::{debug, warn};

use crate::buffer::{apply_edits, TextBuffer};
use crate::command::{Context, Outcome};
use crate::error::Result;
use crate::flag::{read_arguments, CountArg, Stack};
use crate::mode::Mode;
use crate::position::Range;
use crate::register::Register;

/// Upper bound on the text one paste may insert.
const MAX_PASTE_BYTES: usize = 64 * 1024 * 1024;

/// An editing or mode-switching command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Store every selection in the register and delete it.
    Cut,
    /// Store every selection in the register.
    Copy,
    /// Replace every selection with register text.
    Paste,
    /// Join the primary selection's line with the next.
    Join,
    /// Join, then select the joined line.
    JoinSelect,
    /// Delete every selection and enter insert mode.
    Change,
    /// Collapse selections to their starts and enter insert mode.
    InsertBefore,
    /// Collapse selections to their ends and enter insert mode.
    InsertAfter,
}

impl Action {
    /// Run against `stack`.
    ///
    /// # Errors
    ///
    /// Propagates edits the buffer refuses.
    pub fn run(self, stack: &Stack, ctx: &mut Context<'_>) -> Result<Outcome> {
        let (args, rest) = read_arguments::<CountArg>(stack);
        let count = args.repeat();
        let buffer = &mut *ctx.buffer;

        let mode = match self {
            Self::Cut => {
                ctx.register.store(selected_texts(buffer));
                delete_selections(buffer)?;
                None
            }
            Self::Copy => {
                ctx.register.store(selected_texts(buffer));
                None
            }
            Self::Paste => {
                if !ctx.register.is_empty() {
                    paste(buffer, ctx.register, count)?;
                }
                None
            }
            Self::Join => {
                join(buffer, count)?;
                None
            }
            Self::JoinSelect => {
                if let Some(at) = join(buffer, count)? {
                    let line = line_around(buffer.text(), at);
                    buffer.select(line);
                }
                None
            }
            Self::Change => {
                delete_selections(buffer)?;
                Some(Mode::Insert)
            }
            Self::InsertBefore => {
                let points = buffer.selections().into_iter().map(|r| Range::point(r.start)).collect();
                buffer.set_selections(points);
                Some(Mode::Insert)
            }
            Self::InsertAfter => {
                let points = buffer.selections().into_iter().map(|r| Range::point(r.end)).collect();
                buffer.set_selections(points);
                Some(Mode::Insert)
            }
        };
        debug!(action = %self, count, "action");
        Ok(Outcome {
            stack: rest,
            continuation: None,
            mode,
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cut => "cut",
            Self::Copy => "copy",
            Self::Paste => "paste",
            Self::Join => "join",
            Self::JoinSelect => "join-select",
            Self::Change => "change",
            Self::InsertBefore => "insert-before",
            Self::InsertAfter => "insert-after",
        })
    }
}

fn selected_texts(buffer: &dyn TextBuffer) -> Vec<String> {
    let text = buffer.text();
    let len = text.len_chars();
    buffer
        .selections()
        .into_iter()
        .map(|r| {
            if r.fits(len) {
                text.slice(r.start..r.end).to_string()
            } else {
                String::new()
            }
        })
        .collect()
}

/// Replace every selection with register text repeated `count` times,
/// leaving a cursor after each insert. Skipped when the total would exceed
/// [`MAX_PASTE_BYTES`].
fn paste(buffer: &mut dyn TextBuffer, register: &Register, count: usize) -> Result<()> {
    let selections = buffer.selections();
    let n = selections.len();
    let pieces: Vec<String> = (0..n).map(|i| register.text_for(i, n)).collect();
    let total = pieces
        .iter()
        .try_fold(0usize, |total, piece| piece.len().checked_mul(count)?.checked_add(total));
    if !total.is_some_and(|total| total <= MAX_PASTE_BYTES) {
        warn!(count, "paste too large, skipped");
        return Ok(());
    }
    let edits: Vec<(Range, String)> = selections
        .into_iter()
        .zip(pieces)
        .map(|(sel, piece)| (sel, piece.repeat(count)))
        .collect();
    let placed = apply_edits(buffer, &edits)?;
    buffer.set_selections(placed.into_iter().map(|r| Range::point(r.end)).collect());
    Ok(())
}

/// Delete every selection, leaving a cursor where each one started.
fn delete_selections(buffer: &mut dyn TextBuffer) -> Result<()> {
    let edits: Vec<(Range, String)> = buffer
        .selections()
        .into_iter()
        .map(|sel| (sel, String::new()))
        .collect();
    let placed = apply_edits(buffer, &edits)?;
    buffer.set_selections(placed.into_iter().map(|r| Range::point(r.start)).collect());
    Ok(())
}

// ---------------------------------------------------------------------------
// Join
// ---------------------------------------------------------------------------

/// Join the line holding the primary selection's end with the following
/// line, `count` times. Returns the offset of the last joining space, or
/// `None` if there was no following line.
fn join(buffer: &mut dyn TextBuffer, count: usize) -> Result<Option<usize>> {
    let mut at = None;
    for _ in 0..count {
        let anchor = buffer.primary().end;
        let Some(span) = line_break_after(buffer.text(), anchor) else {
            break;
        };
        buffer.replace_text(span, " ")?;
        buffer.select(Range::point(span.start + 1));
        at = Some(span.start);
    }
    Ok(at)
}

/// The line break ending the line at `offset`, plus the next line's leading
/// blanks. `None` on the last line.
fn line_break_after(text: &Rope, offset: usize) -> Option<Range> {
    let len = text.len_chars();
    let line = text.char_to_line(offset.min(len));
    if line + 1 >= text.len_lines() {
        return None;
    }
    let next_start = text.line_to_char(line + 1);
    let mut start = next_start - 1;
    if start > 0 && text.char(start - 1) == '\r' {
        start -= 1;
    }
    let end = text
        .chars_at(next_start)
        .position(|c| c != ' ' && c != '\t')
        .map_or(len, |n| next_start + n);
    Some(Range::new(start, end))
}

/// The full line around `offset`, newline included.
fn line_around(text: &Rope, offset: usize) -> Range {
    let line = text.char_to_line(offset.min(text.len_chars()));
    let start = text.line_to_char(line);
    Range::new(start, start + text.line(line).len_chars())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::buffer::Buffer;
    use crate::flag::Flag;
    use crate::jump::NoDecorations;

    fn run(action: Action, marked: &str, register: &mut Register, stack: &Stack) -> (String, Outcome) {
        let mut buffer = Buffer::from_notation(marked).unwrap();
        let mut decorations = NoDecorations;
        let mut ctx = Context {
            buffer: &mut buffer,
            decorations: &mut decorations,
            register,
        };
        let out = action.run(stack, &mut ctx).unwrap();
        (buffer.to_notation(), out)
    }

    fn simple(action: Action, marked: &str) -> String {
        run(action, marked, &mut Register::new(), &Stack::new()).0
    }

    #[test]
    fn cut_stores_and_deletes() {
        let mut reg = Register::new();
        let (text, out) = run(Action::Cut, "<|foo|> bar <|baz|>", &mut reg, &Stack::new());
        assert_eq!(text, "| bar |");
        assert_eq!(reg.slots(), ["foo".to_owned(), "baz".to_owned()]);
        assert_eq!(out.mode, None);
    }

    #[test]
    fn copy_leaves_text() {
        let mut reg = Register::new();
        let (text, _) = run(Action::Copy, "a <|bc|>", &mut reg, &Stack::new());
        assert_eq!(text, "a <|bc|>");
        assert_eq!(reg.slots(), ["bc".to_owned()]);
    }

    #[test]
    fn paste_per_selection() {
        let mut reg = Register::new();
        reg.store(vec!["1".into(), "2".into()]);
        let (text, _) = run(Action::Paste, "|a |b", &mut reg, &Stack::new());
        assert_eq!(text, "1|a 2|b");
    }

    #[test]
    fn paste_replaces_selection_and_repeats() {
        let mut reg = Register::new();
        reg.store(vec!["ab".into()]);
        let stack = Stack::new().push(Flag::Count(3));
        let (text, out) = run(Action::Paste, "x<|yy|>z", &mut reg, &stack);
        assert_eq!(text, "xababab|z");
        assert!(out.stack.is_empty());
    }

    #[test]
    fn paste_huge_count_is_skipped() {
        let mut reg = Register::new();
        reg.store(vec!["ab".into()]);
        let stack = Stack::new().push(Flag::Count(usize::MAX));
        let (text, out) = run(Action::Paste, "x<|y|>z", &mut reg, &stack);
        assert_eq!(text, "x<|y|>z");
        assert!(out.stack.is_empty());
    }

    #[test]
    fn paste_empty_register_is_noop() {
        assert_eq!(simple(Action::Paste, "a<|b|>c"), "a<|b|>c");
    }

    #[test]
    fn join_lines() {
        assert_eq!(simple(Action::Join, "fo|o\n    bar\nbaz"), "foo |bar\nbaz");
        assert_eq!(simple(Action::Join, "a\r\n\tb"), "a |b");
    }

    #[test]
    fn join_ignores_lone_carriage_return() {
        assert_eq!(simple(Action::Join, "a|\rb\nc"), "a\rb |c");
    }

    #[test]
    fn join_last_line_is_noop() {
        assert_eq!(simple(Action::Join, "one\ntw|o"), "one\ntw|o");
    }

    #[test]
    fn join_with_count() {
        let stack = Stack::new().push(Flag::Count(2));
        let (text, _) = run(Action::Join, "|a\nb\nc\nd", &mut Register::new(), &stack);
        assert_eq!(text, "a b |c\nd");
    }

    #[test]
    fn join_select_selects_line() {
        assert_eq!(simple(Action::JoinSelect, "|a\n b\nc"), "<|a b\n|>c");
    }

    #[test]
    fn change_deletes_and_enters_insert() {
        let (text, out) = run(Action::Change, "a<|bc|>d", &mut Register::new(), &Stack::new());
        assert_eq!(text, "a|d");
        assert_eq!(out.mode, Some(Mode::Insert));
    }

    #[test]
    fn insert_before_and_after() {
        assert_eq!(simple(Action::InsertBefore, "a<|bc|>d"), "a|bcd");
        assert_eq!(simple(Action::InsertAfter, "a<|bc|>d"), "abc|d");
    }

    #[test]
    fn non_count_flags_stay_on_stack() {
        let stack: Stack = [Flag::Next, Flag::Count(2)].into_iter().collect();
        let (_, out) = run(Action::Copy, "|x", &mut Register::new(), &stack);
        assert_eq!(out.stack, Stack::new().push(Flag::Next));
    }
}
