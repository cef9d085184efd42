//! Continuations: commands that want more keys.
//!
//! Some commands cannot finish on one keystroke: a jump needs a two-letter
//! label, a literal search needs the text to look for. Such a command
//! returns a [`Continuation`], and the dispatcher feeds it the following raw
//! keys until it reports a terminal [`Resume`].

use tracing::debug;

use crate::command::{select, Context};
use crate::flag::Stack;
use crate::jump::{find_target, Label, Target};
use crate::text_object::TextObject;

/// Resumable state of an unfinished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Waiting for the two keys of a jump label.
    JumpLabel {
        targets: Vec<Target>,
        first: Option<char>,
    },
    /// Collecting a search literal until Enter.
    FindText { literal: String },
}

/// What a continuation did with one key.
#[derive(Debug)]
pub enum Resume {
    /// Needs more keys.
    Waiting(Continuation),
    /// Finished. `next` is a fresh continuation handed over, if any.
    Accept {
        stack: Stack,
        next: Option<Continuation>,
    },
    /// Aborted. The dispatcher resets the stack.
    Error,
}

const BACKSPACE: char = '\u{8}';
const DELETE: char = '\u{7f}';

impl Continuation {
    /// A jump waiting for its first label key.
    #[must_use]
    pub const fn jump(targets: Vec<Target>) -> Self {
        Self::JumpLabel { targets, first: None }
    }

    /// A literal search with nothing typed yet.
    #[must_use]
    pub const fn find_text() -> Self {
        Self::FindText { literal: String::new() }
    }

    /// Feed one raw key.
    pub fn resume(self, key: char, stack: &Stack, ctx: &mut Context<'_>) -> Resume {
        match self {
            Self::JumpLabel { targets, first: None } => Resume::Waiting(Self::JumpLabel {
                targets,
                first: Some(key),
            }),
            Self::JumpLabel {
                targets,
                first: Some(first),
            } => {
                ctx.decorations.clear_labels();
                let label = Label::from_keys(first, key);
                match find_target(&targets, label) {
                    Some(target) => {
                        debug!(%label, range = %target.range, "jump");
                        ctx.buffer.select(target.range);
                    }
                    None => debug!(%label, "no jump target"),
                }
                Resume::Accept {
                    stack: stack.clone(),
                    next: None,
                }
            }
            Self::FindText { literal } => find_text(literal, key, stack, ctx),
        }
    }
}

fn find_text(mut literal: String, key: char, stack: &Stack, ctx: &mut Context<'_>) -> Resume {
    match key {
        '\n' | '\r' if literal.is_empty() => Resume::Accept {
            stack: stack.clone(),
            next: None,
        },
        '\n' | '\r' => {
            debug!(%literal, "find text");
            let out = select(&TextObject::LiteralSearch(literal), stack, ctx);
            Resume::Accept {
                stack: out.stack,
                next: out.continuation,
            }
        }
        BACKSPACE | DELETE => {
            literal.pop();
            Resume::Waiting(Continuation::FindText { literal })
        }
        c if c.is_control() && c != '\t' => Resume::Error,
        c => {
            literal.push(c);
            Resume::Waiting(Continuation::FindText { literal })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Buffer, TextBuffer};
    use crate::flag::Flag;
    use crate::jump::{assign_targets, RecordedDecorations};
    use crate::position::Range;
    use crate::register::Register;

    fn feed(buffer: &mut Buffer, mut cont: Continuation, keys: &str, stack: &Stack) -> Resume {
        let mut decorations = RecordedDecorations::default();
        let mut register = Register::new();
        let mut ctx = Context {
            buffer,
            decorations: &mut decorations,
            register: &mut register,
        };
        let mut chars = keys.chars().peekable();
        while let Some(key) = chars.next() {
            match cont.resume(key, stack, &mut ctx) {
                Resume::Waiting(next) if chars.peek().is_some() => cont = next,
                other => return other,
            }
        }
        Resume::Error
    }

    fn jump_over(buffer: &Buffer) -> Continuation {
        Continuation::jump(assign_targets(&TextObject::Word, buffer.text()))
    }

    #[test]
    fn jump_label_selects_target() {
        let mut buf = Buffer::from_text("one two three");
        let cont = jump_over(&buf);
        assert!(matches!(feed(&mut buf, cont, "ab", &Stack::new()), Resume::Accept { next: None, .. }));
        assert_eq!(buf.primary(), Range::new(4, 7));
    }

    #[test]
    fn jump_first_key_waits() {
        let mut buf = Buffer::from_text("one two");
        let cont = jump_over(&buf);
        match feed(&mut buf, cont, "a", &Stack::new()) {
            Resume::Waiting(Continuation::JumpLabel { first, .. }) => assert_eq!(first, Some('a')),
            other => panic!("expected waiting, got {other:?}"),
        }
    }

    #[test]
    fn unknown_label_accepts_without_moving() {
        let mut buf = Buffer::from_text("one two");
        let cont = jump_over(&buf);
        let stack = Stack::new().push(Flag::Next);
        match feed(&mut buf, cont, "zq", &stack) {
            Resume::Accept { stack: s, next } => {
                assert_eq!(s, stack);
                assert!(next.is_none());
            }
            other => panic!("expected accept, got {other:?}"),
        }
        assert_eq!(buf.primary(), Range::point(0));
    }

    #[test]
    fn find_text_selects_literal() {
        let mut buf = Buffer::from_text("alpha beta alpha");
        let res = feed(&mut buf, Continuation::find_text(), "beta\n", &Stack::new());
        assert!(matches!(res, Resume::Accept { next: None, .. }));
        assert_eq!(buf.primary(), Range::new(6, 10));
    }

    #[test]
    fn find_text_reads_flags_at_enter() {
        let mut buf = Buffer::from_notation("ab ab <|ab|>").unwrap();
        let stack = Stack::new().push(Flag::Previous);
        feed(&mut buf, Continuation::find_text(), "ab\n", &stack);
        assert_eq!(buf.primary(), Range::new(3, 5));
    }

    #[test]
    fn find_text_empty_literal_is_noop() {
        let mut buf = Buffer::from_notation("ab|c").unwrap();
        assert!(matches!(
            feed(&mut buf, Continuation::find_text(), "\n", &Stack::new()),
            Resume::Accept { .. }
        ));
        assert_eq!(buf.primary(), Range::point(2));
    }

    #[test]
    fn find_text_backspace_edits_literal() {
        let mut buf = Buffer::from_text("cat car");
        feed(&mut buf, Continuation::find_text(), "cat\u{8}r\n", &Stack::new());
        assert_eq!(buf.primary(), Range::new(4, 7));
    }

    #[test]
    fn find_text_with_jump_hands_over() {
        let mut buf = Buffer::from_text("x y x");
        let stack = Stack::new().push(Flag::Jump);
        match feed(&mut buf, Continuation::find_text(), "x\n", &stack) {
            Resume::Accept { stack, next } => {
                assert!(stack.is_empty());
                match next {
                    Some(Continuation::JumpLabel { targets, .. }) => assert_eq!(targets.len(), 2),
                    other => panic!("expected jump, got {other:?}"),
                }
            }
            other => panic!("expected accept, got {other:?}"),
        }
    }

    #[test]
    fn control_key_aborts_search() {
        let mut buf = Buffer::from_text("abc");
        assert!(matches!(
            feed(&mut buf, Continuation::find_text(), "a\u{1b}", &Stack::new()),
            Resume::Error
        ));
    }
}
