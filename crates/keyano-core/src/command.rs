//! Commands: what a bound key does.
//!
//! A [`Command`] takes the current flag [`Stack`] and a [`Context`] (the
//! buffer, the label sink, the register) and returns an [`Outcome`]: the new
//! stack, optionally a [`Continuation`] that wants the next keys, and
//! optionally a mode change.
//!
//! Flag commands only grow the stack. Terminal commands (selections and
//! actions) read their arguments off the top of the stack and hand back what
//! they did not read.

use tracing::debug;

use crate::action::Action;
use crate::buffer::TextBuffer;
use crate::continuation::Continuation;
use crate::flag::{read_arguments, Direction, Flag, SelectArgs, Stack, MAX_COUNT};
use crate::jump::{assign_targets, DecorationSink};
use crate::mode::Mode;
use crate::position::Range;
use crate::register::Register;
use crate::text_object::{Resolve, TextObject};

// ---------------------------------------------------------------------------
// Context / Outcome
// ---------------------------------------------------------------------------

/// Everything a command may touch.
pub struct Context<'a> {
    pub buffer: &'a mut dyn TextBuffer,
    pub decorations: &'a mut dyn DecorationSink,
    pub register: &'a mut Register,
}

/// The result of running a command.
#[derive(Debug, Default)]
pub struct Outcome {
    pub stack: Stack,
    pub continuation: Option<Continuation>,
    /// Requested mode change, if any.
    pub mode: Option<Mode>,
}

impl Outcome {
    /// Just a new stack.
    #[must_use]
    pub fn stack(stack: Stack) -> Self {
        Self {
            stack,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A bindable command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Push a flag.
    Push(Flag),
    /// Enter one digit of a repeat count.
    Digit(u8),
    /// Select with a text object, shaped by the flags on the stack.
    Select(TextObject),
    /// Read a literal up to Enter, then select it.
    FindText,
    /// Edit the buffer or switch mode.
    Action(Action),
    /// Run several commands in order, threading the stack through.
    Compose(Vec<Command>),
}

impl Command {
    /// `flag` then `object`, the shape of most composed bindings.
    #[must_use]
    pub fn flagged(flag: Flag, object: TextObject) -> Self {
        Self::Compose(vec![Self::Push(flag), Self::Select(object)])
    }

    /// Run against `stack`.
    ///
    /// # Errors
    ///
    /// Propagates buffer edit failures from actions.
    pub fn run(&self, stack: &Stack, ctx: &mut Context<'_>) -> crate::Result<Outcome> {
        debug!(command = ?self, ?stack, "run");
        match self {
            Self::Push(flag) => Ok(Outcome::stack(stack.push(*flag))),
            Self::Digit(d) => Ok(Outcome::stack(push_digit(stack, *d))),
            Self::Select(object) => Ok(select(object, stack, ctx)),
            Self::FindText => Ok(Outcome {
                stack: stack.clone(),
                continuation: Some(Continuation::find_text()),
                mode: None,
            }),
            Self::Action(action) => action.run(stack, ctx),
            Self::Compose(commands) => {
                let mut out = Outcome::stack(stack.clone());
                for command in commands {
                    let step = command.run(&out.stack, ctx)?;
                    out.stack = step.stack;
                    out.continuation = step.continuation;
                    out.mode = step.mode.or(out.mode);
                }
                Ok(out)
            }
        }
    }
}

/// Extend a count on the head, or start a new one. Counts stop growing at
/// [`MAX_COUNT`].
fn push_digit(stack: &Stack, digit: u8) -> Stack {
    let d = usize::from(digit);
    match stack.head() {
        Some(Flag::Count(n)) => {
            let n = n.saturating_mul(10).saturating_add(d).min(MAX_COUNT);
            stack.tail().push(Flag::Count(n))
        }
        _ => stack.push(Flag::Count(d)),
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Select with `object`, reading direction, jump, expand, all, and count off
/// the stack. A resolver miss leaves the selection untouched.
pub(crate) fn select(object: &TextObject, stack: &Stack, ctx: &mut Context<'_>) -> Outcome {
    let (args, rest) = read_arguments::<SelectArgs>(stack);
    let text = ctx.buffer.text().clone();

    if args.jump {
        // Even with no targets the next two keys belong to the label.
        let targets = assign_targets(object, &text);
        ctx.decorations.show_labels(&targets);
        return Outcome {
            stack: rest,
            continuation: Some(Continuation::jump(targets)),
            mode: None,
        };
    }

    let reversed = object.reversed();
    let resolver: &dyn Resolve = match args.direction {
        Some(Direction::Backward) => &reversed,
        _ => object,
    };
    let primary = ctx.buffer.primary();

    if args.all {
        let from = if args.direction.is_some() { primary } else { Range::point(0) };
        let ranges = select_all(resolver, &text, from, args.direction.unwrap_or(Direction::Forward));
        if !ranges.is_empty() {
            ctx.buffer.set_selections(ranges);
        }
        return Outcome::stack(rest);
    }

    let mut current = primary;
    let mut moved = false;
    for _ in 0..args.repeat() {
        let found = if args.expand {
            resolver.expand(&text, current)
        } else {
            resolver.find_next(&text, current)
        };
        let Some(found) = found else { break };
        current = found;
        moved = true;
    }
    if moved {
        ctx.buffer.select(current);
    }
    Outcome::stack(rest)
}

/// Every match from `from` onward in scan order. Stops when a match does
/// not move past the previous one.
fn select_all(resolver: &dyn Resolve, text: &ropey::Rope, from: Range, direction: Direction) -> Vec<Range> {
    let mut ranges: Vec<Range> = Vec::new();
    let mut prev = from;
    while let Some(found) = resolver.find_next(text, prev) {
        if let Some(&last) = ranges.last() {
            let advanced = match direction {
                Direction::Forward => (found.start, found.end) > (last.start, last.end),
                Direction::Backward => (found.start, found.end) < (last.start, last.end),
            };
            if !advanced {
                break;
            }
        }
        ranges.push(found);
        prev = found;
    }
    ranges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
