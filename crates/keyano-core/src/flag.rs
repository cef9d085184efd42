//! Flags and the persistent flag stack.
//!
//! A flag is a pending modifier typed before a command: `p` (previous),
//! `e` (expand), `s` (jump), a repeat count, and so on. Flags accumulate on a
//! [`Stack`] until a terminal command reads them with [`read_arguments`].
//!
//! The stack is an immutable cons list. [`Stack::push`] returns a new head
//! that shares the old tail, so a command holding an older stack value never
//! sees it change underneath it.

use std::fmt;
use std::rc::Rc;

// ---------------------------------------------------------------------------
// Flag
// ---------------------------------------------------------------------------

/// Largest repeat count typed digits can build.
pub const MAX_COUNT: usize = 99_999;

/// A pending modifier. Compared by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Next,
    Previous,
    Expand,
    Jump,
    All,
    /// Repeat count. `Count(0)` reads as 1.
    Count(usize),
}

impl Flag {
    /// True for `Next` and `Previous`.
    #[must_use]
    pub const fn is_direction(self) -> bool {
        matches!(self, Self::Next | Self::Previous)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => f.write_str("next"),
            Self::Previous => f.write_str("previous"),
            Self::Expand => f.write_str("expand"),
            Self::Jump => f.write_str("jump"),
            Self::All => f.write_str("all"),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------------

struct Node {
    head: Flag,
    tail: Stack,
}

/// Persistent singly-linked list of flags, newest first.
///
/// Cloning is O(1) and shares structure. The empty stack is the default
/// value.
#[derive(Clone, Default)]
pub struct Stack(Option<Rc<Node>>);

impl Stack {
    /// The empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self(None)
    }

    /// A new stack with `flag` on top of `self`. `self` is unchanged.
    #[must_use]
    pub fn push(&self, flag: Flag) -> Self {
        Self(Some(Rc::new(Node {
            head: flag,
            tail: self.clone(),
        })))
    }

    /// The newest flag, if any.
    #[must_use]
    pub fn head(&self) -> Option<Flag> {
        self.0.as_ref().map(|node| node.head)
    }

    /// Everything below the head. The tail of the empty stack is empty.
    #[must_use]
    pub fn tail(&self) -> Self {
        self.0.as_ref().map_or_else(Self::new, |node| node.tail.clone())
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Flags from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        let mut cursor = self.0.as_deref();
        std::iter::from_fn(move || {
            let node = cursor?;
            cursor = node.tail.0.as_deref();
            Some(node.head)
        })
    }

    /// True if both values are the same list node (or both empty).
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl PartialEq for Stack {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.iter().eq(other.iter())
    }
}

impl Eq for Stack {}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<Flag> for Stack {
    /// Builds a stack by pushing in iteration order, so the last item ends
    /// up on top.
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |stack, flag| stack.push(flag))
    }
}

// ---------------------------------------------------------------------------
// Reading arguments
// ---------------------------------------------------------------------------

/// A set of named arguments a command reads off the stack.
///
/// Implementors start from their defaults and take flags one at a time.
pub trait FromFlags: Default {
    /// Record `flag` if one of the arguments accepts it. Return `false` when
    /// no argument matches, which ends the read.
    ///
    /// When an argument was already set by a flag closer to the head, keep
    /// that value but still accept the flag.
    fn accept(&mut self, flag: Flag) -> bool;
}

/// Walk the stack from the head, feeding flags to `A` until one is not
/// accepted. Returns the arguments and the unread remainder of the stack.
#[must_use]
pub fn read_arguments<A: FromFlags>(stack: &Stack) -> (A, Stack) {
    let mut args = A::default();
    let mut rest = stack.clone();
    while let Some(flag) = rest.head() {
        if !args.accept(flag) {
            break;
        }
        rest = rest.tail();
    }
    (args, rest)
}

/// Direction requested by `Next` / `Previous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Arguments of a text-object selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectArgs {
    /// `None` when no direction flag was given.
    pub direction: Option<Direction>,
    pub jump: bool,
    pub expand: bool,
    pub all: bool,
    pub count: Option<usize>,
}

impl SelectArgs {
    /// The repeat count, at least 1.
    #[must_use]
    pub fn repeat(&self) -> usize {
        self.count.unwrap_or(1).max(1)
    }
}

impl FromFlags for SelectArgs {
    fn accept(&mut self, flag: Flag) -> bool {
        match flag {
            Flag::Next | Flag::Previous => {
                let dir = if flag == Flag::Next {
                    Direction::Forward
                } else {
                    Direction::Backward
                };
                self.direction.get_or_insert(dir);
            }
            Flag::Jump => self.jump = true,
            Flag::Expand => self.expand = true,
            Flag::All => self.all = true,
            Flag::Count(n) => {
                self.count.get_or_insert(n);
            }
        }
        true
    }
}

/// Arguments of a buffer action: only a repeat count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountArg {
    pub count: Option<usize>,
}

impl CountArg {
    #[must_use]
    pub fn repeat(&self) -> usize {
        self.count.unwrap_or(1).max(1)
    }
}

impl FromFlags for CountArg {
    fn accept(&mut self, flag: Flag) -> bool {
        match flag {
            Flag::Count(n) => {
                self.count.get_or_insert(n);
                true
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack() {
        let s = Stack::new();
        assert!(s.is_empty());
        assert_eq!(s.head(), None);
        assert!(s.tail().is_empty());
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn push_does_not_mutate() {
        let base = Stack::new().push(Flag::Next);
        let a = base.push(Flag::Expand);
        let b = base.push(Flag::Jump);
        assert_eq!(base.iter().collect::<Vec<_>>(), vec![Flag::Next]);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![Flag::Expand, Flag::Next]);
        assert_eq!(b.iter().collect::<Vec<_>>(), vec![Flag::Jump, Flag::Next]);
        assert!(a.tail().ptr_eq(&base));
        assert!(b.tail().ptr_eq(&base));
    }

    #[test]
    fn from_iter_puts_last_on_top() {
        let s: Stack = [Flag::Previous, Flag::Expand].into_iter().collect();
        assert_eq!(s.head(), Some(Flag::Expand));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn equality_is_structural() {
        let a: Stack = [Flag::All, Flag::Jump].into_iter().collect();
        let b: Stack = [Flag::All, Flag::Jump].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, b.tail());
    }

    #[test]
    fn debug_lists_newest_first() {
        let s: Stack = [Flag::Next, Flag::Count(3)].into_iter().collect();
        assert_eq!(format!("{s:?}"), "[Count(3), Next]");
    }

    #[test]
    fn read_empty_gives_defaults() {
        let (args, rest) = read_arguments::<SelectArgs>(&Stack::new());
        assert_eq!(args, SelectArgs::default());
        assert!(rest.is_empty());
    }

    #[test]
    fn read_all_select_flags() {
        let s: Stack = [Flag::Previous, Flag::Jump, Flag::All, Flag::Expand, Flag::Count(2)]
            .into_iter()
            .collect();
        let (args, rest) = read_arguments::<SelectArgs>(&s);
        assert_eq!(args.direction, Some(Direction::Backward));
        assert!(args.jump && args.all && args.expand);
        assert_eq!(args.repeat(), 2);
        assert!(rest.is_empty());
    }

    #[test]
    fn head_most_flag_wins() {
        let s: Stack = [Flag::Next, Flag::Previous].into_iter().collect();
        let (args, _) = read_arguments::<SelectArgs>(&s);
        assert_eq!(args.direction, Some(Direction::Backward));

        let s: Stack = [Flag::Count(5), Flag::Count(2)].into_iter().collect();
        let (args, _) = read_arguments::<SelectArgs>(&s);
        assert_eq!(args.count, Some(2));
    }

    #[test]
    fn unmatched_flag_stops_and_keeps_remainder() {
        let s: Stack = [Flag::Jump, Flag::Expand, Flag::Count(4)].into_iter().collect();
        let (args, rest) = read_arguments::<CountArg>(&s);
        assert_eq!(args.count, Some(4));
        assert_eq!(rest.iter().collect::<Vec<_>>(), vec![Flag::Expand, Flag::Jump]);
    }

    #[test]
    fn count_zero_repeats_once() {
        let s = Stack::new().push(Flag::Count(0));
        let (args, _) = read_arguments::<CountArg>(&s);
        assert_eq!(args.repeat(), 1);
    }

    #[test]
    fn flag_display() {
        assert_eq!(Flag::Previous.to_string(), "previous");
        assert_eq!(Flag::Count(12).to_string(), "12");
        assert!(Flag::Next.is_direction());
        assert!(!Flag::All.is_direction());
    }
}
