//! The key → command table.
//!
//! Keys are qwerty characters; see [`crate::layout`] for other layouts. The
//! [`Default`] table is the shipped "lower left" layout:
//!
//! | Keys              | Command                                    |
//! |-------------------|--------------------------------------------|
//! | `x c v`           | cut, copy, paste                           |
//! | `t T`             | join, join and select                      |
//! | `d i o`           | change, insert before, insert after        |
//! | `p n a e s`       | flags: previous, next, all, expand, jump   |
//! | `( { [`           | paired delimiters                          |
//! | ``q w " ` ~ /``   | line, word, quotes, tick, triple tick, char|
//! | `y`               | next buffer                                |
//! | `f`               | find text                                  |
//! | `j ; k l m`       | word and line motions, previous char       |
//! | `0`–`9`           | repeat count                               |

use std::collections::HashMap;

use crate::action::Action;
use crate::command::Command;
use crate::flag::Flag;
use crate::text_object::TextObject;

/// Map from a (qwerty) key to the command it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    map: HashMap<char, Command>,
}

impl Bindings {
    /// A table with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self { map: HashMap::new() }
    }

    /// The command bound to `key`.
    #[must_use]
    pub fn get(&self, key: char) -> Option<&Command> {
        self.map.get(&key)
    }

    /// Bind `key`, returning the command it replaced.
    pub fn bind(&mut self, key: char, command: Command) -> Option<Command> {
        self.map.insert(key, command)
    }

    /// Remove the binding for `key`.
    pub fn unbind(&mut self, key: char) -> Option<Command> {
        self.map.remove(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for Bindings {
    fn default() -> Self {
        let mut b = Self::empty();

        for (key, action) in [
            ('x', Action::Cut),
            ('c', Action::Copy),
            ('v', Action::Paste),
            ('t', Action::Join),
            ('T', Action::JoinSelect),
            ('d', Action::Change),
            ('i', Action::InsertBefore),
            ('o', Action::InsertAfter),
        ] {
            b.bind(key, Command::Action(action));
        }

        for (key, flag) in [
            ('p', Flag::Previous),
            ('n', Flag::Next),
            ('a', Flag::All),
            ('e', Flag::Expand),
            ('s', Flag::Jump),
        ] {
            b.bind(key, Command::Push(flag));
        }

        for (key, object) in [
            ('(', TextObject::PARENTHESES),
            ('{', TextObject::CURLY_BRACKETS),
            ('[', TextObject::BRACKETS),
            ('q', TextObject::Line),
            ('w', TextObject::Word),
            ('"', TextObject::quotes()),
            ('`', TextObject::tick()),
            ('~', TextObject::triple_tick()),
            ('/', TextObject::Character),
        ] {
            b.bind(key, Command::Select(object));
        }

        b.bind('y', Command::flagged(Flag::Next, TextObject::Buffer));
        b.bind('f', Command::FindText);

        // Right hand home row.
        b.bind('j', Command::flagged(Flag::Previous, TextObject::Word));
        b.bind('k', Command::flagged(Flag::Next, TextObject::Line));
        b.bind('l', Command::flagged(Flag::Previous, TextObject::Line));
        b.bind(';', Command::flagged(Flag::Next, TextObject::Word));
        b.bind('m', Command::flagged(Flag::Previous, TextObject::Character));

        for d in 0..=9u8 {
            b.bind(char::from(b'0' + d), Command::Digit(d));
        }
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_entries() {
        let b = Bindings::default();
        assert_eq!(b.get('x'), Some(&Command::Action(Action::Cut)));
        assert_eq!(b.get('e'), Some(&Command::Push(Flag::Expand)));
        assert_eq!(b.get('w'), Some(&Command::Select(TextObject::Word)));
        assert_eq!(b.get('~'), Some(&Command::Select(TextObject::triple_tick())));
        assert_eq!(b.get('7'), Some(&Command::Digit(7)));
        assert_eq!(
            b.get(';'),
            Some(&Command::Compose(vec![
                Command::Push(Flag::Next),
                Command::Select(TextObject::Word)
            ]))
        );
    }

    #[test]
    fn unbound_keys() {
        let b = Bindings::default();
        for key in ['z', 'g', 'h', 'O', ' ', '\n'] {
            assert_eq!(b.get(key), None, "{key:?}");
        }
    }

    #[test]
    fn default_table_size() {
        // 8 actions, 5 flags, 9 objects, 7 composed/find, 10 digits.
        assert_eq!(Bindings::default().len(), 39);
    }

    #[test]
    fn bind_and_unbind() {
        let mut b = Bindings::empty();
        assert!(b.is_empty());
        assert_eq!(b.bind('z', Command::FindText), None);
        assert_eq!(b.bind('z', Command::Select(TextObject::Word)), Some(Command::FindText));
        assert_eq!(b.unbind('z'), Some(Command::Select(TextObject::Word)));
        assert!(b.get('z').is_none());
    }
}
