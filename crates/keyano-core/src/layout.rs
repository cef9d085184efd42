//! Keyboard layouts.
//!
//! Bindings are defined by physical position on a qwerty keyboard. On
//! another layout, a typed key is first mapped back to the qwerty key in the
//! same position, then looked up. Keys outside the table pass through.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Qwerty key → Colemak key in the same position. Uppercase pairs are
/// derived, with `;` shifting to `:`.
const QWERTY_TO_COLEMAK: [(char, char); 27] = [
    ('q', 'q'),
    ('w', 'w'),
    ('e', 'f'),
    ('r', 'p'),
    ('t', 'g'),
    ('y', 'j'),
    ('u', 'l'),
    ('i', 'u'),
    ('o', 'y'),
    ('p', ';'),
    ('a', 'a'),
    ('s', 'r'),
    ('d', 's'),
    ('f', 't'),
    ('g', 'd'),
    ('h', 'h'),
    ('j', 'n'),
    ('k', 'e'),
    ('l', 'i'),
    (';', 'o'),
    ('z', 'z'),
    ('x', 'x'),
    ('c', 'c'),
    ('v', 'v'),
    ('b', 'b'),
    ('n', 'k'),
    ('m', 'm'),
];

/// The active keyboard layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Layout {
    #[default]
    Qwerty,
    Colemak,
}

impl Layout {
    /// Map a typed key to the qwerty key bindings are defined on.
    #[must_use]
    pub fn translate(self, key: char) -> char {
        match self {
            Self::Qwerty => key,
            Self::Colemak => colemak_to_qwerty(key),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Qwerty => "qwerty",
            Self::Colemak => "colemak",
        }
    }
}

fn shifted(key: char) -> char {
    if key == ';' { ':' } else { key.to_ascii_uppercase() }
}

fn colemak_to_qwerty(key: char) -> char {
    QWERTY_TO_COLEMAK
        .iter()
        .find_map(|&(qwerty, colemak)| {
            if colemak == key {
                Some(qwerty)
            } else if shifted(colemak) == key {
                Some(shifted(qwerty))
            } else {
                None
            }
        })
        .unwrap_or(key)
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "qwerty" => Ok(Self::Qwerty),
            "colemak" => Ok(Self::Colemak),
            _ => Err(Error::UnknownLayout(s.to_owned())),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
