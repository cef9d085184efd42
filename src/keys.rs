// SPDX-License-Identifier: MIT
//
// Key script parsing for --keys.
//
//   \e  escape (back to command mode)
//   \n  enter
//   \t  tab
//   \b  backspace
//   \\  a literal backslash
//
// Every other character is one key.

use anyhow::{Result, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
}

pub fn parse(script: &str) -> Result<Vec<Key>> {
    let mut keys = Vec::with_capacity(script.len());
    let mut chars = script.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            keys.push(Key::Char(ch));
            continue;
        }
        let key = match chars.next() {
            Some('e') => Key::Escape,
            Some('n') => Key::Char('\n'),
            Some('t') => Key::Char('\t'),
            Some('b') => Key::Char('\u{8}'),
            Some('\\') => Key::Char('\\'),
            Some(other) => bail!("unknown key escape `\\{other}`"),
            None => bail!("key script ends with a lone `\\`"),
        };
        keys.push(key);
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_characters() {
        assert_eq!(parse("ew").unwrap(), vec![Key::Char('e'), Key::Char('w')]);
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn escapes() {
        assert_eq!(
            parse(r"fx\nix\e\\").unwrap(),
            vec![
                Key::Char('f'),
                Key::Char('x'),
                Key::Char('\n'),
                Key::Char('i'),
                Key::Char('x'),
                Key::Escape,
                Key::Char('\\'),
            ]
        );
    }

    #[test]
    fn bad_escapes() {
        assert!(parse(r"\q").is_err());
        assert!(parse("w\\").is_err());
    }
}
