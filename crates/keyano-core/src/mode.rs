//! Modal state.
//!
//! The dispatcher is always in exactly one [`Mode`]:
//!
//! | Mode      | Keys are                        |
//! |-----------|---------------------------------|
//! | Command   | looked up in the binding table  |
//! | Insert    | inserted verbatim at selections |
//!
//! Commands request `Command → Insert`. Only the host's escape key goes back.

use std::fmt;

/// The current editing mode.
///
/// Pure data. Transitions are driven by [`crate::dispatcher::Dispatcher`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Default mode. Keys are commands.
    #[default]
    Command,
    /// Keys produce characters in the buffer.
    Insert,
}

impl Mode {
    /// Human-readable name for a status line.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Command => "COMMAND",
            Self::Insert => "INSERT",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_command() {
        assert_eq!(Mode::default(), Mode::Command);
    }

    #[test]
    fn names() {
        assert_eq!(Mode::Command.to_string(), "COMMAND");
        assert_eq!(Mode::Insert.display_name(), "INSERT");
    }
}
