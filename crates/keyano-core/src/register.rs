//! Register: the clipboard slot shared by cut, copy, and paste.
//!
//! A cut or copy stores one string per selection, in selection order. Paste
//! reads them back: when the number of selections matches the number of
//! stored strings, each selection gets its own string; otherwise every
//! selection gets all of them joined by `\n`.

/// Clipboard contents, one entry per selection it was captured from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Register {
    slots: Vec<String>,
}

impl Register {
    /// An empty register.
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Replace the contents.
    pub fn store(&mut self, slots: Vec<String>) {
        self.slots = slots;
    }

    #[must_use]
    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// True if there is nothing to paste. A register holding only empty
    /// strings counts as empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(String::is_empty)
    }

    /// The text to paste at selection `index` out of `selections`.
    #[must_use]
    pub fn text_for(&self, index: usize, selections: usize) -> String {
        if self.slots.len() == selections {
            self.slots.get(index).cloned().unwrap_or_default()
        } else {
            self.slots.join("\n")
        }
    }
}
