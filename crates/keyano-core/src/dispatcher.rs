//! The key dispatcher: the engine's only mutable state.
//!
//! A [`Dispatcher`] owns the mode, the flag stack, any pending continuation,
//! the register, the layout, and the bindings. The host calls
//! [`handle_key`](Dispatcher::handle_key) once per typed character and
//! [`escape`](Dispatcher::escape) for its escape key; the buffer and the
//! label sink are passed in on every call.
//!
//! # Per key, in command mode
//!
//! 1. A pending continuation gets the raw key first.
//! 2. Otherwise the key is translated through the layout and looked up. An
//!    unbound key does nothing. A bound command runs against the current
//!    stack, and its new stack, continuation, and mode request are stored.
//! 3. A command that fails is logged; the stack and continuation reset.
//!
//! In insert mode every key is typed into the buffer.

use tracing::{debug, trace, warn};

use crate::bindings::Bindings;
use crate::buffer::TextBuffer;
use crate::command::{Context, Outcome};
use crate::continuation::{Continuation, Resume};
use crate::flag::Stack;
use crate::jump::DecorationSink;
use crate::layout::Layout;
use crate::mode::Mode;
use crate::register::Register;

/// Modal key dispatcher.
#[derive(Debug, Default)]
pub struct Dispatcher {
    mode: Mode,
    stack: Stack,
    continuation: Option<Continuation>,
    register: Register,
    layout: Layout,
    bindings: Bindings,
}

impl Dispatcher {
    /// A dispatcher in command mode with an empty stack.
    #[must_use]
    pub fn new(bindings: Bindings, layout: Layout) -> Self {
        Self {
            bindings,
            layout,
            ..Self::default()
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Flags typed so far.
    #[inline]
    #[must_use]
    pub const fn stack(&self) -> &Stack {
        &self.stack
    }

    /// True while a command is waiting for more keys.
    #[inline]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.continuation.is_some()
    }

    #[must_use]
    pub const fn continuation(&self) -> Option<&Continuation> {
        self.continuation.as_ref()
    }

    #[must_use]
    pub const fn register(&self) -> &Register {
        &self.register
    }

    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Switch layouts. Takes effect from the next key.
    pub fn set_layout(&mut self, layout: Layout) {
        debug!(%layout, "layout");
        self.layout = layout;
    }

    #[must_use]
    pub const fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }

    // -- Input --------------------------------------------------------------

    /// The host's escape key: back to command mode, dropping any pending
    /// flags or continuation.
    pub fn escape(&mut self, decorations: &mut dyn DecorationSink) {
        self.enter_mode(Mode::Command, decorations);
    }

    /// Enter `mode`, clearing the stack, the continuation, and any labels
    /// still shown.
    pub fn enter_mode(&mut self, mode: Mode, decorations: &mut dyn DecorationSink) {
        if matches!(self.continuation, Some(Continuation::JumpLabel { .. })) {
            decorations.clear_labels();
        }
        self.continuation = None;
        self.stack = Stack::new();
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "mode");
        }
        self.mode = mode;
    }

    /// Handle one typed character.
    pub fn handle_key(&mut self, key: char, buffer: &mut dyn TextBuffer, decorations: &mut dyn DecorationSink) {
        trace!(?key, mode = %self.mode, "key");
        match self.mode {
            Mode::Insert => {
                let mut utf8 = [0; 4];
                if let Err(err) = buffer.insert_text(key.encode_utf8(&mut utf8)) {
                    warn!(%err, "insert failed");
                }
            }
            Mode::Command => self.command_key(key, buffer, decorations),
        }
    }

    fn command_key(&mut self, key: char, buffer: &mut dyn TextBuffer, decorations: &mut dyn DecorationSink) {
        if let Some(pending) = self.continuation.take() {
            let mut ctx = Context {
                buffer,
                decorations,
                register: &mut self.register,
            };
            match pending.resume(key, &self.stack, &mut ctx) {
                Resume::Waiting(next) => self.continuation = Some(next),
                Resume::Accept { stack, next } => {
                    self.stack = stack;
                    self.continuation = next;
                }
                Resume::Error => {
                    debug!(?key, "continuation rejected key");
                    self.stack = Stack::new();
                }
            }
            return;
        }

        let key = self.layout.translate(key);
        let Some(command) = self.bindings.get(key) else {
            trace!(?key, "unbound");
            return;
        };

        let result = {
            let mut ctx = Context {
                buffer,
                decorations: &mut *decorations,
                register: &mut self.register,
            };
            command.run(&self.stack, &mut ctx)
        };
        match result {
            Ok(Outcome {
                stack,
                continuation,
                mode,
            }) => {
                self.stack = stack;
                self.continuation = continuation;
                if let Some(mode) = mode {
                    self.enter_mode(mode, decorations);
                }
            }
            Err(err) => {
                warn!(%err, ?key, "command failed");
                self.stack = Stack::new();
                self.continuation = None;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
