//! # keyano-core: modal key-chord editing engine
//!
//! Turns a stream of single-character keys into selection and edit
//! operations on a text buffer. Keys push flags onto a persistent stack
//! (direction, expand, jump, select-all, repeat count) until a terminal
//! command reads them and resolves a text object.
//!
//! - **[`position`]**: `Range` (char offsets) and host `Position` (line, col)
//! - **[`word`]**: character classes and scanning helpers
//! - **[`text_object`]**: word, line, buffer, delimiter, search, and
//!   character resolvers
//! - **[`flag`]**: flags, the persistent `Stack`, and argument reading
//! - **[`command`]**: `Command`, selection, and composition
//! - **[`continuation`]**: commands that wait for more keys
//! - **[`action`]**: cut, copy, paste, join, change, insert
//! - **[`jump`]**: two-letter jump labels and the decoration sink
//! - **[`bindings`]** / **[`layout`]**: key table and layout translation
//! - **[`dispatcher`]**: the modal state machine hosts drive
//! - **[`buffer`]**: the `TextBuffer` boundary and a rope-backed `Buffer`
//! - **[`notation`]**: `"fo|o <|bar|>"` cursor notation
//!
//! ```ignore
//! let mut buffer = Buffer::from_notation("fo|o bar")?;
//! let mut labels = NoDecorations;
//! let mut keyano = Dispatcher::default();
//! for key in "ew".chars() {
//!     keyano.handle_key(key, &mut buffer, &mut labels);
//! }
//! assert_eq!(buffer.to_notation(), "<|foo|> bar");
//! ```

pub mod action;
pub mod bindings;
pub mod buffer;
pub mod command;
pub mod continuation;
pub mod dispatcher;
pub mod error;
pub mod flag;
pub mod jump;
pub mod layout;
pub mod mode;
pub mod notation;
pub mod position;
pub mod register;
pub mod text_object;
pub mod word;

pub use action::Action;
pub use bindings::Bindings;
pub use buffer::{Buffer, TextBuffer};
pub use command::{Command, Context, Outcome};
pub use continuation::{Continuation, Resume};
pub use dispatcher::Dispatcher;
pub use error::{Error, Result};
pub use flag::{Flag, Stack};
pub use jump::{DecorationSink, NoDecorations, RecordedDecorations, Target};
pub use layout::Layout;
pub use mode::Mode;
pub use position::{Position, Range};
pub use text_object::TextObject;
