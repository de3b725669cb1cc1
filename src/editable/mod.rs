//! Editable text: buffer, caret, edit policy and the editor that ties them
//! to layout and scrolling.
//!
//! # Architecture
//!
//! - [`TextBuffer`]: versioned `ropey::Rope` with optional masking
//! - [`EditHooks`]: per-character insert/delete notifications and entry veto
//! - [`CaretModel`]: caret plus optional selection anchor, CRLF-aware
//! - [`ChangeTracker`]: batches selection-change notifications
//! - [`EditSettings`]: read-only, Return/Tab, max length, casing, wrapping
//! - [`TextEditor`]: edit operations, navigation and layout synchronization
//! - [`EditCommand`] / [`CommandRegistry`]: named commands
//!
//! # Example
//!
//! ```
//! use caret::editable::{EditSettings, TextEditor};
//!
//! let mut editor = TextEditor::new(EditSettings::single_line());
//! editor.type_text("hello");
//! editor.insert("!", editor.caret_position()).unwrap();
//!
//! assert_eq!(editor.text(), "hello!");
//! assert_eq!(editor.caret_position(), 6);
//! ```

mod buffer;
mod caret;
mod constraints;
mod editor;
mod hooks;
mod messages;
mod tracker;

pub use buffer::TextBuffer;
pub use caret::{next_offset, prev_offset, snap_crlf, CaretModel, Snap};
pub use constraints::{CasedChars, CharacterCasing, EditSettings, NewlineStyle};
pub use editor::{EditorEvent, TextEditor, DEFAULT_BLINK_INTERVAL};
pub use hooks::{EditHooks, NoHooks, ShadowPlaintext};
pub use messages::{CommandRegistry, EditCommand, Modifiers, MoveTarget};
pub use tracker::ChangeTracker;
