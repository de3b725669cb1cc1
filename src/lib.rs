//! Caret - an embeddable text-editing core
//!
//! A versioned text buffer with caret and selection tracking, input policy
//! (masking, casing, max length, overwrite), two-phase incremental layout and
//! scroll synchronization. Rendering and input dispatch belong to the host.

pub mod clipboard;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod property;
pub mod scroll;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use config::EditorConfig;
pub use editable::{EditCommand, EditSettings, EditorEvent, Modifiers, MoveTarget, TextEditor};
pub use error::{EditError, EditResult};
pub use geometry::{Point, Rect, SelectionGeometry, Size};
pub use scroll::{HorizontalScrollPolicy, ScrollViewport, Viewport};
