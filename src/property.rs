//! Versioned text handles for writing the editor's text back to its owner.
//!
//! Comparing two handles is cheap: a buffer-sourced handle compares by
//! `(buffer_id, version)` without touching the characters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate an id distinguishing one editor's buffer from another's
pub fn next_buffer_id() -> u64 {
    NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed)
}

/// A string value tagged with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionedText {
    /// An immutable string
    Immutable(Arc<str>),
    /// A mutable buffer at a particular version
    Buffer { buffer_id: u64, version: u64 },
}

impl VersionedText {
    pub fn immutable(text: &str) -> Self {
        VersionedText::Immutable(Arc::from(text))
    }

    /// Whether `other` refers to the same value without comparing contents
    /// of mutable sources
    pub fn same_value(&self, other: &VersionedText) -> bool {
        match (self, other) {
            (VersionedText::Immutable(a), VersionedText::Immutable(b)) => {
                Arc::ptr_eq(a, b) || a == b
            }
            (
                VersionedText::Buffer {
                    buffer_id: a_id,
                    version: a_ver,
                },
                VersionedText::Buffer {
                    buffer_id: b_id,
                    version: b_ver,
                },
            ) => a_id == b_id && a_ver == b_ver,
            _ => false,
        }
    }
}

/// Receives the editor's text (the owner's "Text" property)
pub trait TextSink {
    fn set_text(&mut self, value: VersionedText, text: &str);
}
