//! Versioned text buffer backed by `ropey::Rope`.
//!
//! All offsets are character indices. Every structural mutation bumps
//! `version` exactly once per call, regardless of how many characters moved.
//! Mutations made between [`TextBuffer::begin_edit`] and the matching
//! [`TextBuffer::end_edit`] share a single bump.

use ropey::Rope;
use std::ops::Range;

use super::hooks::EditHooks;
use crate::error::{EditError, EditResult};

/// Mutable character sequence with a version counter and optional mask.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
    version: u64,
    /// When set, every inserted character is stored as this character
    mask: Option<char>,
    /// Open compound edits
    edit_depth: u32,
    /// Content changed inside the current compound edit
    dirty: bool,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `s` at version 0
    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
            ..Self::default()
        }
    }

    /// Monotonic counter, bumped once per mutating call
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Open a compound edit. Groups nest; only the outermost one counts.
    pub fn begin_edit(&mut self) {
        self.edit_depth += 1;
    }

    /// Close a compound edit.
    ///
    /// Returns true when the outermost group closed having changed the
    /// content, after bumping `version` once for the whole group.
    pub fn end_edit(&mut self) -> bool {
        assert!(self.edit_depth > 0, "end_edit without begin_edit");
        self.edit_depth -= 1;
        if self.edit_depth > 0 || !self.dirty {
            return false;
        }
        self.dirty = false;
        self.version += 1;
        true
    }

    /// True while a compound edit is open
    pub fn in_edit(&self) -> bool {
        self.edit_depth > 0
    }

    fn bump_version(&mut self) {
        if self.edit_depth > 0 {
            self.dirty = true;
        } else {
            self.version += 1;
        }
    }

    pub fn mask(&self) -> Option<char> {
        self.mask
    }

    /// Set or clear the mask. Affects characters inserted afterwards only.
    pub fn set_mask(&mut self, mask: Option<char>) {
        self.mask = mask;
    }

    /// Total length in characters
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Character at `offset`, None past the end
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.rope.get_char(offset)
    }

    /// Text in a character range, clamped to the buffer
    pub fn slice(&self, range: Range<usize>) -> String {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    /// Full content as a String
    pub fn content(&self) -> String {
        self.rope.to_string()
    }

    /// Number of logical lines (ropey counts `\r\n`, `\n` and `\r` as breaks)
    pub fn line_count(&self) -> usize {
        self.rope.len_lines().max(1)
    }

    /// True when `offset` sits between the `\r` and `\n` of a CRLF pair
    pub fn splits_crlf(&self, offset: usize) -> bool {
        offset > 0
            && self.char_at(offset - 1) == Some('\r')
            && self.char_at(offset) == Some('\n')
    }

    fn check_offset(&self, offset: usize) -> EditResult<()> {
        let length = self.len_chars();
        if offset > length {
            return Err(EditError::OutOfRange {
                index: offset,
                length,
            });
        }
        Ok(())
    }

    /// Insert `text` at `offset`, masking each character.
    ///
    /// Each stored character is reported to `hooks`; only the final one has
    /// `is_last` set. Returns the number of characters inserted.
    pub fn insert(
        &mut self,
        offset: usize,
        text: &str,
        hooks: &mut dyn EditHooks,
    ) -> EditResult<usize> {
        self.check_offset(offset)?;

        let total = text.chars().count();
        if total == 0 {
            return Ok(0);
        }

        for (i, requested) in text.chars().enumerate() {
            let stored = self.mask.unwrap_or(requested);
            self.rope.insert_char(offset + i, stored);
            hooks.on_character_inserted(offset + i, requested, stored, i + 1 == total);
        }
        self.bump_version();

        tracing::trace!(offset, count = total, version = self.version, "buffer insert");
        Ok(total)
    }

    /// Remove up to `length` characters at `start` (clamped to the end).
    ///
    /// Returns the number of characters actually removed.
    pub fn delete(
        &mut self,
        start: usize,
        length: usize,
        raise_events: bool,
        hooks: &mut dyn EditHooks,
    ) -> EditResult<usize> {
        self.check_offset(start)?;

        let length = length.min(self.len_chars() - start);
        if length == 0 {
            return Ok(0);
        }

        self.rope.remove(start..start + length);
        self.bump_version();
        hooks.on_character_deleted(start, length, raise_events);

        tracing::trace!(start, length, version = self.version, "buffer delete");
        Ok(length)
    }

    /// Remove everything. Raises one deletion spanning the prior length.
    pub fn clear(&mut self, hooks: &mut dyn EditHooks) -> usize {
        let len = self.len_chars();
        if len == 0 {
            return 0;
        }
        self.rope.remove(0..len);
        self.bump_version();
        hooks.on_character_deleted(0, len, true);
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::hooks::NoHooks;

    #[derive(Default)]
    struct Recorder {
        inserted: Vec<(usize, char, char, bool)>,
        deleted: Vec<(usize, usize, bool)>,
    }

    impl EditHooks for Recorder {
        fn on_character_inserted(&mut self, offset: usize, req: char, ins: char, last: bool) {
            self.inserted.push((offset, req, ins, last));
        }

        fn on_character_deleted(&mut self, start: usize, length: usize, raise: bool) {
            self.deleted.push((start, length, raise));
        }
    }

    #[test]
    fn test_buffer_basic() {
        let buf = TextBuffer::from_text("héllo");
        assert_eq!(buf.len_chars(), 5);
        assert_eq!(buf.char_at(1), Some('é'));
        assert_eq!(buf.char_at(5), None);
        assert_eq!(buf.version(), 0);
    }

    #[test]
    fn test_insert_bumps_version_once() {
        let mut buf = TextBuffer::from_text("hello");
        let mut rec = Recorder::default();
        let n = buf.insert(5, " world", &mut rec).unwrap();
        assert_eq!(n, 6);
        assert_eq!(buf.content(), "hello world");
        assert_eq!(buf.version(), 1);
        assert_eq!(rec.inserted.len(), 6);
        assert!(rec.inserted[..5].iter().all(|(_, _, _, last)| !last));
        assert!(rec.inserted[5].3);
        assert_eq!(rec.inserted[0].0, 5);
        assert_eq!(rec.inserted[5].0, 10);
    }

    #[test]
    fn test_insert_empty_is_noop() {
        let mut buf = TextBuffer::from_text("abc");
        assert_eq!(buf.insert(1, "", &mut NoHooks).unwrap(), 0);
        assert_eq!(buf.version(), 0);
    }

    #[test]
    fn test_insert_out_of_range() {
        let mut buf = TextBuffer::from_text("abc");
        let err = buf.insert(4, "x", &mut NoHooks).unwrap_err();
        assert_eq!(err, EditError::OutOfRange { index: 4, length: 3 });
        assert_eq!(buf.version(), 0);
    }

    #[test]
    fn test_masked_insert_reports_requested_char() {
        let mut buf = TextBuffer::new();
        buf.set_mask(Some('*'));
        let mut rec = Recorder::default();
        buf.insert(0, "pw", &mut rec).unwrap();
        assert_eq!(buf.content(), "**");
        assert_eq!(rec.inserted, vec![(0, 'p', '*', false), (1, 'w', '*', true)]);
    }

    #[test]
    fn test_delete_clamps_length() {
        let mut buf = TextBuffer::from_text("hello");
        let mut rec = Recorder::default();
        let n = buf.delete(3, 10, true, &mut rec).unwrap();
        assert_eq!(n, 2);
        assert_eq!(buf.content(), "hel");
        assert_eq!(buf.version(), 1);
        assert_eq!(rec.deleted, vec![(3, 2, true)]);
    }

    #[test]
    fn test_delete_nothing_keeps_version() {
        let mut buf = TextBuffer::from_text("hello");
        assert_eq!(buf.delete(5, 3, true, &mut NoHooks).unwrap(), 0);
        assert_eq!(buf.version(), 0);
        assert!(buf.delete(6, 1, true, &mut NoHooks).is_err());
    }

    #[test]
    fn test_clear_raises_single_deletion() {
        let mut buf = TextBuffer::from_text("hello");
        let mut rec = Recorder::default();
        assert_eq!(buf.clear(&mut rec), 5);
        assert!(buf.is_empty());
        assert_eq!(rec.deleted, vec![(0, 5, true)]);

        let version = buf.version();
        assert_eq!(buf.clear(&mut rec), 0);
        assert_eq!(buf.version(), version);
        assert_eq!(rec.deleted.len(), 1);
    }

    #[test]
    fn test_compound_edit_bumps_version_once() {
        let mut buf = TextBuffer::from_text("hello");
        buf.begin_edit();
        buf.delete(0, 5, false, &mut NoHooks).unwrap();
        buf.begin_edit();
        buf.insert(0, "bye", &mut NoHooks).unwrap();
        assert!(!buf.end_edit());
        assert_eq!(buf.version(), 0);
        assert!(buf.end_edit());
        assert_eq!(buf.version(), 1);
        assert_eq!(buf.content(), "bye");

        buf.begin_edit();
        assert!(!buf.end_edit());
        assert_eq!(buf.version(), 1);
    }

    #[test]
    fn test_splits_crlf() {
        let buf = TextBuffer::from_text("ab\r\ncd");
        assert!(!buf.splits_crlf(2));
        assert!(buf.splits_crlf(3));
        assert!(!buf.splits_crlf(4));
        assert_eq!(buf.line_count(), 2);
    }

    #[test]
    fn test_slice_clamps() {
        let buf = TextBuffer::from_text("hello world");
        assert_eq!(buf.slice(0..5), "hello");
        assert_eq!(buf.slice(6..100), "world");
        assert_eq!(buf.slice(8..3), "");
    }
}
