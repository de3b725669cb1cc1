//! Caret and selection anchor over a [`TextBuffer`].
//!
//! Both ends are character offsets in `0..=len`. Neither may rest between the
//! `\r` and `\n` of a CRLF pair; the snapping helpers below push such offsets
//! out in the direction of travel.

use super::buffer::TextBuffer;
use crate::error::{EditError, EditResult};

/// Direction used to resolve an offset that splits a CRLF pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snap {
    Backward,
    Forward,
}

/// Move `offset` off a CRLF split in the given direction
pub fn snap_crlf(buffer: &TextBuffer, offset: usize, snap: Snap) -> usize {
    if buffer.splits_crlf(offset) {
        match snap {
            Snap::Backward => offset - 1,
            Snap::Forward => offset + 1,
        }
    } else {
        offset
    }
}

/// Offset one unit to the right of `offset` (a CRLF pair counts as one unit)
pub fn next_offset(buffer: &TextBuffer, offset: usize) -> usize {
    let len = buffer.len_chars();
    if offset >= len {
        return len;
    }
    snap_crlf(buffer, offset + 1, Snap::Forward)
}

/// Offset one unit to the left of `offset`
pub fn prev_offset(buffer: &TextBuffer, offset: usize) -> usize {
    if offset == 0 {
        return 0;
    }
    snap_crlf(buffer, offset - 1, Snap::Backward)
}

/// Caret position plus optional selection anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaretModel {
    caret: usize,
    anchor: Option<usize>,
}

impl CaretModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    pub fn has_selection(&self) -> bool {
        self.anchor.is_some()
    }

    /// Lower end of the selection, or the caret when nothing is selected
    pub fn selection_start(&self) -> usize {
        match self.anchor {
            Some(anchor) => anchor.min(self.caret),
            None => self.caret,
        }
    }

    pub fn selection_length(&self) -> usize {
        match self.anchor {
            Some(anchor) => anchor.abs_diff(self.caret),
            None => 0,
        }
    }

    pub fn selection_end(&self) -> usize {
        self.selection_start() + self.selection_length()
    }

    /// Move the caret, keeping the anchor where it is
    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret;
    }

    /// Start a selection at the caret unless one is already in progress
    pub fn begin_selection(&mut self) {
        if self.anchor.is_none() {
            self.anchor = Some(self.caret);
        }
    }

    pub fn set_anchor(&mut self, anchor: Option<usize>) {
        self.anchor = anchor;
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Drop the anchor if it has caught up with the caret
    pub fn collapse_if_empty(&mut self) {
        if self.anchor == Some(self.caret) {
            self.anchor = None;
        }
    }

    /// Collapse to a bare caret at `offset`
    pub fn place(&mut self, offset: usize) {
        self.caret = offset;
        self.anchor = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Select `[start, start + length)` with the anchor at `start`.
    ///
    /// A start splitting a CRLF snaps backward, an end snaps forward, so the
    /// selection grows to cover the whole pair.
    pub fn select(&mut self, buffer: &TextBuffer, start: usize, length: usize) -> EditResult<()> {
        let buffer_length = buffer.len_chars();
        let end = start.checked_add(length).ok_or(EditError::InvalidRange {
            start,
            length,
            buffer_length,
        })?;
        if start > buffer_length {
            return Err(EditError::OutOfRange {
                index: start,
                length: buffer_length,
            });
        }
        if end > buffer_length {
            return Err(EditError::InvalidRange {
                start,
                length,
                buffer_length,
            });
        }

        if length == 0 {
            self.place(snap_crlf(buffer, start, Snap::Forward));
        } else {
            self.anchor = Some(snap_crlf(buffer, start, Snap::Backward));
            self.caret = snap_crlf(buffer, end, Snap::Forward);
        }
        Ok(())
    }

    /// Adjust for `count` characters inserted at `offset`.
    ///
    /// The caret shifts when the insertion is at or before it, the anchor only
    /// when strictly before, so text typed at the caret extends past it.
    pub fn shift_for_insert(&mut self, offset: usize, count: usize) {
        if offset <= self.caret {
            self.caret += count;
        }
        if let Some(anchor) = self.anchor.as_mut() {
            if offset < *anchor {
                *anchor += count;
            }
        }
        self.collapse_if_empty();
    }

    /// Move the caret and anchor out of any CRLF pair an edit joined
    /// around them.
    pub fn settle(&mut self, buffer: &TextBuffer, snap: Snap) {
        self.caret = snap_crlf(buffer, self.caret, snap);
        self.anchor = self.anchor.map(|anchor| snap_crlf(buffer, anchor, snap));
        self.collapse_if_empty();
    }

    /// Adjust for `count` characters removed at `start`.
    ///
    /// Positions inside the removed span clamp down to `start`.
    pub fn shift_for_delete(&mut self, start: usize, count: usize) {
        let adjust = |pos: usize| {
            if pos <= start {
                pos
            } else if pos >= start + count {
                pos - count
            } else {
                start
            }
        };
        self.caret = adjust(self.caret);
        self.anchor = self.anchor.map(adjust);
        self.collapse_if_empty();
    }
}
