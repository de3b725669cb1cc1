//! Edit hooks: injected strategy for observing and vetoing buffer changes.
//!
//! Masked inputs (password fields) need to see the characters the user actually
//! typed even though the buffer only stores the mask character. Instead of
//! subclassing the editor, callers hand it an [`EditHooks`] implementation.

/// Callbacks invoked by [`TextBuffer`](super::TextBuffer) mutations and by the
/// free-text entry pipeline.
///
/// All methods have permissive defaults, so implementors only override what
/// they care about.
pub trait EditHooks {
    /// A character was stored at `offset`.
    ///
    /// `requested` is what the caller asked to insert, `inserted` is what the
    /// buffer now holds (differs when a mask is active). `is_last` is true only
    /// for the final character of one insertion call.
    fn on_character_inserted(
        &mut self,
        _offset: usize,
        _requested: char,
        _inserted: char,
        _is_last: bool,
    ) {
    }

    /// `length` characters starting at `start` were removed.
    fn on_character_deleted(&mut self, _start: usize, _length: usize, _raise_events: bool) {}

    /// Whether `ch` may be typed at `offset`. Vetoed characters are skipped.
    fn is_valid_character_for_entry(&self, _offset: usize, _ch: char) -> bool {
        true
    }
}

/// Hooks that accept everything and observe nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl EditHooks for NoHooks {}

/// Keeps the unmasked text of a masked buffer.
///
/// Mirrors every insertion using the requested character and every deletion by
/// range, so `plaintext()` always lines up index-for-index with the buffer.
#[derive(Debug, Clone, Default)]
pub struct ShadowPlaintext {
    chars: Vec<char>,
}

impl ShadowPlaintext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The text as typed, before masking
    pub fn plaintext(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl EditHooks for ShadowPlaintext {
    fn on_character_inserted(
        &mut self,
        offset: usize,
        requested: char,
        _inserted: char,
        _is_last: bool,
    ) {
        let offset = offset.min(self.chars.len());
        self.chars.insert(offset, requested);
    }

    fn on_character_deleted(&mut self, start: usize, length: usize, _raise_events: bool) {
        let start = start.min(self.chars.len());
        let end = (start + length).min(self.chars.len());
        self.chars.drain(start..end);
    }
}
