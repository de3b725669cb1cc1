//! TextEditor - buffer, caret, deferred layout and scroll sync in one place.
//!
//! Data flow: input/commands -> edit operations -> buffer mutation -> token
//! stream rebuild (immediate) -> layout rebuild (next `measure`) -> caret and
//! selection geometry -> scroll adjustment.
//!
//! Every public operation runs inside a change-tracking scope, so a compound
//! edit yields at most one [`EditorEvent::SelectionChanged`].

use std::time::Duration;

use super::buffer::TextBuffer;
use super::caret::{next_offset, prev_offset, snap_crlf, CaretModel, Snap};
use super::constraints::{EditSettings, NewlineStyle};
use super::hooks::{EditHooks, NoHooks};
use super::messages::{EditCommand, Modifiers, MoveTarget};
use super::tracker::ChangeTracker;
use crate::clipboard::Clipboard;
use crate::config::EditorConfig;
use crate::error::EditResult;
use crate::geometry::{Point, Rect, SelectionGeometry, Size};
use crate::layout::{LayoutConstraints, LayoutStream, MonospaceShaper, TextShaper, TokenStream};
use crate::property::{next_buffer_id, TextSink, VersionedText};
use crate::scroll::{HorizontalScrollPolicy, ScrollSynchronizer, ScrollViewport};
use crate::util::{char_type, CharType};

/// Notifications queued for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    /// Buffer content changed; one per coalesced edit
    TextChanged { version: u64 },
    /// Caret or selection differs from before the outermost operation
    SelectionChanged { start: usize, length: usize },
}

/// Default caret blink half-period
pub const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(530);

/// Offsets handed to buffer primitives from user-input paths come from the
/// caret model and are always in range. A failure means that invariant broke.
fn in_range<T: Default>(result: EditResult<T>) -> T {
    result.unwrap_or_else(|e| {
        tracing::error!("caret invariant violated: {}", e);
        debug_assert!(false, "caret invariant violated: {}", e);
        T::default()
    })
}

/// The text-editing primitive.
///
/// Generic over the hooks `H` so masked inputs can keep typed state (see
/// [`ShadowPlaintext`](super::ShadowPlaintext)) and read it back via
/// [`hooks`](Self::hooks).
pub struct TextEditor<H: EditHooks = NoHooks> {
    buffer: TextBuffer,
    caret: CaretModel,
    /// CRLF snap direction for the last primitive of an open compound edit
    settle_snap: Snap,
    tracker: ChangeTracker,
    hooks: H,
    shaper: Box<dyn TextShaper>,
    settings: EditSettings,

    tokens: TokenStream,
    layout: Option<LayoutStream>,
    layout_pending: bool,
    caret_bounds: Option<Rect>,
    selection_geometry: SelectionGeometry,

    scroll_pending: bool,
    scroll_policy: HorizontalScrollPolicy,
    page_height: f32,

    overwrite: bool,
    selection_follows_mouse: bool,
    blink_elapsed: Duration,
    blink_interval: Duration,

    events: Vec<EditorEvent>,
    buffer_id: u64,
    published: Option<VersionedText>,
}

impl TextEditor<NoHooks> {
    pub fn new(settings: EditSettings) -> Self {
        Self::with_hooks(settings, NoHooks)
    }

    /// Build an editor from loaded configuration
    pub fn from_config(config: &EditorConfig) -> Self {
        let mut editor = Self::new(config.settings).with_shaper(Box::new(
            MonospaceShaper::new(config.char_width, config.line_height),
        ));
        editor.blink_interval = Duration::from_millis(config.caret_blink_ms);
        editor.scroll_policy = config.horizontal_scroll;
        editor
    }
}

impl<H: EditHooks> TextEditor<H> {
    pub fn with_hooks(settings: EditSettings, hooks: H) -> Self {
        let buffer = TextBuffer::new();
        let tokens = TokenStream::parse("", buffer.version());
        Self {
            buffer,
            caret: CaretModel::new(),
            settle_snap: Snap::Forward,
            tracker: ChangeTracker::new(),
            hooks,
            shaper: Box::new(MonospaceShaper::default()),
            settings,
            tokens,
            layout: None,
            layout_pending: true,
            caret_bounds: None,
            selection_geometry: SelectionGeometry::default(),
            scroll_pending: false,
            scroll_policy: HorizontalScrollPolicy::default(),
            page_height: 0.0,
            overwrite: false,
            selection_follows_mouse: false,
            blink_elapsed: Duration::ZERO,
            blink_interval: DEFAULT_BLINK_INTERVAL,
            events: Vec::new(),
            buffer_id: next_buffer_id(),
            published: None,
        }
    }

    /// Replace the measurement service; the current layout is discarded
    pub fn with_shaper(mut self, shaper: Box<dyn TextShaper>) -> Self {
        self.set_shaper(shaper);
        self
    }

    pub fn set_shaper(&mut self, shaper: Box<dyn TextShaper>) {
        self.shaper = shaper;
        self.tokens = self.shaper.parse(&self.buffer.content(), self.buffer.version());
        self.invalidate_layout();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn text(&self) -> String {
        self.buffer.content()
    }

    pub fn len(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.buffer.version()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn settings(&self) -> &EditSettings {
        &self.settings
    }

    /// Replace the settings. Wrapping or alignment changes invalidate layout.
    pub fn set_settings(&mut self, settings: EditSettings) {
        let relayout = settings.wrapping != self.settings.wrapping
            || settings.alignment != self.settings.alignment;
        self.settings = settings;
        if relayout {
            self.invalidate_layout();
        }
    }

    /// Set the mask character for subsequently inserted text
    pub fn set_mask(&mut self, mask: Option<char>) {
        self.buffer.set_mask(mask);
    }

    pub fn caret_position(&self) -> usize {
        self.caret.caret()
    }

    pub fn selection_anchor(&self) -> Option<usize> {
        self.caret.anchor()
    }

    pub fn selection_start(&self) -> usize {
        self.caret.selection_start()
    }

    pub fn selection_length(&self) -> usize {
        self.caret.selection_length()
    }

    pub fn selected_text(&self) -> String {
        let start = self.caret.selection_start();
        self.buffer.slice(start..start + self.caret.selection_length())
    }

    pub fn is_overwrite_mode(&self) -> bool {
        self.overwrite
    }

    pub fn is_selection_following_mouse(&self) -> bool {
        self.selection_follows_mouse
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    /// Current layout, None while a rebuild is pending
    pub fn layout(&self) -> Option<&LayoutStream> {
        if self.layout_pending {
            None
        } else {
            self.layout.as_ref()
        }
    }

    pub fn is_layout_pending(&self) -> bool {
        self.layout_pending
    }

    /// Caret rectangle from the last layout pass, None while pending
    pub fn caret_bounds(&self) -> Option<Rect> {
        self.caret_bounds
    }

    /// Selection bands from the last layout pass, empty while pending
    pub fn selection_geometry(&self) -> &SelectionGeometry {
        &self.selection_geometry
    }

    pub fn is_scroll_pending(&self) -> bool {
        self.scroll_pending
    }

    /// Take all queued notifications
    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Change tracking
    // =========================================================================

    /// Open a change-tracking scope. Scopes nest.
    pub fn begin_change_tracking(&mut self) {
        self.tracker.begin(&self.caret);
    }

    /// Close a change-tracking scope.
    ///
    /// # Panics
    ///
    /// Panics if no scope is open.
    pub fn end_change_tracking(&mut self) {
        if self.tracker.end(&self.caret) {
            self.events.push(EditorEvent::SelectionChanged {
                start: self.caret.selection_start(),
                length: self.caret.selection_length(),
            });
        }
        if !self.tracker.is_tracking() {
            self.refresh_geometry();
        }
    }

    fn tracked<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.begin_change_tracking();
        let result = f(self);
        self.end_change_tracking();
        result
    }

    // =========================================================================
    // Buffer primitives
    // =========================================================================

    fn raw_insert(&mut self, offset: usize, text: &str) -> EditResult<usize> {
        let count = self.buffer.insert(offset, text, &mut self.hooks)?;
        if count > 0 {
            self.caret.shift_for_insert(offset, count);
            self.edit_applied(Snap::Forward);
        }
        Ok(count)
    }

    /// `raise_events` is forwarded to the hooks only; observers always see
    /// the change, once per compound edit.
    fn raw_delete(&mut self, start: usize, length: usize, raise_events: bool) -> EditResult<usize> {
        let count = self
            .buffer
            .delete(start, length, raise_events, &mut self.hooks)?;
        if count > 0 {
            self.caret.shift_for_delete(start, count);
            self.edit_applied(Snap::Backward);
        }
        Ok(count)
    }

    /// Run `f` as one edit: a single version bump and at most one
    /// `TextChanged`, however many primitives it applies.
    fn coalesced<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.buffer.begin_edit();
        let result = f(self);
        if self.buffer.end_edit() {
            self.caret.settle(&self.buffer, self.settle_snap);
            self.text_changed();
        }
        result
    }

    /// Inside a compound edit the caret may sit in a CRLF pair until the
    /// group closes, so later primitives still see the edit offset.
    fn edit_applied(&mut self, snap: Snap) {
        if self.buffer.in_edit() {
            self.settle_snap = snap;
        } else {
            self.caret.settle(&self.buffer, snap);
            self.text_changed();
        }
    }

    /// Re-parse immediately, defer layout to the next measurement pass
    fn text_changed(&mut self) {
        self.tokens = self.shaper.parse(&self.buffer.content(), self.buffer.version());
        self.invalidate_layout();
        self.scroll_pending = true;
        self.blink_elapsed = Duration::ZERO;
        self.events.push(EditorEvent::TextChanged {
            version: self.buffer.version(),
        });
    }

    fn invalidate_layout(&mut self) {
        self.layout = None;
        self.layout_pending = true;
        self.caret_bounds = None;
        self.selection_geometry = SelectionGeometry::default();
    }

    // =========================================================================
    // Programmatic edits
    // =========================================================================

    /// Insert `text` at `offset` verbatim (masking still applies)
    pub fn insert(&mut self, text: &str, offset: usize) -> EditResult<usize> {
        self.tracked(|ed| ed.raw_insert(offset, text))
    }

    /// Remove up to `length` characters at `start`
    pub fn delete(&mut self, start: usize, length: usize) -> EditResult<usize> {
        self.tracked(|ed| ed.raw_delete(start, length, true))
    }

    /// Remove all text and reset the caret
    pub fn clear(&mut self) {
        self.tracked(|ed| {
            let removed = ed.buffer.clear(&mut ed.hooks);
            ed.caret.reset();
            if removed > 0 {
                ed.text_changed();
            }
        });
    }

    /// Replace all text as one edit; the caret ends up after the new text
    pub fn set_text(&mut self, text: &str) {
        self.tracked(|ed| {
            ed.coalesced(|ed| {
                in_range(ed.raw_delete(0, ed.buffer.len_chars(), false));
                ed.caret.reset();
                in_range(ed.raw_insert(0, text));
            })
        });
    }

    /// Select `[start, start + length)`, anchor at `start`
    pub fn select(&mut self, start: usize, length: usize) -> EditResult<()> {
        self.tracked(|ed| {
            ed.caret.select(&ed.buffer, start, length)?;
            ed.after_caret_move();
            Ok(())
        })
    }

    pub fn set_caret_position(&mut self, offset: usize) -> EditResult<()> {
        self.select(offset, 0)
    }

    /// Replace the selection with `text` and select the inserted span.
    ///
    /// Observers see a single text change and at most one selection change.
    pub fn set_selected_text(&mut self, text: &str) -> EditResult<()> {
        self.tracked(|ed| {
            let start = ed.caret.selection_start();
            let length = ed.caret.selection_length();
            if length == 0 && text.is_empty() {
                return Ok(());
            }

            ed.coalesced(|ed| {
                if length > 0 {
                    ed.raw_delete(start, length, text.is_empty())?;
                }
                ed.caret.clear_selection();
                let offset = ed.caret.caret();
                let inserted = ed.raw_insert(offset, text)?;
                if inserted > 0 {
                    ed.caret.select(&ed.buffer, offset, inserted)?;
                }
                Ok(())
            })
        })
    }

    // =========================================================================
    // Free-text entry
    // =========================================================================

    /// Type `text` at the caret, replacing the selection.
    ///
    /// Each character passes through Return/Tab filtering, casing, the
    /// validity hook, then masking; overwrite mode and max length apply.
    /// Returns the number of characters stored.
    pub fn type_text(&mut self, text: &str) -> usize {
        if self.settings.is_read_only || text.is_empty() {
            return 0;
        }
        self.tracked(|ed| ed.coalesced(|ed| ed.enter_text(text)))
    }

    fn enter_text(&mut self, text: &str) -> usize {
        let had_selection = self.caret.selection_length() > 0;
        if had_selection {
            let start = self.caret.selection_start();
            let length = self.caret.selection_length();
            in_range(self.raw_delete(start, length, false));
        }
        self.caret.clear_selection();

        let offset = self.caret.caret();
        let mut accepted = self.filter_entry(text, offset);

        let len = self.buffer.len_chars();
        let overwrite = self.overwrite && !had_selection;
        let mut overwrite_count = if overwrite {
            self.overwrite_span(offset, accepted.len())
        } else {
            0
        };

        let capacity = self.settings.remaining_capacity(len - overwrite_count);
        if accepted.len() > capacity {
            tracing::debug!(
                requested = accepted.len(),
                capacity,
                "truncating entry at max length"
            );
            accepted.truncate(capacity);
            // Never keep half of a CRLF newline
            if self.settings.newline == NewlineStyle::CrLf && accepted.last() == Some(&'\r') {
                accepted.pop();
            }
            if overwrite {
                overwrite_count = overwrite_count.min(self.overwrite_span(offset, accepted.len()));
            }
        }

        if accepted.is_empty() {
            return 0;
        }

        if overwrite_count > 0 {
            in_range(self.raw_delete(offset, overwrite_count, false));
        }
        let entry: String = accepted.into_iter().collect();
        let inserted = in_range(self.raw_insert(offset, &entry));
        tracing::debug!(offset, inserted, overwrite_count, "text entered");
        inserted
    }

    /// Characters replaced when typing `count` characters at `offset` in
    /// overwrite mode; a CRLF pair is consumed whole
    fn overwrite_span(&self, offset: usize, count: usize) -> usize {
        let span = count.min(self.buffer.len_chars() - offset);
        if span > 0 && self.buffer.splits_crlf(offset + span) {
            span + 1
        } else {
            span
        }
    }

    /// Return/Tab policy, casing and the validity hook, in that order
    fn filter_entry(&self, text: &str, offset: usize) -> Vec<char> {
        let mut accepted: Vec<char> = Vec::with_capacity(text.len());
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '\r' | '\n' => {
                    if ch == '\r' && chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    if !self.settings.accepts_return {
                        continue;
                    }
                    let newline = self.settings.newline.as_str();
                    let at = offset + accepted.len();
                    if newline
                        .chars()
                        .next()
                        .is_some_and(|c| self.hooks.is_valid_character_for_entry(at, c))
                    {
                        accepted.extend(newline.chars());
                    }
                }
                _ => {
                    let ch = if ch == '\t' && !self.settings.accepts_tab {
                        ' '
                    } else {
                        ch
                    };
                    for cased in self.settings.casing.apply(ch) {
                        let at = offset + accepted.len();
                        if self.hooks.is_valid_character_for_entry(at, cased) {
                            accepted.push(cased);
                        }
                    }
                }
            }
        }
        accepted
    }

    /// Backspace: delete the selection or the unit before the caret
    pub fn backspace(&mut self) -> bool {
        if self.settings.is_read_only {
            return false;
        }
        self.tracked(|ed| {
            if ed.delete_selection() {
                return true;
            }
            let caret = ed.caret.caret();
            if caret == 0 {
                return false;
            }
            let prev = prev_offset(&ed.buffer, caret);
            in_range(ed.raw_delete(prev, caret - prev, true)) > 0
        })
    }

    /// Delete: remove the selection or the unit after the caret
    pub fn delete_forward(&mut self) -> bool {
        if self.settings.is_read_only {
            return false;
        }
        self.tracked(|ed| {
            if ed.delete_selection() {
                return true;
            }
            let caret = ed.caret.caret();
            let next = next_offset(&ed.buffer, caret);
            in_range(ed.raw_delete(caret, next - caret, true)) > 0
        })
    }

    fn delete_selection(&mut self) -> bool {
        let length = self.caret.selection_length();
        if length == 0 {
            return false;
        }
        let start = self.caret.selection_start();
        in_range(self.raw_delete(start, length, true));
        self.caret.clear_selection();
        true
    }

    pub fn toggle_insert_mode(&mut self) {
        self.overwrite = !self.overwrite;
        tracing::debug!(overwrite = self.overwrite, "insert mode toggled");
    }

    // =========================================================================
    // Selection commands
    // =========================================================================

    pub fn select_all(&mut self) {
        let len = self.buffer.len_chars();
        in_range(self.select(0, len));
    }

    /// Select the run of characters sharing the class (punctuation,
    /// whitespace, word) of the character under the caret
    pub fn select_current_token(&mut self) {
        let len = self.buffer.len_chars();
        if len == 0 {
            return;
        }
        let probe = self.caret.caret().min(len - 1);
        let Some(ch) = self.buffer.char_at(probe) else {
            return;
        };
        let class = char_type(ch);
        let same = |i: usize| self.buffer.char_at(i).map(char_type) == Some(class);

        let mut start = probe;
        while start > 0 && same(start - 1) {
            start -= 1;
        }
        let mut end = probe + 1;
        while end < len && same(end) {
            end += 1;
        }

        if class == CharType::Whitespace {
            tracing::trace!(start, end, "selecting whitespace run");
        }
        in_range(self.select(start, end - start));
    }

    // =========================================================================
    // Clipboard
    // =========================================================================

    /// Copy the selection. Masked text is never copied.
    pub fn copy(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        if self.buffer.mask().is_some() || self.caret.selection_length() == 0 {
            return false;
        }
        clipboard.set_text(&self.selected_text());
        true
    }

    pub fn cut(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        if self.settings.is_read_only || !self.copy(clipboard) {
            return false;
        }
        self.tracked(|ed| ed.delete_selection())
    }

    /// Type the clipboard contents at the caret
    pub fn paste(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        if self.settings.is_read_only {
            return false;
        }
        match clipboard.get_text() {
            Some(text) if !text.is_empty() => self.type_text(&text) > 0,
            _ => false,
        }
    }

    /// Run a registry command; returns whether it was handled
    pub fn execute(&mut self, command: EditCommand, clipboard: &mut dyn Clipboard) -> bool {
        match command {
            EditCommand::Cut => self.cut(clipboard),
            EditCommand::Copy => self.copy(clipboard),
            EditCommand::Paste => self.paste(clipboard),
            EditCommand::SelectAll => {
                self.select_all();
                true
            }
            EditCommand::SelectCurrentToken => {
                self.select_current_token();
                true
            }
            EditCommand::ToggleInsertMode => {
                self.toggle_insert_mode();
                true
            }
            EditCommand::Backspace => self.backspace(),
            EditCommand::Delete => self.delete_forward(),
            EditCommand::Move(target, modifiers) => self.move_caret(target, modifiers),
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Move the caret. Returns true when handled.
    ///
    /// With `selecting` the anchor is set on the first move and stays fixed.
    /// Without it, an active selection collapses: Left/Right snap to its
    /// start/end, other targets drop the anchor and move normally. A
    /// disallowed move is still handled while selecting.
    pub fn move_caret(&mut self, target: MoveTarget, modifiers: Modifiers) -> bool {
        self.tracked(|ed| ed.move_caret_inner(target, modifiers))
    }

    fn move_caret_inner(&mut self, target: MoveTarget, modifiers: Modifiers) -> bool {
        let had_selection = self.caret.has_selection();

        if modifiers.selecting {
            self.caret.begin_selection();
        } else if had_selection {
            match target {
                MoveTarget::Left => {
                    let start = self.caret.selection_start();
                    self.caret.place(start);
                    self.after_caret_move();
                    return true;
                }
                MoveTarget::Right => {
                    let end = self.caret.selection_end();
                    self.caret.place(end);
                    self.after_caret_move();
                    return true;
                }
                _ => self.caret.clear_selection(),
            }
        }

        let from = self.caret.caret();
        let to = self.movement_target(target, modifiers, from);
        let moved = match to {
            Some(pos) if pos != from => {
                self.caret.set_caret(pos);
                true
            }
            _ => false,
        };

        if modifiers.selecting {
            self.caret.collapse_if_empty();
        }

        tracing::trace!(target: "caret", movement = ?target, from, to = self.caret.caret(), moved, "move");

        if moved || had_selection || modifiers.selecting {
            self.after_caret_move();
            true
        } else {
            false
        }
    }

    fn movement_target(&self, target: MoveTarget, modifiers: Modifiers, from: usize) -> Option<usize> {
        let len = self.buffer.len_chars();
        match target {
            MoveTarget::Left => (from > 0).then(|| prev_offset(&self.buffer, from)),
            MoveTarget::Right => (from < len).then(|| next_offset(&self.buffer, from)),
            MoveTarget::Up => self.vertical_target(-self.line_height(), false),
            MoveTarget::Down => self.vertical_target(self.line_height(), false),
            MoveTarget::PageUp => self.vertical_target(-self.page_height(), true),
            MoveTarget::PageDown => self.vertical_target(self.page_height(), true),
            MoveTarget::Home if modifiers.control => Some(0),
            MoveTarget::End if modifiers.control => Some(len),
            MoveTarget::Home => self.line_home(from),
            MoveTarget::End => self.line_end(from),
        }
    }

    fn line_height(&self) -> f32 {
        self.layout()
            .map(LayoutStream::line_height)
            .unwrap_or_else(|| self.shaper.line_height())
    }

    fn page_height(&self) -> f32 {
        if self.page_height > 0.0 {
            self.page_height
        } else {
            self.line_height()
        }
    }

    /// Hit-test a point `dy` above/below the caret's vertical center
    fn vertical_target(&self, dy: f32, clamp_to_text: bool) -> Option<usize> {
        let layout = self.layout()?;
        let bounds = self.caret_bounds?;
        let line_height = layout.line_height();

        let mut y = bounds.y + bounds.height / 2.0 + dy;
        if clamp_to_text {
            let first_mid = line_height / 2.0;
            let last_mid = (layout.line_count() - 1) as f32 * line_height + line_height / 2.0;
            y = y.clamp(first_mid, last_mid);
        } else if y < 0.0 || y >= layout.size().height {
            return None;
        }

        let hit = layout.glyph_at_position(Point::new(bounds.x, y));
        Some(snap_crlf(&self.buffer, hit, Snap::Forward))
    }

    fn line_home(&self, from: usize) -> Option<usize> {
        let layout = self.layout()?;
        Some(layout.line(layout.line_index_at(from)).start)
    }

    /// End of the visual line. On a soft-wrapped line, step back over the
    /// implicit terminator so the caret stays on the line.
    fn line_end(&self, from: usize) -> Option<usize> {
        let layout = self.layout()?;
        let index = layout.line_index_at(from);
        let line = layout.line(index);
        let is_last = index + 1 == layout.line_count();
        if line.is_soft_wrapped(is_last) && line.end > line.start {
            Some(line.end - 1)
        } else {
            Some(line.end)
        }
    }

    fn after_caret_move(&mut self) {
        self.blink_elapsed = Duration::ZERO;
        self.scroll_pending = true;
    }

    // =========================================================================
    // Mouse
    // =========================================================================

    fn hit_test(&self, point: Point) -> Option<usize> {
        let layout = self.layout()?;
        Some(snap_crlf(
            &self.buffer,
            layout.glyph_at_position(point),
            Snap::Forward,
        ))
    }

    /// Place the caret under `point` and start a drag selection
    pub fn mouse_down(&mut self, point: Point) -> bool {
        let Some(pos) = self.hit_test(point) else {
            return false;
        };
        self.tracked(|ed| {
            ed.caret.place(pos);
            ed.caret.set_anchor(Some(pos));
            ed.selection_follows_mouse = true;
            ed.after_caret_move();
        });
        true
    }

    /// Extend a drag selection to `point`
    pub fn mouse_move(&mut self, point: Point) -> bool {
        if !self.selection_follows_mouse {
            return false;
        }
        let Some(pos) = self.hit_test(point) else {
            return false;
        };
        self.tracked(|ed| {
            ed.caret.set_caret(pos);
            ed.after_caret_move();
        });
        true
    }

    pub fn mouse_up(&mut self) {
        self.end_mouse_selection();
    }

    pub fn capture_lost(&mut self) {
        self.end_mouse_selection();
    }

    fn end_mouse_selection(&mut self) {
        self.selection_follows_mouse = false;
        self.tracked(|ed| ed.caret.collapse_if_empty());
    }

    /// Select the token under `point`
    pub fn mouse_double_click(&mut self, point: Point) -> bool {
        let Some(pos) = self.hit_test(point) else {
            return false;
        };
        self.tracked(|ed| {
            ed.selection_follows_mouse = false;
            ed.caret.place(pos);
            ed.select_current_token();
        });
        true
    }

    // =========================================================================
    // Layout and scrolling
    // =========================================================================

    /// Measurement pass: rebuild the layout if the tokens or constraints
    /// changed, then recompute caret and selection geometry.
    ///
    /// Returns the content size.
    pub fn measure(&mut self, available: Size) -> Size {
        let constraints =
            LayoutConstraints::new(available, self.settings.wrapping, self.settings.alignment);

        let stale = match &self.layout {
            Some(layout) => {
                layout.token_version() != self.tokens.version()
                    || *layout.constraints() != constraints
            }
            None => true,
        };

        if stale {
            let _span = tracing::debug_span!("layout", version = self.tokens.version()).entered();
            let layout = self.shaper.calculate_layout(&self.tokens, &constraints);
            tracing::trace!(lines = layout.line_count(), "layout rebuilt");
            self.layout = Some(layout);
        }
        self.layout_pending = false;

        if available.height.is_finite() && available.height > 0.0 {
            self.page_height = available.height;
        }

        self.refresh_geometry();
        self.layout
            .as_ref()
            .map(LayoutStream::size)
            .unwrap_or_default()
    }

    fn refresh_geometry(&mut self) {
        let Some(layout) = self.layout() else {
            self.caret_bounds = None;
            self.selection_geometry = SelectionGeometry::default();
            return;
        };
        let caret_bounds = layout.insertion_point_bounds(self.caret.caret());
        let geometry = SelectionGeometry::compute(
            layout,
            self.caret.selection_start(),
            self.caret.selection_length(),
        );
        self.caret_bounds = caret_bounds;
        self.selection_geometry = geometry;
    }

    /// Scroll the caret into view with the configured horizontal policy
    pub fn scroll_caret_into_view(&mut self, viewport: &mut dyn ScrollViewport) -> bool {
        self.scroll_caret_into_view_with(viewport, self.scroll_policy)
    }

    /// Scroll the caret into view if a move or edit requested it.
    ///
    /// Waits (keeping the request) while layout is pending.
    pub fn scroll_caret_into_view_with(
        &mut self,
        viewport: &mut dyn ScrollViewport,
        policy: HorizontalScrollPolicy,
    ) -> bool {
        if viewport.viewport_height() > 0.0 {
            self.page_height = viewport.viewport_height();
        }
        if !self.scroll_pending {
            return false;
        }
        let (Some(layout), Some(caret)) = (self.layout(), self.caret_bounds) else {
            return false;
        };

        let line = layout.line(layout.line_index_at(self.caret.caret()));
        let scrolled = ScrollSynchronizer::reveal(
            caret,
            viewport,
            policy,
            Some((line, self.settings.alignment)),
        );
        self.scroll_pending = false;
        scrolled
    }

    // =========================================================================
    // Caret blink
    // =========================================================================

    /// Advance the blink clock
    pub fn tick(&mut self, elapsed: Duration) {
        self.blink_elapsed += elapsed;
    }

    pub fn caret_visible(&self) -> bool {
        let interval = self.blink_interval.as_millis();
        if interval == 0 {
            return true;
        }
        (self.blink_elapsed.as_millis() / interval) % 2 == 0
    }

    pub fn blink_elapsed(&self) -> Duration {
        self.blink_elapsed
    }

    // =========================================================================
    // Text write-back
    // =========================================================================

    /// Cheap handle identifying the current text
    pub fn text_value(&self) -> VersionedText {
        VersionedText::Buffer {
            buffer_id: self.buffer_id,
            version: self.buffer.version(),
        }
    }

    /// Push the text to `sink` if it changed since the last publish
    pub fn publish_text(&mut self, sink: &mut dyn TextSink) -> bool {
        let value = self.text_value();
        if self
            .published
            .as_ref()
            .is_some_and(|published| published.same_value(&value))
        {
            return false;
        }
        sink.set_text(value.clone(), &self.buffer.content());
        self.published = Some(value);
        true
    }
}
