//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use caret::editable::{EditHooks, EditSettings, TextEditor};
use caret::layout::MonospaceShaper;
use caret::{EditorEvent, Modifiers, MoveTarget, Size};

/// Character advance used by every test editor
pub const CHAR_WIDTH: f32 = 10.0;
/// Line height used by every test editor
pub const LINE_HEIGHT: f32 = 20.0;

/// Multi-line editor on a 10x20 monospace shaper with `text` loaded and the
/// caret at `caret`
pub fn test_editor(text: &str, caret: usize) -> TextEditor {
    editor_with_settings(text, caret, EditSettings::multi_line())
}

/// Single-line editor (no Return, no wrapping)
pub fn single_line_editor(text: &str, caret: usize) -> TextEditor {
    editor_with_settings(text, caret, EditSettings::single_line())
}

pub fn editor_with_settings(text: &str, caret: usize, settings: EditSettings) -> TextEditor {
    let mut editor = TextEditor::new(settings).with_shaper(Box::new(MonospaceShaper::new(
        CHAR_WIDTH,
        LINE_HEIGHT,
    )));
    editor.set_text(text);
    editor.set_caret_position(caret).unwrap();
    editor.drain_events();
    editor
}

/// Editor with a selection from `anchor` to `caret`
pub fn test_editor_with_selection(text: &str, anchor: usize, caret: usize) -> TextEditor {
    let mut editor = test_editor(text, anchor);
    if caret >= anchor {
        editor.select(anchor, caret - anchor).unwrap();
    } else {
        // select() anchors at the low end; extend leftwards instead
        while editor.caret_position() > caret {
            editor.move_caret(MoveTarget::Left, Modifiers::SHIFT);
        }
    }
    editor.drain_events();
    editor
}

/// Run a measurement pass at `width` x `height`
pub fn measure(editor: &mut TextEditor, width: f32, height: f32) -> Size {
    editor.measure(Size::new(width, height))
}

pub fn selection<H: EditHooks>(editor: &TextEditor<H>) -> (usize, usize) {
    (editor.selection_start(), editor.selection_length())
}

pub fn count_selection_changes(events: &[EditorEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, EditorEvent::SelectionChanged { .. }))
        .count()
}

pub fn count_text_changes(events: &[EditorEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, EditorEvent::TextChanged { .. }))
        .count()
}

/// Hooks that record every notification
#[derive(Debug, Default)]
pub struct RecordingHooks {
    /// (offset, requested, inserted, is_last)
    pub inserted: Vec<(usize, char, char, bool)>,
    /// (start, length, raise_events)
    pub deleted: Vec<(usize, usize, bool)>,
    /// Characters rejected by `is_valid_character_for_entry`
    pub reject: Vec<char>,
}

impl EditHooks for RecordingHooks {
    fn on_character_inserted(&mut self, offset: usize, requested: char, inserted: char, is_last: bool) {
        self.inserted.push((offset, requested, inserted, is_last));
    }

    fn on_character_deleted(&mut self, start: usize, length: usize, raise_events: bool) {
        self.deleted.push((start, length, raise_events));
    }

    fn is_valid_character_for_entry(&self, _offset: usize, ch: char) -> bool {
        !self.reject.contains(&ch)
    }
}

pub fn recording_editor(text: &str, settings: EditSettings) -> TextEditor<RecordingHooks> {
    let mut editor = TextEditor::with_hooks(settings, RecordingHooks::default()).with_shaper(
        Box::new(MonospaceShaper::new(CHAR_WIDTH, LINE_HEIGHT)),
    );
    editor.set_text(text);
    editor.drain_events();
    editor.hooks_mut().inserted.clear();
    editor.hooks_mut().deleted.clear();
    editor
}
