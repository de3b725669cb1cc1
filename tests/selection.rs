//! Selection tests - Select(), token selection, mouse selection, bands,
//! batched change notifications

mod common;

use caret::geometry::{Point, Rect};
use caret::{EditCommand, EditError, EditorEvent, MemoryClipboard};
use common::{count_selection_changes, measure, selection, test_editor};

// ========================================================================
// Select(start, length)
// ========================================================================

#[test]
fn test_select_round_trip() {
    let mut editor = test_editor("Hello World", 0);
    for (start, length) in [(0, 5), (6, 5), (3, 0), (0, 11), (11, 0)] {
        editor.select(start, length).unwrap();
        assert_eq!(selection(&editor), (start, length));
    }
}

#[test]
fn test_select_anchor_at_start() {
    let mut editor = test_editor("Hello World", 0);
    editor.select(2, 4).unwrap();
    assert_eq!(editor.selection_anchor(), Some(2));
    assert_eq!(editor.caret_position(), 6);
    assert_eq!(editor.selected_text(), "llo ");
}

#[test]
fn test_select_end_inside_crlf_snaps_forward() {
    let mut editor = test_editor("ab\r\ncd", 0);
    editor.select(1, 2).unwrap();
    assert_eq!(selection(&editor), (1, 3));
    assert_eq!(editor.selected_text(), "b\r\n");
}

#[test]
fn test_select_start_inside_crlf_snaps_backward() {
    let mut editor = test_editor("ab\r\ncd", 0);
    editor.select(3, 2).unwrap();
    assert_eq!(selection(&editor), (2, 3));
}

#[test]
fn test_select_rejects_out_of_range() {
    let mut editor = test_editor("abc", 1);
    assert_eq!(
        editor.select(4, 0),
        Err(EditError::OutOfRange {
            index: 4,
            length: 3
        })
    );
    assert_eq!(
        editor.select(1, 5),
        Err(EditError::InvalidRange {
            start: 1,
            length: 5,
            buffer_length: 3
        })
    );
    assert_eq!(editor.caret_position(), 1);
}

#[test]
fn test_select_all() {
    let mut editor = test_editor("hello\nworld", 3);
    editor.select_all();
    assert_eq!(selection(&editor), (0, 11));
    assert_eq!(editor.caret_position(), 11);
}

// ========================================================================
// Token selection
// ========================================================================

#[test]
fn test_select_current_token_word() {
    let mut editor = test_editor("foo, bar", 1);
    editor.select_current_token();
    assert_eq!(editor.selected_text(), "foo");
}

#[test]
fn test_select_current_token_punctuation() {
    let mut editor = test_editor("foo,, bar", 3);
    editor.select_current_token();
    assert_eq!(selection(&editor), (3, 2));
}

#[test]
fn test_select_current_token_at_end_uses_previous_char() {
    let mut editor = test_editor("foo bar", 7);
    editor.select_current_token();
    assert_eq!(editor.selected_text(), "bar");
}

#[test]
fn test_select_current_token_via_command() {
    let mut clipboard = MemoryClipboard::new();
    let mut editor = test_editor("  spaced  ", 1);
    assert!(editor.execute(EditCommand::SelectCurrentToken, &mut clipboard));
    assert_eq!(selection(&editor), (0, 2));
}

#[test]
fn test_select_current_token_empty_buffer() {
    let mut editor = test_editor("", 0);
    editor.select_current_token();
    assert_eq!(selection(&editor), (0, 0));
}

// ========================================================================
// Mouse
// ========================================================================

#[test]
fn test_mouse_drag_selects() {
    let mut editor = test_editor("hello world", 0);
    measure(&mut editor, 200.0, 100.0);

    assert!(editor.mouse_down(Point::new(22.0, 5.0)));
    assert_eq!(editor.caret_position(), 2);
    assert!(editor.is_selection_following_mouse());

    assert!(editor.mouse_move(Point::new(47.0, 5.0)));
    assert_eq!(selection(&editor), (2, 3));

    editor.mouse_up();
    assert!(!editor.is_selection_following_mouse());
    assert_eq!(selection(&editor), (2, 3));
    assert!(!editor.mouse_move(Point::new(100.0, 5.0)));
}

#[test]
fn test_mouse_drag_backwards() {
    let mut editor = test_editor("hello world", 0);
    measure(&mut editor, 200.0, 100.0);

    editor.mouse_down(Point::new(80.0, 5.0));
    editor.mouse_move(Point::new(0.0, 5.0));
    assert_eq!(editor.selection_anchor(), Some(8));
    assert_eq!(editor.caret_position(), 0);
    assert_eq!(selection(&editor), (0, 8));
}

#[test]
fn test_click_without_drag_collapses() {
    let mut editor = test_editor("hello world", 0);
    measure(&mut editor, 200.0, 100.0);

    editor.mouse_down(Point::new(32.0, 5.0));
    editor.mouse_up();
    assert_eq!(editor.caret_position(), 3);
    assert_eq!(editor.selection_anchor(), None);
}

#[test]
fn test_capture_lost_ends_drag() {
    let mut editor = test_editor("hello world", 0);
    measure(&mut editor, 200.0, 100.0);

    editor.mouse_down(Point::new(12.0, 5.0));
    editor.capture_lost();
    assert!(!editor.is_selection_following_mouse());
    assert!(!editor.mouse_move(Point::new(60.0, 5.0)));
}

#[test]
fn test_mouse_needs_layout() {
    let mut editor = test_editor("hello", 0);
    assert!(!editor.mouse_down(Point::new(22.0, 5.0)));
    assert_eq!(editor.caret_position(), 0);
}

#[test]
fn test_mouse_on_second_line() {
    let mut editor = test_editor("abc\ndef", 0);
    measure(&mut editor, 200.0, 100.0);
    editor.mouse_down(Point::new(12.0, 30.0));
    assert_eq!(editor.caret_position(), 5);
}

#[test]
fn test_double_click_selects_word() {
    let mut editor = test_editor("hello world", 0);
    measure(&mut editor, 200.0, 100.0);

    assert!(editor.mouse_double_click(Point::new(22.0, 5.0)));
    assert_eq!(selection(&editor), (0, 5));

    editor.mouse_double_click(Point::new(52.0, 5.0));
    assert_eq!(selection(&editor), (5, 1));

    editor.mouse_double_click(Point::new(72.0, 5.0));
    assert_eq!(editor.selected_text(), "world");
}

// ========================================================================
// Selection bands
// ========================================================================

#[test]
fn test_selection_geometry_bands() {
    let mut editor = test_editor("aaaa\nbbbb\ncccc", 0);
    measure(&mut editor, 200.0, 100.0);
    editor.select(2, 10).unwrap();

    let geometry = editor.selection_geometry();
    assert_eq!(geometry.top, Some(Rect::new(20.0, 0.0, 20.0, 20.0)));
    assert_eq!(geometry.middle, vec![Rect::new(0.0, 20.0, 40.0, 20.0)]);
    assert_eq!(geometry.bottom, Some(Rect::new(0.0, 40.0, 20.0, 20.0)));
}

#[test]
fn test_selection_geometry_empty_while_layout_pending() {
    let mut editor = test_editor("aaaa bbbb", 0);
    measure(&mut editor, 200.0, 100.0);
    editor.select(0, 4).unwrap();
    assert!(!editor.selection_geometry().is_empty());

    editor.insert("x", 9).unwrap();
    assert!(editor.selection_geometry().is_empty());
    assert!(editor.caret_bounds().is_none());

    measure(&mut editor, 200.0, 100.0);
    assert_eq!(
        editor.selection_geometry().top,
        Some(Rect::new(0.0, 0.0, 40.0, 20.0))
    );
}

// ========================================================================
// Batched change notifications
// ========================================================================

#[test]
fn test_nested_tracking_raises_once() {
    let mut editor = test_editor("hello world", 0);

    editor.begin_change_tracking();
    editor.select(0, 1).unwrap();
    editor.select(0, 2).unwrap();
    editor.select(1, 4).unwrap();
    assert!(editor.drain_events().is_empty());
    editor.end_change_tracking();

    assert_eq!(
        editor.drain_events(),
        vec![EditorEvent::SelectionChanged {
            start: 1,
            length: 4
        }]
    );
}

#[test]
fn test_tracking_without_net_change_is_silent() {
    let mut editor = test_editor("hello", 2);

    editor.begin_change_tracking();
    editor.select(0, 3).unwrap();
    editor.set_caret_position(2).unwrap();
    editor.end_change_tracking();

    assert_eq!(count_selection_changes(&editor.drain_events()), 0);
}

#[test]
#[should_panic(expected = "without a matching begin")]
fn test_unbalanced_end_panics() {
    let mut editor = test_editor("hello", 0);
    editor.end_change_tracking();
}
