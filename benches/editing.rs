//! Benchmarks for editing, token parsing and layout
//!
//! Run with: cargo bench editing

use caret::editable::{EditSettings, TextEditor};
use caret::layout::{LayoutConstraints, MonospaceShaper, TextAlignment, TextShaper, TextWrapping};
use caret::{Modifiers, MoveTarget, Size};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn paragraph(lines: usize) -> String {
    "The quick brown fox jumps over the lazy dog.\n".repeat(lines)
}

fn editor_with(lines: usize) -> TextEditor {
    let mut editor = TextEditor::new(EditSettings::multi_line())
        .with_shaper(Box::new(MonospaceShaper::new(8.0, 16.0)));
    editor.set_text(&paragraph(lines));
    editor
}

// ============================================================================
// Typing
// ============================================================================

#[divan::bench(args = [10, 100, 1000])]
fn type_char_then_measure(bencher: divan::Bencher, lines: usize) {
    bencher
        .with_inputs(|| editor_with(lines))
        .bench_local_values(|mut editor| {
            editor.type_text(divan::black_box("x"));
            editor.measure(Size::new(640.0, 480.0));
            editor
        });
}

#[divan::bench(args = [10, 100, 1000])]
fn type_ten_chars_one_measure(bencher: divan::Bencher, lines: usize) {
    bencher
        .with_inputs(|| editor_with(lines))
        .bench_local_values(|mut editor| {
            for _ in 0..10 {
                editor.type_text(divan::black_box("x"));
            }
            editor.measure(Size::new(640.0, 480.0));
            editor
        });
}

// ============================================================================
// Parsing and layout
// ============================================================================

#[divan::bench(args = [100, 1000, 10000])]
fn parse_tokens(lines: usize) {
    let shaper = MonospaceShaper::new(8.0, 16.0);
    let text = paragraph(lines);
    divan::black_box(shaper.parse(&text, 0));
}

#[divan::bench(args = [100, 1000])]
fn layout_wrapped(bencher: divan::Bencher, lines: usize) {
    let shaper = MonospaceShaper::new(8.0, 16.0);
    let tokens = shaper.parse(&paragraph(lines), 0);
    let constraints = LayoutConstraints::new(
        Size::new(200.0, f32::INFINITY),
        TextWrapping::Wrap,
        TextAlignment::Left,
    );
    bencher.bench(|| shaper.calculate_layout(divan::black_box(&tokens), &constraints));
}

// ============================================================================
// Navigation
// ============================================================================

#[divan::bench]
fn move_down_through_1000_lines(bencher: divan::Bencher) {
    bencher
        .with_inputs(|| {
            let mut editor = editor_with(1000);
            editor.measure(Size::new(640.0, 480.0));
            editor.move_caret(MoveTarget::Home, Modifiers::CONTROL);
            editor
        })
        .bench_local_values(|mut editor| {
            while editor.move_caret(MoveTarget::Down, Modifiers::NONE) {}
            editor
        });
}
