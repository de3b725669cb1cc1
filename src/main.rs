//! Headless replay tool: applies edit steps to a `TextEditor` and prints the
//! resulting buffer, caret, selection and geometry after each one.

mod cli;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use caret::editable::{CommandRegistry, EditorEvent, TextEditor};
use caret::{EditorConfig, MemoryClipboard, Point, Size, Viewport};
use cli::{CliArgs, Step};

fn load_config(args: &CliArgs) -> Result<EditorConfig> {
    match &args.config {
        Some(path) => EditorConfig::load_from(path),
        None => Ok(EditorConfig::load()),
    }
}

fn apply(
    editor: &mut TextEditor,
    step: &Step,
    registry: &CommandRegistry,
    clipboard: &mut MemoryClipboard,
) -> Result<()> {
    match step {
        Step::Type(text) => {
            editor.type_text(text);
        }
        Step::Select { start, length } => editor
            .select(*start, *length)
            .with_context(|| format!("select={},{}", start, length))?,
        Step::Replace(text) => editor
            .set_selected_text(text)
            .context("replace failed")?,
        Step::Click { x, y } => {
            editor.mouse_down(Point::new(*x, *y));
            editor.mouse_up();
        }
        Step::Command(name) => {
            let command = registry.lookup(name).ok_or_else(|| {
                let known: Vec<_> = registry.names().collect();
                anyhow!("Unknown command '{}' (known: {})", name, known.join(", "))
            })?;
            if !editor.execute(command, clipboard) {
                tracing::debug!(command = name.as_str(), "command not handled");
            }
        }
    }
    Ok(())
}

fn report(editor: &TextEditor, viewport: &Viewport, label: &str) {
    println!("== {}", label);
    println!("text:      {:?}", editor.text());
    println!(
        "caret:     {} (selection {}+{})",
        editor.caret_position(),
        editor.selection_start(),
        editor.selection_length()
    );
    match editor.caret_bounds() {
        Some(r) => println!(
            "caret at:  x={:.1} y={:.1} w={:.1} h={:.1}",
            r.x, r.y, r.width, r.height
        ),
        None => println!("caret at:  (layout pending)"),
    }
    for rect in editor.selection_geometry().rects() {
        println!(
            "band:      x={:.1} y={:.1} w={:.1} h={:.1}",
            rect.x, rect.y, rect.width, rect.height
        );
    }
    println!(
        "scroll:    x={:.1} y={:.1}",
        viewport.horizontal_offset, viewport.vertical_offset
    );
}

fn main() -> Result<()> {
    caret::tracing::init();

    let args = CliArgs::parse();
    let steps = args.parsed_steps().map_err(|e| anyhow!(e))?;
    if args.width <= 0.0 || args.height <= 0.0 {
        bail!("Viewport size must be positive");
    }

    let config = load_config(&args)?;
    let registry = CommandRegistry::new();
    let mut clipboard = MemoryClipboard::new();
    let mut viewport = Viewport::new(args.width, args.height);
    let available = Size::new(args.width, f32::INFINITY);

    let mut editor = TextEditor::from_config(&config);
    editor.set_text(&args.text);
    editor.measure(available);
    editor.scroll_caret_into_view(&mut viewport);
    editor.drain_events();
    report(&editor, &viewport, "initial");

    for (raw, step) in args.steps.iter().zip(&steps) {
        apply(&mut editor, step, &registry, &mut clipboard)?;
        editor.measure(available);
        editor.scroll_caret_into_view(&mut viewport);

        for event in editor.drain_events() {
            match event {
                EditorEvent::TextChanged { version } => {
                    tracing::debug!(version, "text changed")
                }
                EditorEvent::SelectionChanged { start, length } => {
                    tracing::debug!(start, length, "selection changed")
                }
            }
        }
        report(&editor, &viewport, raw);
    }

    Ok(())
}
