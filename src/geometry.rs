//! Geometry primitives and selection band computation

use crate::layout::LayoutStream;

/// A point in content space (pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height; either may be infinite for unconstrained measurement
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn unbounded() -> Self {
        Self {
            width: f32::INFINITY,
            height: f32::INFINITY,
        }
    }
}

/// Rectangle for layout calculations
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning `left..right` horizontally
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Visual bands covering a selection.
///
/// A selection on one visual line yields just `top`. Across lines it yields a
/// `top` band from the first glyph to its line end, full `middle` bands for the
/// lines in between, and a `bottom` band from its line start to the last glyph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionGeometry {
    pub top: Option<Rect>,
    pub middle: Vec<Rect>,
    pub bottom: Option<Rect>,
}

impl SelectionGeometry {
    /// Compute bands for `[start, start + length)` against `layout`
    pub fn compute(layout: &LayoutStream, start: usize, length: usize) -> Self {
        let mut geometry = Self::default();
        if length == 0 || layout.line_count() == 0 {
            return geometry;
        }

        let end = (start + length).min(layout.char_count());
        if end <= start {
            return geometry;
        }
        let last = end - 1;

        let first_line = layout.line_index_at(start);
        let last_line = layout.line_index_at(last);
        let line_height = layout.line_height();

        let lead = layout.glyph_left(start);
        let trail = layout.glyph_right(last);

        if first_line == last_line {
            let top = layout.line(first_line).top;
            geometry.top = Some(Rect::from_edges(lead, top, trail, top + line_height));
            return geometry;
        }

        let line_count = last_line - first_line + 1;

        let first = layout.line(first_line);
        geometry.top = Some(Rect::from_edges(
            lead,
            first.top,
            first.right(),
            first.top + line_height,
        ));

        if line_count > 2 {
            geometry.middle = (first_line + 1..last_line)
                .map(|i| {
                    let line = layout.line(i);
                    Rect::from_edges(line.left, line.top, line.right(), line.top + line_height)
                })
                .collect();
        }

        if line_count > 1 {
            let bottom = layout.line(last_line);
            geometry.bottom = Some(Rect::from_edges(
                bottom.left,
                bottom.top,
                trail,
                bottom.top + line_height,
            ));
        }

        geometry
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.middle.is_empty() && self.bottom.is_none()
    }

    /// All bands, top to bottom
    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.top
            .iter()
            .chain(self.middle.iter())
            .chain(self.bottom.iter())
    }
}
