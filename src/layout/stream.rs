//! Laid-out lines and glyph positions, plus the index <-> pixel queries the
//! editor depends on.

use super::tokens::{TokenKind, TokenStream};
use super::{LayoutConstraints, TextAlignment};
use crate::geometry::{Point, Rect, Size};

/// Width of the rectangle reported for an insertion point
pub const CARET_WIDTH: f32 = 1.0;

/// One visual line.
///
/// Characters `start..end` are drawn on this line; `end..end + break_len` is
/// the hard line break that terminates it (0 for soft wraps and the last line).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutLine {
    pub start: usize,
    pub end: usize,
    pub break_len: usize,
    /// Alignment offset of the first glyph
    pub left: f32,
    pub top: f32,
    /// Advance of the drawn characters, trailing whitespace included
    pub width: f32,
}

impl LayoutLine {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Offset of the next line's first character
    pub fn next_start(&self) -> usize {
        self.end + self.break_len
    }

    /// Ended by wrapping rather than by a line break or end of text
    pub fn is_soft_wrapped(&self, is_last: bool) -> bool {
        self.break_len == 0 && !is_last
    }
}

/// Result of laying out one token stream under one set of constraints
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStream {
    token_version: u64,
    constraints: LayoutConstraints,
    line_height: f32,
    lines: Vec<LayoutLine>,
    glyph_left: Vec<f32>,
    glyph_width: Vec<f32>,
    size: Size,
}

impl LayoutStream {
    /// Greedy line breaking with per-character advances from `advance`.
    ///
    /// Whitespace hangs at line ends; a word that does not fit moves to the
    /// next line, and a word wider than the line breaks between characters.
    pub fn build(
        tokens: &TokenStream,
        constraints: &LayoutConstraints,
        line_height: f32,
        advance: impl Fn(char) -> f32,
    ) -> Self {
        let chars = tokens.chars();
        let n = chars.len();
        let wrap_width = constraints.wrap_width();

        let mut rel_x = vec![0.0f32; n];
        let mut widths = vec![0.0f32; n];
        let mut lines = Vec::new();

        let mut line_start = 0usize;
        let mut x = 0.0f32;

        for token in tokens.tokens() {
            match token.kind {
                TokenKind::LineBreak => {
                    for i in token.start..token.end() {
                        rel_x[i] = x;
                    }
                    push_line(&mut lines, line_start, token.start, token.len, x);
                    line_start = token.end();
                    x = 0.0;
                }
                TokenKind::Whitespace => {
                    for i in token.start..token.end() {
                        rel_x[i] = x;
                        widths[i] = advance(chars[i]);
                        x += widths[i];
                    }
                }
                TokenKind::Word => {
                    let word_width: f32 = chars[token.start..token.end()]
                        .iter()
                        .map(|&c| advance(c))
                        .sum();

                    if let Some(max) = wrap_width {
                        if x > 0.0 && x + word_width > max && line_start < token.start {
                            push_line(&mut lines, line_start, token.start, 0, x);
                            line_start = token.start;
                            x = 0.0;
                        }
                    }

                    for i in token.start..token.end() {
                        let w = advance(chars[i]);
                        if let Some(max) = wrap_width {
                            if x > 0.0 && x + w > max {
                                push_line(&mut lines, line_start, i, 0, x);
                                line_start = i;
                                x = 0.0;
                            }
                        }
                        rel_x[i] = x;
                        widths[i] = w;
                        x += w;
                    }
                }
            }
        }
        push_line(&mut lines, line_start, n, 0, x);

        let max_width = lines.iter().map(|l| l.width).fold(0.0f32, f32::max);
        let reference = if constraints.available.width.is_finite() {
            constraints.available.width
        } else {
            max_width
        };

        let mut glyph_left = rel_x;
        for (index, line) in lines.iter_mut().enumerate() {
            line.top = index as f32 * line_height;
            line.left = match constraints.alignment {
                TextAlignment::Left => 0.0,
                TextAlignment::Center => ((reference - line.width) / 2.0).max(0.0),
                TextAlignment::Right => (reference - line.width).max(0.0),
            };
            for left in &mut glyph_left[line.start..line.next_start()] {
                *left += line.left;
            }
        }

        let size = Size::new(max_width, lines.len() as f32 * line_height);

        Self {
            token_version: tokens.version(),
            constraints: *constraints,
            line_height,
            lines,
            glyph_left,
            glyph_width: widths,
            size,
        }
    }

    /// Buffer version of the token stream this layout was built from
    pub fn token_version(&self) -> u64 {
        self.token_version
    }

    pub fn constraints(&self) -> &LayoutConstraints {
        &self.constraints
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Extent of the widest line and of all lines stacked
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn char_count(&self) -> usize {
        self.glyph_left.len()
    }

    pub fn lines(&self) -> &[LayoutLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> &LayoutLine {
        &self.lines[index]
    }

    /// Visual line holding `index`. Offsets inside a line break belong to the
    /// line it terminates; the end of text belongs to the last line.
    pub fn line_index_at(&self, index: usize) -> usize {
        self.lines
            .partition_point(|line| line.start <= index)
            .saturating_sub(1)
    }

    /// Leading edge of the glyph at `index` (the line end past the last glyph)
    pub fn glyph_left(&self, index: usize) -> f32 {
        match self.glyph_left.get(index) {
            Some(&x) => x,
            None => self.lines.last().map(LayoutLine::right).unwrap_or(0.0),
        }
    }

    /// Trailing edge of the glyph at `index`
    pub fn glyph_right(&self, index: usize) -> f32 {
        self.glyph_left(index) + self.glyph_width.get(index).copied().unwrap_or(0.0)
    }

    /// Bounds of the glyph at `index`, None past the end of text
    pub fn glyph_bounds(&self, index: usize) -> Option<Rect> {
        let left = *self.glyph_left.get(index)?;
        let line = &self.lines[self.line_index_at(index)];
        Some(Rect::new(
            left,
            line.top,
            self.glyph_width[index],
            self.line_height,
        ))
    }

    /// Bounds of a caret placed before the character at `index`
    pub fn insertion_point_bounds(&self, index: usize) -> Option<Rect> {
        if self.lines.is_empty() {
            return None;
        }
        let index = index.min(self.char_count());
        let line = &self.lines[self.line_index_at(index)];
        let x = if index < line.end {
            self.glyph_left[index]
        } else {
            line.right()
        };
        Some(Rect::new(x, line.top, CARET_WIDTH, self.line_height))
    }

    /// Insertion offset nearest to `point`. Points above or below the text
    /// resolve against the first or last line.
    pub fn glyph_at_position(&self, point: Point) -> usize {
        let Some(last) = self.lines.len().checked_sub(1) else {
            return 0;
        };
        let row = if self.line_height > 0.0 {
            (point.y / self.line_height).floor()
        } else {
            0.0
        };
        let row = (row.max(0.0) as usize).min(last);
        let line = &self.lines[row];

        for i in line.start..line.end {
            let mid = self.glyph_left[i] + self.glyph_width[i] / 2.0;
            if point.x < mid {
                return i;
            }
        }

        // Past the end of a soft-wrapped line: stay on it rather than jump to
        // the next line's first glyph
        if line.is_soft_wrapped(row == last) && line.end > line.start {
            line.end - 1
        } else {
            line.end
        }
    }
}

fn push_line(lines: &mut Vec<LayoutLine>, start: usize, end: usize, break_len: usize, width: f32) {
    lines.push(LayoutLine {
        start,
        end,
        break_len,
        left: 0.0,
        top: 0.0,
        width,
    });
}
