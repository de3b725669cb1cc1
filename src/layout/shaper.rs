//! Text shaping/measurement services.
//!
//! The editor only depends on index semantics (character index -> pixel rect
//! and back), so anything that can report per-character advances and a line
//! height can drive layout.

use anyhow::{anyhow, Result};
use fontdue::{Font, FontSettings};

use super::stream::LayoutStream;
use super::tokens::TokenStream;
use super::LayoutConstraints;

/// Tab stops are this many spaces wide
const TAB_SPACES: f32 = 4.0;

/// Parses buffer text and lays it out under measurement constraints
pub trait TextShaper {
    fn parse(&self, text: &str, version: u64) -> TokenStream {
        TokenStream::parse(text, version)
    }

    fn calculate_layout(&self, tokens: &TokenStream, constraints: &LayoutConstraints)
        -> LayoutStream;

    fn line_height(&self) -> f32;
}

/// Fixed-advance shaper: every printable character is `char_width` wide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceShaper {
    pub char_width: f32,
    pub line_height: f32,
}

impl MonospaceShaper {
    pub fn new(char_width: f32, line_height: f32) -> Self {
        Self {
            char_width,
            line_height,
        }
    }

    fn advance(&self, ch: char) -> f32 {
        match ch {
            '\t' => self.char_width * TAB_SPACES,
            '\r' | '\n' => 0.0,
            c if c.is_control() => 0.0,
            _ => self.char_width,
        }
    }
}

impl Default for MonospaceShaper {
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

impl TextShaper for MonospaceShaper {
    fn calculate_layout(
        &self,
        tokens: &TokenStream,
        constraints: &LayoutConstraints,
    ) -> LayoutStream {
        LayoutStream::build(tokens, constraints, self.line_height, |c| self.advance(c))
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

/// Shaper measuring advances from a TrueType/OpenType font via fontdue
pub struct FontdueShaper {
    font: Font,
    px: f32,
    line_height: f32,
}

impl FontdueShaper {
    /// Load a font from raw bytes, measuring at `px` pixels
    pub fn from_bytes(bytes: &[u8], px: f32) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| anyhow!("failed to parse font: {}", e))?;
        let line_height = font
            .horizontal_line_metrics(px)
            .map(|m| m.new_line_size.ceil())
            .unwrap_or(px * 1.2);
        Ok(Self {
            font,
            px,
            line_height,
        })
    }

    pub fn font_size(&self) -> f32 {
        self.px
    }

    fn advance(&self, ch: char) -> f32 {
        match ch {
            '\t' => self.font.metrics(' ', self.px).advance_width * TAB_SPACES,
            '\r' | '\n' => 0.0,
            c if c.is_control() => 0.0,
            c => self.font.metrics(c, self.px).advance_width,
        }
    }
}

impl TextShaper for FontdueShaper {
    fn calculate_layout(
        &self,
        tokens: &TokenStream,
        constraints: &LayoutConstraints,
    ) -> LayoutStream {
        LayoutStream::build(tokens, constraints, self.line_height, |c| self.advance(c))
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}
