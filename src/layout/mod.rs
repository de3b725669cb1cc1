//! Two-phase text layout: parse into a [`TokenStream`], then break the tokens
//! into lines and glyph positions as a [`LayoutStream`].
//!
//! Parsing is cheap and happens on every buffer change. Line breaking waits
//! for the next measurement pass, when the available size is known.

mod shaper;
mod stream;
mod tokens;

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

pub use shaper::{FontdueShaper, MonospaceShaper, TextShaper};
pub use stream::{LayoutLine, LayoutStream, CARET_WIDTH};
pub use tokens::{Token, TokenKind, TokenStream};

/// Whether long lines soft-wrap at the available width
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextWrapping {
    #[default]
    NoWrap,
    Wrap,
}

/// Horizontal placement of each line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Inputs to a layout pass besides the tokens themselves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConstraints {
    pub available: Size,
    pub wrapping: TextWrapping,
    pub alignment: TextAlignment,
}

impl LayoutConstraints {
    pub fn new(available: Size, wrapping: TextWrapping, alignment: TextAlignment) -> Self {
        Self {
            available,
            wrapping,
            alignment,
        }
    }

    /// No size limit, no wrapping, left aligned
    pub fn unbounded() -> Self {
        Self::new(Size::unbounded(), TextWrapping::NoWrap, TextAlignment::Left)
    }

    /// Width lines must fit into, None when wrapping is off or unbounded
    pub fn wrap_width(&self) -> Option<f32> {
        match self.wrapping {
            TextWrapping::Wrap if self.available.width.is_finite() => Some(self.available.width),
            _ => None,
        }
    }
}
