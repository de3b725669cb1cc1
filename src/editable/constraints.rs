//! Owner-side settings that shape how the editor accepts input.
//!
//! The owning control used to expose these as loose properties; here they are
//! one plain struct the editor holds and consults on every edit.

use serde::{Deserialize, Serialize};

use crate::layout::{TextAlignment, TextWrapping};

/// Case transformation applied to typed characters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CharacterCasing {
    #[default]
    Normal,
    Upper,
    Lower,
}

impl CharacterCasing {
    /// Apply the casing to one character. May expand (`ß` -> `SS`).
    pub fn apply(self, ch: char) -> CasedChars {
        match self {
            CharacterCasing::Normal => CasedChars::One(Some(ch)),
            CharacterCasing::Upper => CasedChars::Upper(ch.to_uppercase()),
            CharacterCasing::Lower => CasedChars::Lower(ch.to_lowercase()),
        }
    }
}

/// Iterator over the characters produced by [`CharacterCasing::apply`]
pub enum CasedChars {
    One(Option<char>),
    Upper(std::char::ToUppercase),
    Lower(std::char::ToLowercase),
}

impl Iterator for CasedChars {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        match self {
            CasedChars::One(ch) => ch.take(),
            CasedChars::Upper(it) => it.next(),
            CasedChars::Lower(it) => it.next(),
        }
    }
}

/// What an accepted Return key inserts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NewlineStyle {
    #[default]
    Lf,
    CrLf,
}

impl NewlineStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            NewlineStyle::Lf => "\n",
            NewlineStyle::CrLf => "\r\n",
        }
    }
}

/// Settings consulted by the edit operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditSettings {
    /// Block all user edits (navigation and copy still work)
    pub is_read_only: bool,

    /// Accept Return as a line break; otherwise it is dropped
    pub accepts_return: bool,

    /// Accept Tab; otherwise it becomes a space
    pub accepts_tab: bool,

    /// Maximum length in characters (None = unlimited)
    pub max_length: Option<usize>,

    pub casing: CharacterCasing,
    pub wrapping: TextWrapping,
    pub alignment: TextAlignment,
    pub newline: NewlineStyle,
}

impl Default for EditSettings {
    fn default() -> Self {
        Self {
            is_read_only: false,
            accepts_return: false,
            accepts_tab: false,
            max_length: None,
            casing: CharacterCasing::Normal,
            wrapping: TextWrapping::NoWrap,
            alignment: TextAlignment::Left,
            newline: NewlineStyle::Lf,
        }
    }
}

impl EditSettings {
    /// Single-line input (the default)
    pub fn single_line() -> Self {
        Self::default()
    }

    /// Multi-line text area: accepts Return and Tab, wraps
    pub fn multi_line() -> Self {
        Self {
            accepts_return: true,
            accepts_tab: true,
            wrapping: TextWrapping::Wrap,
            ..Self::default()
        }
    }

    /// Number of characters that may still be added to a buffer of `current_len`
    pub fn remaining_capacity(&self, current_len: usize) -> usize {
        match self.max_length {
            Some(max) => max.saturating_sub(current_len),
            None => usize::MAX,
        }
    }
}
