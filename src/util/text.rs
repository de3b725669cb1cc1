//! Character classification for token selection

/// Check if a character is punctuation or a symbol.
///
/// Covers ASCII punctuation plus the common Unicode punctuation blocks.
pub fn is_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation()
        || matches!(
            ch,
            '¡' | '¿' | '«' | '»' | '§' | '¶' | '·'
                | '\u{2010}'..='\u{2027}'
                | '\u{2030}'..='\u{205E}'
                | '\u{3001}'..='\u{3003}'
                | '\u{3008}'..='\u{3011}'
        )
}

/// Character class used when selecting the token under the caret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    /// Punctuation and symbols
    Punctuation,
    /// Whitespace characters, line breaks included
    Whitespace,
    /// Everything else
    WordChar,
}

/// Classify by punctuation, then whitespace, else word
pub fn char_type(ch: char) -> CharType {
    if is_punctuation(ch) {
        CharType::Punctuation
    } else if ch.is_whitespace() {
        CharType::Whitespace
    } else {
        CharType::WordChar
    }
}
