//! Token stream: buffer text split into shaping units.
//!
//! There is no inline markup; every character is literal. Line breaks
//! (`\r\n`, `\n`, lone `\r`) are single tokens so CRLF stays indivisible.

/// Kind of a shaping unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Run of non-whitespace characters
    Word,
    /// Run of whitespace other than line breaks
    Whitespace,
    /// One hard line break
    LineBreak,
}

/// A token covering `start..start + len` in character offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub len: usize,
}

impl Token {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Parsed form of one buffer version
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    version: u64,
    chars: Vec<char>,
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Parse `text`, tagging the result with the buffer `version` it came from
    pub fn parse(text: &str, version: u64) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let start = i;
            let kind = match chars[i] {
                '\r' => {
                    i += if chars.get(i + 1) == Some(&'\n') { 2 } else { 1 };
                    TokenKind::LineBreak
                }
                '\n' => {
                    i += 1;
                    TokenKind::LineBreak
                }
                c if c.is_whitespace() => {
                    while i < chars.len() && is_inline_space(chars[i]) {
                        i += 1;
                    }
                    TokenKind::Whitespace
                }
                _ => {
                    while i < chars.len() && !chars[i].is_whitespace() {
                        i += 1;
                    }
                    TokenKind::Word
                }
            };
            tokens.push(Token {
                kind,
                start,
                len: i - start,
            });
        }

        Self {
            version,
            chars,
            tokens,
        }
    }

    /// Buffer version this stream was parsed from
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn char_count(&self) -> usize {
        self.chars.len()
    }
}

fn is_inline_space(c: char) -> bool {
    c.is_whitespace() && c != '\r' && c != '\n'
}
