//! Clipboard access for cut/copy/paste.

/// Text clipboard the editor reads and writes
pub trait Clipboard {
    fn get_text(&mut self) -> Option<String>;
    fn set_text(&mut self, text: &str);
}

/// The operating system clipboard via arboard.
///
/// A fresh handle is opened per call; failures (no display, locked
/// clipboard) are logged and treated as an empty clipboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => clipboard.get_text().ok(),
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {}", e);
                None
            }
        }
    }

    fn set_text(&mut self, text: &str) {
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(text) {
                    tracing::warn!("Failed to write clipboard: {}", e);
                }
            }
            Err(e) => tracing::warn!("Clipboard unavailable: {}", e),
        }
    }
}

/// Process-local clipboard, for headless use and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.get_text(), None);
        clipboard.set_text("copied");
        assert_eq!(clipboard.get_text().as_deref(), Some("copied"));
        assert_eq!(clipboard.contents(), Some("copied"));
    }
}
