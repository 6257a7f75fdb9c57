use tracing::debug;

/// Capacity of the clipboard buffer, including room for a terminator on the
/// engine side. At most `CLIPBOARD_SIZE - 1` bytes are kept.
pub const CLIPBOARD_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardKind {
    Clipboard,
    Selection,
}

/// Process-local clipboard. The platform gives no access to the system one.
#[derive(Debug, Default, Clone)]
pub struct Clipboard {
    buffer: String,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text`, truncated to fit on a character boundary. Both kinds
    /// share one buffer.
    pub fn save(&mut self, _kind: ClipboardKind, text: &str) {
        let mut end = text.len().min(CLIPBOARD_SIZE - 1);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        if end < text.len() {
            debug!("Clipboard truncated {} bytes to {}", text.len(), end);
        }
        self.buffer.clear();
        self.buffer.push_str(&text[..end]);
    }

    pub fn paste(&self, _kind: ClipboardKind, callback: impl FnOnce(&str)) {
        callback(&self.buffer);
    }

    pub fn contents(&self) -> &str {
        &self.buffer
    }
}
