use parking_lot::Mutex;

use crate::domain::ClipboardError;

/// Write-only clipboard capability used by the tooltip's copy rows.
pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The OS clipboard, via arboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;
        Ok(())
    }
}

/// In-process clipboard for headless hosts and tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    history: Mutex<Vec<String>>,
    reject: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that refuses every write, as a denied permission would.
    pub fn rejecting() -> Self {
        Self {
            history: Mutex::new(Vec::new()),
            reject: true,
        }
    }

    pub fn last(&self) -> Option<String> {
        self.history.lock().last().cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.reject {
            return Err(ClipboardError::WriteFailed("permission denied".into()));
        }
        self.history.lock().push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_records_writes() {
        let clipboard = MemoryClipboard::new();
        clipboard.write_text("a").unwrap();
        clipboard.write_text("b").unwrap();
        assert_eq!(clipboard.history(), vec!["a", "b"]);
        assert_eq!(clipboard.last().as_deref(), Some("b"));
    }

    #[test]
    fn rejecting_clipboard_fails() {
        let clipboard = MemoryClipboard::rejecting();
        assert!(matches!(
            clipboard.write_text("a"),
            Err(ClipboardError::WriteFailed(_))
        ));
        assert!(clipboard.last().is_none());
    }
}
