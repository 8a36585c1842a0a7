//! Clipboard access
//!
//! The app only ever writes to the clipboard.

use anyhow::{anyhow, Result};
use tracing::{debug, warn};

/// Destination for copied text
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard backed by `arboard`
///
/// The handle is opened on first use so a headless session only fails when
/// something is actually copied.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            match arboard::Clipboard::new() {
                Ok(clipboard) => self.inner = Some(clipboard),
                Err(e) => {
                    warn!("clipboard unavailable: {}", e);
                    return Err(anyhow!("Using the clipboard is not supported: {}", e));
                }
            }
        }

        let clipboard = self
            .inner
            .as_mut()
            .ok_or_else(|| anyhow!("clipboard unavailable"))?;
        clipboard.set_text(text)?;
        debug!(bytes = text.len(), "copied to clipboard");
        Ok(())
    }
}

/// Clipboard that remembers everything written to it
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct RecordingClipboard {
    pub copied: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
}

#[cfg(test)]
impl RecordingClipboard {
    pub fn last(&self) -> Option<String> {
        self.copied.borrow().last().cloned()
    }
}

#[cfg(test)]
impl Clipboard for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.copied.borrow_mut().push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_clipboard_shares_history() {
        let recorder = RecordingClipboard::default();
        let mut handle = recorder.clone();

        handle.set_text("one").unwrap();
        handle.set_text("two").unwrap();

        assert_eq!(recorder.last().as_deref(), Some("two"));
        assert_eq!(recorder.copied.borrow().len(), 2);
    }
}
