//! System clipboard sink backed by `arboard`.

use arboard::Clipboard;
use snipnote_core::{ClipboardError, ClipboardSink};

/// How long copied text must outlive the write call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    /// Text is served while this process runs (interactive shell).
    Session,
    /// Write blocks until another owner replaces the clipboard contents.
    ///
    /// On X11/Wayland the copying process owns the selection, so a one-shot
    /// command has to keep serving it; elsewhere this equals `Session`.
    UntilReplaced,
}

/// Opens the platform clipboard on first use and keeps it for the session.
pub struct SystemClipboard {
    inner: Option<Clipboard>,
    retention: Retention,
}

impl SystemClipboard {
    pub fn new(retention: Retention) -> Self {
        Self {
            inner: None,
            retention,
        }
    }

    pub fn retention(&self) -> Retention {
        self.retention
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new().map_err(unavailable)?,
        };
        let clipboard = self.inner.insert(clipboard);
        match self.retention {
            Retention::Session => clipboard.set_text(text.to_string()).map_err(unavailable),
            Retention::UntilReplaced => set_text_until_replaced(clipboard, text),
        }
    }
}

#[cfg(target_os = "linux")]
fn set_text_until_replaced(clipboard: &mut Clipboard, text: &str) -> Result<(), ClipboardError> {
    use arboard::SetExtLinux;

    clipboard
        .set()
        .wait()
        .text(text.to_string())
        .map_err(unavailable)
}

#[cfg(not(target_os = "linux"))]
fn set_text_until_replaced(clipboard: &mut Clipboard, text: &str) -> Result<(), ClipboardError> {
    clipboard.set_text(text.to_string()).map_err(unavailable)
}

fn unavailable(err: arboard::Error) -> ClipboardError {
    ClipboardError::Unavailable(err.to_string())
}
