//! Host clipboard access.

use anyhow::{Result, anyhow};

/// Somewhere message text can be copied to.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard, backed by `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    /// Opens the system clipboard. Fails on hosts without one (e.g. headless Linux).
    pub fn new() -> Result<Self> {
        let inner =
            arboard::Clipboard::new().map_err(|e| anyhow!("Clipboard unavailable: {e}"))?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text.to_owned())
            .map_err(|e| anyhow!("Failed to copy to clipboard: {e}"))
    }
}
