use vnst_dapp_core::{ClipboardPort, PortError};

/// System clipboard via `arboard`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl ClipboardPort for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), PortError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| PortError::Policy(format!("clipboard unavailable: {e}")))?;
        clipboard
            .set_text(text)
            .map_err(|e| PortError::Policy(format!("clipboard write failed: {e}")))
    }
}
