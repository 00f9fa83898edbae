//! Clipboard helper
//!
//! Uses `arboard` for cross-platform support. The clipboard is opened fresh
//! for each copy so nothing is held between key presses.

use super::traits::Copyable;
use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard
///
/// Common failure cases: no display server (headless Linux), permission denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

/// Copy a component's content and describe the outcome for a toast
pub fn copy_component(component: &dyn Copyable) -> String {
    let Some(text) = component.copy_text() else {
        return format!("Nothing to copy from {}", component.id().label());
    };

    match copy_to_clipboard(&text) {
        Ok(()) => {
            tracing::debug!("Copied {} bytes from {}", text.len(), component.id().label());
            format!("📋 Copied {}", component.copy_description())
        }
        Err(e) => {
            tracing::warn!("Clipboard copy failed: {:#}", e);
            "Clipboard unavailable".to_string()
        }
    }
}
