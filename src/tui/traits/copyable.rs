//! Copyable trait for components that provide clipboard content

use super::Component;

/// Components whose content can be copied with `y`
pub trait Copyable: Component {
    /// Human-readable text for the clipboard, or `None` when there is nothing to copy
    fn copy_text(&self) -> Option<String>;

    /// Short description for the confirmation toast
    fn copy_description(&self) -> String {
        self.id().label().to_string()
    }
}
