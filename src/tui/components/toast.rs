//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses after a fixed duration.
//! Renders in the bottom-right corner on top of all other content.

use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// How long a toast stays up
const TOAST_DURATION: Duration = Duration::from_secs(2);

/// A toast notification that auto-dismisses
#[derive(Debug)]
pub struct Toast {
    pub message: String,
    created_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self::at(message, Instant::now())
    }

    fn at(message: impl Into<String>, created_at: Instant) -> Self {
        Self {
            message: message.into(),
            created_at,
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= TOAST_DURATION
    }

    /// Placement inside `area`: bottom-right, two cells in from each edge
    pub fn area(&self, area: Rect) -> Rect {
        // 2 cells of padding plus the border on each side
        let width = (self.message.width() as u16 + 4).min(area.width.saturating_sub(4));
        let height = 3;

        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        Rect::new(x, y, width, height)
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let toast_area = self.area(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.highlight))
            .style(Style::default().bg(theme.bg));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.fg))
            .block(block);

        // Clear first so the toast sits on top
        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_duration() {
        let start = Instant::now();
        let toast = Toast::at("Copied", start);
        assert!(!toast.is_expired_at(start + Duration::from_millis(1999)));
        assert!(toast.is_expired_at(start + TOAST_DURATION));
    }

    #[test]
    fn sits_in_bottom_right_corner() {
        let toast = Toast::at("📋 Copied", Instant::now());
        let area = toast.area(Rect::new(0, 0, 80, 24));
        // "📋" is two columns wide
        assert_eq!(area.width, 13);
        assert_eq!(area.right(), 78);
        assert_eq!(area.bottom(), 22);
    }
}
