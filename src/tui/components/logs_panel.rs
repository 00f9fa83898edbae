//! Logs panel component
//!
//! Tails the in-memory log buffer. The panel shares the buffer with the
//! tracing layer, so it always shows the newest entries without any sync
//! step.

use crate::logging::{LogBuffer, LogEntry};
use crate::tui::theme::Theme;
use crate::tui::traits::{Component, ComponentId, Copyable, RenderContext};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Entries copied with `Y`
const COPY_TAIL: usize = 50;

pub struct LogsPanel {
    buffer: LogBuffer,
}

impl LogsPanel {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

/// Format a single entry for display
pub fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.short_target(),
        entry.message
    )
}

/// Entry colored by level; problems are bold
pub fn entry_line(entry: &LogEntry, theme: &Theme) -> Line<'static> {
    let mut style = theme.log_style(entry.level);
    if entry.level.is_problem() {
        style = style.add_modifier(Modifier::BOLD);
    }
    Line::from(Span::styled(format_log_entry(entry), style))
}

impl Component for LogsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Logs
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let visible = area.height.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .buffer
            .recent(visible)
            .iter()
            .map(|entry| ListItem::new(entry_line(entry, ctx.theme)))
            .collect();

        let title = format!(" System Logs ({}) ", self.buffer.len());
        let list = List::new(items).style(ctx.theme.base_style()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(ctx.theme.border_style())
                .title(title),
        );

        f.render_widget(list, area);
    }
}

impl Copyable for LogsPanel {
    fn copy_text(&self) -> Option<String> {
        let entries = self.buffer.recent(COPY_TAIL);
        if entries.is_empty() {
            return None;
        }
        Some(
            entries
                .iter()
                .map(format_log_entry)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use chrono::{TimeZone, Utc};

    fn entry(level: LogLevel, message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 5).unwrap(),
            level,
            target: "stockpile::screen".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn formats_time_level_and_short_target() {
        assert_eq!(
            format_log_entry(&entry(LogLevel::Info, "Inventory ready")),
            "[09:30:05] INFO  screen: Inventory ready"
        );
    }

    #[test]
    fn problems_are_bold() {
        let theme = Theme::default();
        let warn = entry_line(&entry(LogLevel::Warn, "x"), &theme);
        let info = entry_line(&entry(LogLevel::Info, "x"), &theme);
        assert!(warn.spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert!(!info.spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(info.spans[0].style.fg, Some(theme.log_info));
    }

    #[test]
    fn copies_recent_entries_oldest_first() {
        let buffer = LogBuffer::new();
        let panel = LogsPanel::new(buffer.clone());
        assert!(panel.copy_text().is_none());

        buffer.add(entry(LogLevel::Info, "first"));
        buffer.add(entry(LogLevel::Error, "second"));
        let text = panel.copy_text().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("first"));
        assert!(lines[1].ends_with("second"));
        assert_eq!(panel.copy_description(), "logs");
    }
}
