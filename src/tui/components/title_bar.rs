// Title bar component
//
// App name with the catalog size, and the frame rate on the right when
// enabled.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Left-hand title text
///
/// `source_len` is the number of distinct records, `rows` the generated
/// working set (source times scale).
pub fn title_text(source_len: usize, rows: usize) -> String {
    if rows == 0 {
        return " 📦 Stockpile".to_string();
    }
    if source_len == rows {
        format!(" 📦 Stockpile ──── {} items", rows)
    } else {
        format!(" 📦 Stockpile ──── {} items ({} unique)", rows, source_len)
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused_style());

    if app.show_fps {
        block = block.title_top(Line::from(format!(" {} ", app.fps.label())).right_aligned());
    }

    let title = Paragraph::new(title_text(app.screen.source_len(), app.screen.len()))
        .style(theme.title_style())
        .block(block);

    f.render_widget(title, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_mentions_unique_count_only_when_scaled() {
        assert_eq!(title_text(0, 0), " 📦 Stockpile");
        assert_eq!(title_text(12, 12), " 📦 Stockpile ──── 12 items");
        assert_eq!(
            title_text(12, 120),
            " 📦 Stockpile ──── 120 items (12 unique)"
        );
    }
}
