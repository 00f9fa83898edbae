// Status bar component
//
// Row counts, scroll position and the published range at the bottom of the
// screen. Narrow terminals get the short form.

use crate::list::DetailView;
use crate::screen::InventoryScreen;
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Status line for `screen`
///
/// `problems` is the number of captured warnings and errors.
pub fn status_text<D: DetailView + 'static>(
    screen: &InventoryScreen<D>,
    theme_name: &str,
    problems: usize,
    bp: Breakpoint,
) -> String {
    let warn_info = if problems > 0 {
        format!(" │ ⚠ {}", problems)
    } else {
        String::new()
    };

    let Some(range) = screen.current_range().filter(|_| screen.is_finalized()) else {
        return format!(" {} rows │ laying out…{}", screen.len(), warn_info);
    };

    if !bp.at_least(Breakpoint::Wide) {
        return format!(
            " {} rows │ {} active │ ↕ {:.0}{}",
            screen.len(),
            screen.active_count(),
            screen.offset(),
            warn_info
        );
    }

    let selected = match screen.selected_index() {
        Some(index) => format!("#{}", index + 1),
        None => "none".to_string(),
    };

    format!(
        " {} rows │ {} active │ offset {:.1} │ range [{:.1}, {:.1}] │ selected {} │ {}{} │ q quit · t theme · l logs",
        screen.len(),
        screen.active_count(),
        screen.offset(),
        range.min,
        range.max,
        selected,
        theme_name,
        warn_info,
    )
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);
    let text = status_text(
        &app.screen,
        app.theme_kind.name(),
        app.log_buffer.problem_count(),
        bp,
    );

    let status = Paragraph::new(text)
        .style(app.theme.status_style())
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
