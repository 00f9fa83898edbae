//! Item list component
//!
//! Draws only rows the viewport tracker has activated and that fall inside
//! the physical viewport. Dormant rows cost nothing per frame: they are
//! never formatted. Each row is placed by its own layout position, so what
//! is on screen always agrees with what the tracker published.

use super::scrollbar::render_scrollbar_raw;
use crate::list::{DetailView, RowHandle};
use crate::screen::InventoryScreen;
use crate::tui::traits::RenderContext;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of the right-aligned stat column
const STAT_WIDTH: usize = 5;

/// Block drawn around the list; callers use its inner area as the viewport
pub fn block<'a>(ctx: &RenderContext, title: String) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(ctx.theme.border_focused_style())
        .title(title)
}

/// Truncate or pad `text` to exactly `width` terminal columns
pub fn fit_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        let pad = width - text.width();
        return format!("{}{}", text, " ".repeat(pad));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// One formatted row: icon, name, right-aligned stat
pub fn row_line(row: &RowHandle, ctx: &RenderContext, width: u16) -> Line<'static> {
    let record = row.record();
    let icon = ctx.icons.resolve(record.icon_index);
    let icon_cell = fit_width(icon, 2);
    let name_width = (width as usize).saturating_sub(icon_cell.width() + 2 + STAT_WIDTH);

    let line = Line::from(vec![
        Span::raw(" "),
        Span::raw(icon_cell),
        Span::raw(" "),
        Span::raw(fit_width(&record.name, name_width)),
        Span::styled(
            format!("{:>width$}", record.stat, width = STAT_WIDTH),
            Style::default().fg(ctx.theme.stat),
        ),
    ]);

    if row.is_selected() {
        line.style(ctx.theme.selected_style())
    } else {
        line.style(Style::default().fg(ctx.theme.fg))
    }
}

/// Screen lines for the current viewport, indexed from the viewport top
pub fn viewport_lines<D: DetailView + 'static>(
    screen: &InventoryScreen<D>,
    ctx: &RenderContext,
    area: Rect,
) -> Vec<Line<'static>> {
    let height = area.height as usize;
    let mut lines: Vec<Line<'static>> = vec![Line::default(); height];
    let offset = screen.offset();

    for row in screen.visible_rows() {
        let top = row.position().abs() - offset;
        let first = top.floor().max(0.0) as usize;
        let last = ((top + row.height()).ceil().max(0.0) as usize).min(height);

        for (line_index, slot) in lines.iter_mut().enumerate().take(last).skip(first) {
            *slot = if line_index == first {
                row_line(row, ctx, area.width)
            } else if row.is_selected() {
                Line::from(" ".repeat(area.width as usize)).style(ctx.theme.selected_style())
            } else {
                Line::default()
            };
        }
    }

    lines
}

pub fn render<D: DetailView + 'static>(
    f: &mut Frame,
    area: Rect,
    screen: &InventoryScreen<D>,
    ctx: &RenderContext,
) {
    let title = format!(" Inventory ({}) ", screen.len());
    let block = block(ctx, title);
    let inner = block.inner(area);

    let lines = if screen.is_finalized() {
        viewport_lines(screen, ctx, inner)
    } else {
        vec![Line::from(Span::styled(
            " Laying out…",
            Style::default().fg(ctx.theme.muted),
        ))]
    };

    f.render_widget(Paragraph::new(lines).style(ctx.theme.base_style()).block(block), area);

    render_scrollbar_raw(
        f,
        inner,
        screen.content_height().ceil() as usize,
        inner.height as usize,
        screen.offset().round() as usize,
    );
}
