// UI rendering
//
// `draw` runs once per frame. Before anything is drawn it hands the list's
// inner height to the screen as its layout pass, so the tracker always works
// with the viewport the user actually sees.

use super::app::App;
use super::components::{item_list, status_bar, title_bar};
use super::layout;
use super::traits::{Component, RenderContext};
use ratatui::{style::Style, widgets::Block, Frame};
use std::time::Instant;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let areas = layout::split(f.area(), app.show_logs);

    let list_inner = item_list::block(&RenderContext::new(&app.theme, &app.icons), String::new())
        .inner(areas.list);
    if let Err(e) = app.screen.layout_pass(f32::from(list_inner.height)) {
        tracing::warn!("Layout pass failed: {}", e);
    }
    app.list_area = Some(list_inner);

    let bg_block = Block::default().style(Style::default().bg(app.theme.bg));
    f.render_widget(bg_block, f.area());

    let ctx = RenderContext::new(&app.theme, &app.icons);

    title_bar::render(f, areas.title, app);
    item_list::render(f, areas.list, &app.screen, &ctx);
    app.screen
        .selection()
        .detail()
        .render(f, areas.detail, &ctx);

    if let Some(logs_area) = areas.logs {
        app.logs_panel.render(f, logs_area, &ctx);
    }

    status_bar::render(f, areas.status, app);

    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }

    app.fps.frame(Instant::now());
}
