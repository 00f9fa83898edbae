//! Scrollbar rendering helper
//!
//! The list scrolls in fractional lines; callers round before handing the
//! values over, the bar only needs whole cells.

use ratatui::{
    layout::Rect,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Thumb state for a viewport of `viewport` lines over `total` lines
///
/// Returns `None` when everything fits and no bar should be drawn.
pub fn scrollbar_state(total: usize, viewport: usize, offset: usize) -> Option<ScrollbarState> {
    if total <= viewport {
        return None;
    }

    // ScrollbarState wants: content_length (how much can scroll) and position
    let content_length = total.saturating_sub(viewport);
    Some(ScrollbarState::new(content_length).position(offset.min(content_length)))
}

/// Render a minimal vertical scrollbar on the right edge of `area`
///
/// * `total` - Total number of lines of content
/// * `viewport` - Visible lines
/// * `offset` - Current scroll position
pub fn render_scrollbar_raw(f: &mut Frame, area: Rect, total: usize, viewport: usize, offset: usize) {
    let Some(mut state) = scrollbar_state(total, viewport, offset) else {
        return;
    };

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None);

    f.render_stateful_widget(scrollbar, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_bar_when_content_fits() {
        assert!(scrollbar_state(10, 10, 0).is_none());
        assert!(scrollbar_state(3, 10, 0).is_none());
    }

    #[test]
    fn offset_is_clamped_to_scrollable_length() {
        let state = scrollbar_state(100, 20, 500).unwrap();
        assert_eq!(state, ScrollbarState::new(80).position(80));
    }
}
