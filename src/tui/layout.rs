// Screen layout
//
// Breakpoints are the single source of truth for width thresholds. `split`
// turns the terminal area into the regions every frame draws into.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols: list and detail stacked
    Compact,
    /// 60-99 cols: side by side
    Normal,
    /// 100-139 cols
    Wide,
    /// 140+ cols
    UltraWide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            100..=139 => Breakpoint::Wide,
            _ => Breakpoint::UltraWide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
            Breakpoint::UltraWide => 3,
        }
    }

    /// Percentage of the body width given to the item list
    fn list_percent(&self) -> u16 {
        match self {
            Breakpoint::Compact => 100,
            Breakpoint::Normal => 55,
            Breakpoint::Wide => 60,
            Breakpoint::UltraWide => 65,
        }
    }
}

/// Regions of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub title: Rect,
    pub list: Rect,
    pub detail: Rect,
    pub logs: Option<Rect>,
    pub status: Rect,
}

/// Height of the logs strip when shown
const LOGS_HEIGHT: u16 = 8;

pub fn split(area: Rect, show_logs: bool) -> ScreenAreas {
    let logs_height = if show_logs { LOGS_HEIGHT } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(logs_height),
            Constraint::Length(2),
        ])
        .split(area);

    let bp = Breakpoint::from_width(area.width);
    let body = if bp.at_least(Breakpoint::Normal) {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(bp.list_percent()),
                Constraint::Percentage(100 - bp.list_percent()),
            ])
            .split(rows[1])
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(7)])
            .split(rows[1])
    };

    ScreenAreas {
        title: rows[0],
        list: body[0],
        detail: body[1],
        logs: show_logs.then_some(rows[2]),
        status: rows[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(59), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(60), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(99), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(100), Breakpoint::Wide);
        assert_eq!(Breakpoint::from_width(139), Breakpoint::Wide);
        assert_eq!(Breakpoint::from_width(140), Breakpoint::UltraWide);
    }

    #[test]
    fn at_least_comparisons() {
        let wide = Breakpoint::Wide;
        assert!(wide.at_least(Breakpoint::Compact));
        assert!(wide.at_least(Breakpoint::Normal));
        assert!(wide.at_least(Breakpoint::Wide));
        assert!(!wide.at_least(Breakpoint::UltraWide));
    }

    #[test]
    fn wide_terminal_puts_detail_beside_list() {
        let areas = split(Rect::new(0, 0, 120, 40), false);
        assert_eq!(areas.title.height, 3);
        assert_eq!(areas.status.height, 2);
        assert_eq!(areas.list.y, areas.detail.y);
        assert!(areas.list.width > areas.detail.width);
        assert_eq!(areas.list.height, 35);
        assert!(areas.logs.is_none());
    }

    #[test]
    fn narrow_terminal_stacks_detail_under_list() {
        let areas = split(Rect::new(0, 0, 50, 40), true);
        assert_eq!(areas.list.x, areas.detail.x);
        assert!(areas.detail.y > areas.list.y);
        assert_eq!(areas.logs.map(|r| r.height), Some(LOGS_HEIGHT));
    }
}
