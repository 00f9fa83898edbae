//! Core component trait
//!
//! Every panel that owns state and draws itself implements `Component`.
//! Stateless chrome (title bar, status bar) stays as plain render functions.

use crate::catalog::icons::IconLookup;
use crate::tui::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Identity of a component, used in toasts and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// Selected item detail
    Detail,
    /// System logs strip
    Logs,
}

impl ComponentId {
    pub fn label(&self) -> &'static str {
        match self {
            ComponentId::Detail => "item detail",
            ComponentId::Logs => "logs",
        }
    }
}

/// Read-only context handed to components while rendering
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub icons: &'a IconLookup,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, icons: &'a IconLookup) -> Self {
        Self { theme, icons }
    }
}

pub trait Component {
    fn id(&self) -> ComponentId;

    /// Render into `area`. Rendering never mutates the component.
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}
