// TUI application state
//
// Owns the inventory screen, the idle queue that runs its deferred work,
// and the UI toggles (theme, logs strip, FPS). Input handling in `tui::mod`
// translates keys into the methods here.

use super::clipboard;
use super::components::{DetailPanel, LogsPanel, Toast};
use super::fps::FrameCounter;
use super::theme::{Theme, ThemeKind};
use super::traits::Copyable;
use crate::catalog::icons::IconLookup;
use crate::catalog::ItemRecord;
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::screen::{InventoryScreen, ScreenError, ScreenSettings};
use crate::viewport::IdleQueue;
use ratatui::layout::Rect;
use std::time::Instant;

/// Lines moved per mouse wheel notch
pub const WHEEL_STEP: f32 = 3.0;

pub type Screen = InventoryScreen<DetailPanel>;

/// Main application state for the TUI
pub struct App {
    pub screen: Screen,

    /// Deferred work for the screen, drained on every tick
    idle: IdleQueue<Screen>,

    pub icons: IconLookup,

    pub theme_kind: ThemeKind,
    pub theme: Theme,

    /// Shared with the tracing layer
    pub log_buffer: LogBuffer,
    pub logs_panel: LogsPanel,
    pub show_logs: bool,

    pub show_fps: bool,
    pub fps: FrameCounter,

    pub toast: Option<Toast>,

    pub should_quit: bool,

    /// Inner list area of the last frame, for mouse hit testing
    pub list_area: Option<Rect>,
}

impl App {
    /// Build the screen from `source` and queue its first finalize.
    pub fn new(
        config: &Config,
        source: &[ItemRecord],
        log_buffer: LogBuffer,
    ) -> Result<Self, ScreenError> {
        let mut screen = InventoryScreen::new(ScreenSettings::from(config), DetailPanel::new());
        let mut idle = IdleQueue::new();
        screen.init(source)?;
        screen.schedule_finalize(&mut idle);

        let theme_kind = ThemeKind::from_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme '{}', using Dark", config.theme);
            ThemeKind::default()
        });

        Ok(Self {
            screen,
            idle,
            icons: IconLookup::new(config.icons.clone()),
            theme_kind,
            theme: theme_kind.theme(),
            logs_panel: LogsPanel::new(log_buffer.clone()),
            log_buffer,
            show_logs: false,
            show_fps: config.show_fps,
            fps: FrameCounter::new(config.fps.refresh_interval_secs, Instant::now()),
            toast: None,
            should_quit: false,
            list_area: None,
        })
    }

    /// Idle tick: run queued work and expire the toast
    pub fn on_tick(&mut self, now: Instant) {
        if !self.idle.is_empty() {
            match self.idle.run_pending(&mut self.screen) {
                Ok(0) => {}
                Ok(ran) => tracing::debug!("Ran {} deferred task(s)", ran),
                Err(e) => tracing::error!("Deferred task failed: {:#}", e),
            }
        }

        if self.toast.as_ref().is_some_and(|t| t.is_expired_at(now)) {
            self.toast = None;
        }
    }

    #[cfg(test)]
    pub fn pending_tasks(&self) -> usize {
        self.idle.len()
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn cycle_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = self.theme_kind.theme();
        self.show_toast(format!("Theme: {}", self.theme_kind.name()));
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    pub fn select_next(&mut self) {
        self.screen.select_next();
    }

    pub fn select_previous(&mut self) {
        self.screen.select_previous();
    }

    pub fn select_first(&mut self) {
        self.screen.select_index(0);
    }

    pub fn select_last(&mut self) {
        if let Some(last) = self.screen.len().checked_sub(1) {
            self.screen.select_index(last);
        }
    }

    /// Scroll without moving the selection
    pub fn scroll_by(&mut self, delta: f32) {
        if let Err(e) = self.screen.scroll_by(delta) {
            tracing::debug!("Scroll ignored: {}", e);
        }
    }

    pub fn page_down(&mut self) {
        self.scroll_by(self.screen.viewport_height().max(1.0));
    }

    pub fn page_up(&mut self) {
        self.scroll_by(-self.screen.viewport_height().max(1.0));
    }

    /// Mouse click at terminal cell (`column`, `row`)
    pub fn click_at(&mut self, column: u16, row: u16) -> bool {
        let Some(area) = self.list_area else {
            return false;
        };
        let inside = column >= area.x
            && column < area.right()
            && row >= area.y
            && row < area.bottom();
        inside && self.screen.click_line(row - area.y)
    }

    /// Copy the selected record
    pub fn copy_detail(&mut self) {
        let message = {
            let selection = self.screen.selection();
            clipboard::copy_component(selection.detail() as &dyn Copyable)
        };
        self.show_toast(message);
    }

    pub fn copy_logs(&mut self) {
        let message = clipboard::copy_component(&self.logs_panel);
        self.show_toast(message);
    }

    /// Tear the list down and build it again from the loaded source
    pub fn repopulate(&mut self) {
        match self.screen.repopulate(&mut self.idle) {
            Ok(rows) => self.show_toast(format!("Rebuilt {} rows", rows)),
            Err(e) => {
                tracing::error!("Repopulate failed: {}", e);
                self.show_toast("Rebuild failed");
            }
        }
    }
}
