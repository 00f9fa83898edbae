// Inventory screen - composes the list core into one host object
//
// The screen owns every collaborator of the inventory list: the viewport
// tracker, the stack container, the row factory, the list controller and the
// selection controller. Front ends (the TUI and the headless runner) drive it
// through a small surface: init, layout, scroll, select.
//
// Startup handshake:
//   init(source)        rows created, first row selected, all rows dormant
//   layout_pass(h)      real viewport height applied, rows positioned
//   <idle tick>         queued finalize freezes layout and publishes offset 0

use crate::catalog::{generate, CatalogError, ItemRecord};
use crate::config::Config;
use crate::list::{
    DetailView, ListController, RowContainer, RowHandle, RowTemplate, SelectionController,
    StackContainer, TemplateRowFactory,
};
use crate::viewport::{IdleQueue, TrackerError, ViewportRangeTracker, VisibleRange};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// Why the screen could not be built
#[derive(Debug)]
pub enum ScreenError {
    /// The working set could not be generated
    Catalog(CatalogError),
    /// The viewport geometry was rejected
    Viewport(TrackerError),
}

impl fmt::Display for ScreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(e) => write!(f, "{}", e),
            Self::Viewport(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ScreenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(e) => Some(e),
            Self::Viewport(e) => Some(e),
        }
    }
}

impl From<CatalogError> for ScreenError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

impl From<TrackerError> for ScreenError {
    fn from(e: TrackerError) -> Self {
        Self::Viewport(e)
    }
}

/// Geometry and repetition settings for the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSettings {
    pub scale: u32,
    pub buffer: f32,
    /// Viewport assumed until the first layout pass reports the real one
    pub viewport_height: f32,
    pub row_height: u16,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            scale: 10,
            buffer: 8.0,
            viewport_height: 24.0,
            row_height: 1,
        }
    }
}

impl From<&Config> for ScreenSettings {
    fn from(config: &Config) -> Self {
        Self {
            scale: config.scale,
            buffer: config.buffer,
            viewport_height: config.viewport_height,
            row_height: config.row_height,
        }
    }
}

pub struct InventoryScreen<D: DetailView + 'static> {
    settings: ScreenSettings,
    source: Vec<ItemRecord>,
    tracker: ViewportRangeTracker,
    container: StackContainer,
    factory: TemplateRowFactory,
    list: ListController,
    selection: Rc<RefCell<SelectionController<D>>>,
    viewport_height: f32,
}

impl<D: DetailView + 'static> InventoryScreen<D> {
    pub fn new(settings: ScreenSettings, detail: D) -> Self {
        let template = RowTemplate {
            height: f32::from(settings.row_height.max(1)),
        };
        Self {
            settings,
            source: Vec::new(),
            tracker: ViewportRangeTracker::new(),
            container: StackContainer::new(),
            factory: TemplateRowFactory::new(template),
            list: ListController::new(),
            selection: Rc::new(RefCell::new(SelectionController::new(detail))),
            viewport_height: settings.viewport_height.max(0.0),
        }
    }

    fn template(&self) -> RowTemplate {
        RowTemplate {
            height: f32::from(self.settings.row_height.max(1)),
        }
    }

    /// Generate the working set from `source`, create the rows and select
    /// the first one. Rows stay dormant until the finalize task has run.
    ///
    /// Returns the number of rows created. A bad source, scale, viewport
    /// height or buffer is an error and leaves any existing list in place.
    pub fn init(&mut self, source: &[ItemRecord]) -> Result<usize, ScreenError> {
        let catalog = generate(source, self.settings.scale)?;
        self.tracker
            .configure(self.viewport_height, self.settings.buffer)?;

        if !self.list.is_empty() {
            self.teardown();
        }
        self.source = source.to_vec();
        self.factory.restore_template(self.template());

        let first = self.list.populate(
            Some(catalog.as_slice()),
            &mut self.factory,
            Some(&mut self.container as &mut dyn RowContainer),
            &mut self.tracker,
            &self.selection,
        );

        if let Some(first) = first {
            first.click();
        }

        tracing::info!(
            "Inventory ready: {} rows ({} records x {})",
            self.list.len(),
            source.len(),
            self.settings.scale
        );
        Ok(self.list.len())
    }

    /// Queue the post-layout finalize for the next idle tick.
    ///
    /// Returns false when there is no populated list to finalize.
    pub fn schedule_finalize(&self, queue: &mut IdleQueue<Self>) -> bool {
        let Some(liveness) = self.list.liveness() else {
            tracing::warn!("Nothing to finalize: list is not populated");
            return false;
        };
        queue.schedule("finalize_layout", liveness, |screen: &mut Self| {
            screen.finalize().map(|_| ()).map_err(anyhow::Error::from)
        });
        true
    }

    /// Freeze the layout and publish the initial range
    pub fn finalize(&mut self) -> Result<VisibleRange, TrackerError> {
        // Settle positions against whatever viewport is current
        self.container.layout_pass();
        let range = self.tracker.finalize_after_layout(&mut self.container)?;
        tracing::debug!(
            "Initial range [{}, {}], {} rows active",
            range.min,
            range.max,
            self.list.active_count()
        );
        Ok(range)
    }

    /// Apply the physical viewport height and lay rows out.
    ///
    /// Once finalized, a changed height republishes the range at the current
    /// (re-clamped) offset.
    pub fn layout_pass(&mut self, viewport_height: f32) -> Result<(), TrackerError> {
        let height = viewport_height.max(0.0);
        let changed = (height - self.viewport_height).abs() > f32::EPSILON;
        self.viewport_height = height;

        if changed || !self.tracker.is_configured() {
            self.tracker.configure(height, self.settings.buffer)?;
        }
        self.container.layout_pass();

        if changed && self.tracker.is_finalized() {
            let offset = self.clamp_offset(self.tracker.offset());
            self.tracker.on_scroll(offset)?;
        }
        Ok(())
    }

    /// Largest offset that still fills the viewport
    pub fn max_offset(&self) -> f32 {
        (self.container.content_height() - self.viewport_height).max(0.0)
    }

    fn clamp_offset(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.max_offset())
    }

    /// Scroll to `offset`, clamped to the content.
    ///
    /// Rejected until the finalize task has run so no row activates against
    /// an unsettled layout.
    pub fn scroll_to(&mut self, offset: f32) -> Result<VisibleRange, TrackerError> {
        if !self.tracker.is_finalized() {
            return Err(TrackerError::NotFinalized);
        }
        let offset = self.clamp_offset(offset);
        self.tracker.on_scroll(offset)
    }

    pub fn scroll_by(&mut self, delta: f32) -> Result<VisibleRange, TrackerError> {
        self.scroll_to(self.tracker.offset() + delta)
    }

    /// Select the row at `index` as if it had been clicked
    pub fn select_index(&mut self, index: usize) -> bool {
        let Some(row) = self.list.row(index).cloned() else {
            return false;
        };
        let clicked = row.click();
        if clicked {
            self.reveal(&row);
        }
        clicked
    }

    pub fn select_next(&mut self) -> bool {
        if self.list.is_empty() {
            return false;
        }
        let last = self.list.len() - 1;
        let next = self
            .selected_index()
            .map_or(0, |index| (index + 1).min(last));
        self.select_index(next)
    }

    pub fn select_previous(&mut self) -> bool {
        if self.list.is_empty() {
            return false;
        }
        let previous = self
            .selected_index()
            .map_or(0, |index| index.saturating_sub(1));
        self.select_index(previous)
    }

    /// Click whatever row sits at `line` lines below the top of the viewport.
    ///
    /// Dormant rows are not interactive.
    pub fn click_line(&mut self, line: u16) -> bool {
        let y = self.tracker.offset() + f32::from(line);
        let Some(row) = self.container.row_at(y).cloned() else {
            return false;
        };
        if !row.is_active() {
            tracing::debug!("Ignoring click on dormant row {}", row.index());
            return false;
        }
        row.click()
    }

    /// Scroll just enough for `row` to be fully inside the viewport.
    ///
    /// A row taller than the viewport is aligned to its top edge.
    fn reveal(&mut self, row: &RowHandle) {
        let top = row.position().abs();
        let bottom = top + row.height();
        let offset = self.tracker.offset();

        let target = if top < offset || row.height() > self.viewport_height {
            Some(top)
        } else if bottom > offset + self.viewport_height {
            Some(bottom - self.viewport_height)
        } else {
            None
        };

        if let Some(target) = target {
            if let Err(e) = self.scroll_to(target) {
                tracing::debug!("Could not reveal row {}: {}", row.index(), e);
            }
        }
    }

    /// Destroy every row and forget the selection.
    ///
    /// Deferred work queued for the torn-down rows will be skipped.
    pub fn teardown(&mut self) {
        self.selection.borrow_mut().clear();
        self.list
            .teardown(&mut self.factory, &mut self.container, &mut self.tracker);
        self.tracker.reset_finalization();
    }

    /// Rebuild the list from the last source and queue a new finalize
    pub fn repopulate(&mut self, queue: &mut IdleQueue<Self>) -> Result<usize, ScreenError> {
        let source = self.source.clone();
        self.teardown();
        let rows = self.init(&source)?;
        self.schedule_finalize(queue);
        Ok(rows)
    }

    /// Rows that are active and at least partly inside the physical viewport
    pub fn visible_rows(&self) -> impl Iterator<Item = &RowHandle> + '_ {
        let top = self.tracker.offset();
        let bottom = top + self.viewport_height;
        self.list.rows().iter().filter(move |row| {
            let y = row.position().abs();
            row.is_active() && y + row.height() > top && y < bottom
        })
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[RowHandle] {
        self.list.rows()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn active_count(&self) -> usize {
        self.list.active_count()
    }

    pub fn offset(&self) -> f32 {
        self.tracker.offset()
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn content_height(&self) -> f32 {
        self.container.content_height()
    }

    pub fn current_range(&self) -> Option<VisibleRange> {
        self.tracker.current_range()
    }

    pub fn is_finalized(&self) -> bool {
        self.tracker.is_finalized()
    }

    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.borrow().selected_index()
    }

    pub fn selected(&self) -> Option<RowHandle> {
        self.selection.borrow().selected()
    }

    /// Borrow the selection controller (and through it the detail view)
    pub fn selection(&self) -> Ref<'_, SelectionController<D>> {
        self.selection.borrow()
    }
}
