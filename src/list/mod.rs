//! Inventory list: row creation, wiring and teardown
//!
//! `ListController::populate` turns a catalog into rows. Every row is:
//!
//! 1. created from the factory's template,
//! 2. attached to the content container,
//! 3. subscribed to the viewport tracker (activation from its own position),
//! 4. bound to the selection controller (click → select),
//! 5. left unselected.
//!
//! The template is retired once population completes so it can never be
//! mistaken for a real row.

pub mod row;
pub mod selection;
pub mod stack;

pub use row::RowHandle;
pub use selection::{DetailView, SelectionController};
pub use stack::{RowTemplate, StackContainer, TemplateRowFactory};

use crate::catalog::ItemRecord;
use crate::viewport::{Delivery, LayoutSurface, Liveness, ViewportRangeTracker, VisibleRange};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Creates and destroys row representations
pub trait RowFactory {
    /// Create the row for `record` at list position `index`
    fn create(&mut self, index: usize, record: Rc<ItemRecord>)
        -> Result<RowHandle, RowFactoryError>;

    /// Destroy a row created by this factory
    fn destroy(&mut self, row: RowHandle);

    /// Permanently discard the template rows are created from
    fn retire_template(&mut self);
}

/// Holds the rows of the list and lays them out
pub trait RowContainer: LayoutSurface {
    fn attach(&mut self, row: &RowHandle);
    fn detach_all(&mut self);
    fn is_frozen(&self) -> bool;
}

/// Failure to create a single row
#[derive(Debug)]
pub enum RowFactoryError {
    /// The template was already retired
    TemplateRetired,
    /// Factory-specific failure
    Other(String),
}

impl fmt::Display for RowFactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemplateRetired => write!(f, "Row template has been retired"),
            Self::Other(msg) => write!(f, "Row creation failed: {}", msg),
        }
    }
}

impl std::error::Error for RowFactoryError {}

/// Owns the rows of the list for the duration of its display
#[derive(Debug, Default)]
pub struct ListController {
    rows: Vec<RowHandle>,
    liveness: Option<Liveness>,
}

impl ListController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and wire one row per catalog record.
    ///
    /// Returns the first row created so the caller can establish an initial
    /// selection. An absent catalog or container is logged and treated as a
    /// no-op. A row the factory fails to create is logged and skipped.
    /// Any rows from an earlier population are torn down first.
    pub fn populate<D: DetailView + 'static>(
        &mut self,
        catalog: Option<&[Rc<ItemRecord>]>,
        factory: &mut dyn RowFactory,
        container: Option<&mut dyn RowContainer>,
        tracker: &mut ViewportRangeTracker,
        selection: &Rc<RefCell<SelectionController<D>>>,
    ) -> Option<RowHandle> {
        let (Some(catalog), Some(container)) = (catalog, container) else {
            tracing::warn!("Cannot populate list: catalog and/or container is missing");
            return None;
        };

        if !self.rows.is_empty() {
            tracing::debug!("Repopulating list, tearing down {} rows", self.rows.len());
            self.teardown(factory, container, tracker);
        }
        if container.is_frozen() {
            tracing::warn!("Populating a container whose layout is still frozen");
        }

        self.rows.reserve(catalog.len());
        let mut skipped = 0;

        for (index, record) in catalog.iter().enumerate() {
            let row = match factory.create(index, Rc::clone(record)) {
                Ok(row) => row,
                Err(e) => {
                    skipped += 1;
                    tracing::warn!("Skipping row {} ('{}'): {}", index, record.name, e);
                    continue;
                }
            };

            container.attach(&row);

            let target = row.downgrade();
            let subscription = tracker.subscribe(Box::new(move |range: VisibleRange| {
                match target.upgrade() {
                    Some(row) => {
                        row.apply_range(range);
                        Delivery::Delivered
                    }
                    None => Delivery::Gone,
                }
            }));
            row.set_subscription(Some(subscription));

            let link = Rc::downgrade(selection);
            row.bind_click(Box::new(move |clicked: &RowHandle| {
                let Some(selection) = link.upgrade() else {
                    tracing::warn!("Row {} clicked after selection was dropped", clicked.index());
                    return;
                };
                match selection.try_borrow_mut() {
                    Ok(mut selection) => selection.select(Some(clicked)),
                    Err(_) => tracing::warn!(
                        "Ignoring re-entrant click on row {} during selection",
                        clicked.index()
                    ),
                };
            }));

            row.set_selected(false);
            self.rows.push(row);
        }

        factory.retire_template();
        self.liveness = Some(Liveness::new());

        tracing::debug!(
            "Populated {} rows ({} skipped) from {} records",
            self.rows.len(),
            skipped,
            catalog.len()
        );

        self.rows.first().cloned()
    }

    /// Unsubscribe, unbind and destroy every row, then empty the container.
    ///
    /// Drops the liveness token, so deferred work queued for this population
    /// will not run.
    pub fn teardown(
        &mut self,
        factory: &mut dyn RowFactory,
        container: &mut dyn RowContainer,
        tracker: &mut ViewportRangeTracker,
    ) {
        let count = self.rows.len();
        for row in self.rows.drain(..) {
            if let Some(id) = row.subscription() {
                tracker.unsubscribe(id);
                row.set_subscription(None);
            }
            row.unbind_click();
            row.set_selected(false);
            factory.destroy(row);
        }
        container.detach_all();
        self.liveness = None;
        tracing::debug!("Tore down {} rows", count);
    }

    pub fn rows(&self) -> &[RowHandle] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&RowHandle> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows currently active
    pub fn active_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_active()).count()
    }

    /// Token that lives exactly as long as the current population
    pub fn liveness(&self) -> Option<&Liveness> {
        self.liveness.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::selection::tests::RecordingDetail;
    use super::*;
    use crate::catalog::{generate, tests::record};

    struct Fixture {
        list: ListController,
        factory: TemplateRowFactory,
        container: StackContainer,
        tracker: ViewportRangeTracker,
        selection: Rc<RefCell<SelectionController<RecordingDetail>>>,
    }

    impl Fixture {
        fn new(viewport: f32, buffer: f32) -> Self {
            let mut tracker = ViewportRangeTracker::new();
            tracker.configure(viewport, buffer).unwrap();
            Self {
                list: ListController::new(),
                factory: TemplateRowFactory::new(RowTemplate::default()),
                container: StackContainer::new(),
                tracker,
                selection: Rc::new(RefCell::new(SelectionController::new(
                    RecordingDetail::default(),
                ))),
            }
        }

        fn populate(&mut self, catalog: &[Rc<ItemRecord>]) -> Option<RowHandle> {
            self.list.populate(
                Some(catalog),
                &mut self.factory,
                Some(&mut self.container),
                &mut self.tracker,
                &self.selection,
            )
        }
    }

    fn catalog(n: usize) -> Vec<Rc<ItemRecord>> {
        (0..n)
            .map(|i| Rc::new(record(&format!("r{}", i), i as i32)))
            .collect()
    }

    #[test]
    fn populate_creates_wired_rows_in_order() {
        let mut fx = Fixture::new(10.0, 0.0);
        let first = fx.populate(&catalog(5)).unwrap();

        assert_eq!(first.index(), 0);
        assert_eq!(fx.list.len(), 5);
        assert_eq!(fx.container.len(), 5);
        assert_eq!(fx.tracker.subscriber_count(), 5);
        assert!(fx.list.rows().iter().all(|r| r.subscription().is_some()));
        assert!(fx.list.rows().iter().all(|r| !r.is_selected()));
        let names: Vec<_> = fx.list.rows().iter().map(|r| r.record().name.clone()).collect();
        assert_eq!(names, vec!["r0", "r1", "r2", "r3", "r4"]);
    }

    #[test]
    fn populate_retires_the_template() {
        let mut fx = Fixture::new(10.0, 0.0);
        fx.populate(&catalog(2));
        assert!(!fx.factory.has_template());
        assert!(fx.list.liveness().is_some());
    }

    #[test]
    fn empty_catalog_returns_none() {
        let mut fx = Fixture::new(10.0, 0.0);
        assert!(fx.populate(&[]).is_none());
        assert!(fx.list.is_empty());
    }

    #[test]
    fn missing_collaborators_are_a_no_op() {
        let mut fx = Fixture::new(10.0, 0.0);
        let first = fx.list.populate(
            None,
            &mut fx.factory,
            Some(&mut fx.container),
            &mut fx.tracker,
            &fx.selection,
        );
        assert!(first.is_none());

        let records = catalog(3);
        let first = fx.list.populate(
            Some(records.as_slice()),
            &mut fx.factory,
            None,
            &mut fx.tracker,
            &fx.selection,
        );
        assert!(first.is_none());
        assert!(fx.list.is_empty());
        assert!(fx.factory.has_template());
        assert_eq!(fx.tracker.subscriber_count(), 0);
    }

    /// Factory that refuses to build selected indices
    struct FlakyFactory {
        inner: TemplateRowFactory,
        fail_on: Vec<usize>,
    }

    impl RowFactory for FlakyFactory {
        fn create(
            &mut self,
            index: usize,
            record: Rc<ItemRecord>,
        ) -> Result<RowHandle, RowFactoryError> {
            if self.fail_on.contains(&index) {
                return Err(RowFactoryError::Other(format!("bad row {}", index)));
            }
            self.inner.create(index, record)
        }

        fn destroy(&mut self, row: RowHandle) {
            self.inner.destroy(row);
        }

        fn retire_template(&mut self) {
            self.inner.retire_template();
        }
    }

    #[test]
    fn one_bad_row_does_not_abort_population() {
        let mut fx = Fixture::new(10.0, 0.0);
        let mut factory = FlakyFactory {
            inner: TemplateRowFactory::new(RowTemplate::default()),
            fail_on: vec![0, 2],
        };
        let records = catalog(4);
        let first = fx.list.populate(
            Some(records.as_slice()),
            &mut factory,
            Some(&mut fx.container),
            &mut fx.tracker,
            &fx.selection,
        );

        assert_eq!(fx.list.len(), 2);
        assert_eq!(first.map(|r| r.index()), Some(1));
        assert_eq!(fx.tracker.subscriber_count(), 2);
    }

    #[test]
    fn scrolling_activates_rows_from_their_positions() {
        let mut fx = Fixture::new(3.0, 1.0);
        fx.populate(&catalog(10));
        fx.container.layout_pass();

        fx.tracker.on_scroll(4.0).unwrap();
        let active: Vec<_> = fx
            .list
            .rows()
            .iter()
            .filter(|r| r.is_active())
            .map(|r| r.index())
            .collect();
        assert_eq!(active, vec![3, 4, 5, 6, 7, 8]);
        assert_eq!(fx.list.active_count(), 6);
    }

    #[test]
    fn finalize_activates_exactly_rows_within_buffered_viewport() {
        let mut fx = Fixture::new(5.0, 2.0);
        fx.populate(&catalog(20));
        fx.container.layout_pass();

        fx.tracker.finalize_after_layout(&mut fx.container).unwrap();
        let notifications = fx.tracker.notification_count();

        for row in fx.list.rows() {
            let magnitude = row.position().abs();
            let expected = (-2.0..=7.0).contains(&magnitude);
            assert_eq!(row.is_active(), expected, "row {}", row.index());
        }
        assert_eq!(notifications, 1);
        assert!(fx.container.is_frozen());
    }

    #[test]
    fn click_routes_to_selection() {
        let mut fx = Fixture::new(10.0, 0.0);
        fx.populate(&catalog(4));

        assert!(fx.list.row(0).unwrap().click());
        assert!(fx.list.row(3).unwrap().click());

        assert!(!fx.list.row(0).unwrap().is_selected());
        assert!(fx.list.row(3).unwrap().is_selected());
        assert_eq!(fx.selection.borrow().selected_index(), Some(3));
    }

    #[test]
    fn teardown_unsubscribes_and_kills_liveness() {
        let mut fx = Fixture::new(10.0, 0.0);
        fx.populate(&catalog(4));
        let guard = fx.list.liveness().unwrap().guard();
        let kept = fx.list.row(1).unwrap().clone();

        fx.list
            .teardown(&mut fx.factory, &mut fx.container, &mut fx.tracker);

        assert!(fx.list.is_empty());
        assert_eq!(fx.container.len(), 0);
        assert_eq!(fx.tracker.subscriber_count(), 0);
        assert_eq!(fx.factory.live_rows(), 0);
        assert!(!guard.is_alive());
        assert!(!kept.click());
    }

    #[test]
    fn repopulate_replaces_previous_rows() {
        let mut fx = Fixture::new(10.0, 0.0);
        fx.populate(&catalog(4));
        fx.factory.restore_template(RowTemplate::default());
        fx.populate(&catalog(2));

        assert_eq!(fx.list.len(), 2);
        assert_eq!(fx.container.len(), 2);
        assert_eq!(fx.tracker.subscriber_count(), 2);
    }

    #[test]
    fn three_records_scaled_twice_end_to_end() {
        let source = vec![record("r0", 0), record("r1", 1), record("r2", 2)];
        let catalog = generate(&source, 2).unwrap();
        let mut fx = Fixture::new(10.0, 0.0);
        fx.populate(&catalog);

        let names: Vec<_> = fx.list.rows().iter().map(|r| r.record().name.clone()).collect();
        assert_eq!(names, vec!["r0", "r1", "r2", "r0", "r1", "r2"]);

        fx.list.row(0).unwrap().click();
        fx.list.row(3).unwrap().click();

        assert!(!fx.list.row(0).unwrap().is_selected());
        assert!(fx.list.row(3).unwrap().is_selected());
        let selection = fx.selection.borrow();
        let shown = selection.detail().shown.last().unwrap();
        assert_eq!(shown, fx.list.row(3).unwrap().record().as_ref());
    }
}
