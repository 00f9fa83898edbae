//! Row handles
//!
//! A row is the list's representation of one catalog record. Its vertical
//! position is written by the layout pass; its activation is written by the
//! range subscription; its selection is written by the selection controller.
//! Everything else treats those as read-only.

use crate::catalog::ItemRecord;
use crate::viewport::{is_active, SubscriptionId, VisibleRange};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type ClickHandler = Box<dyn Fn(&RowHandle)>;

/// Shared state behind a [`RowHandle`]
pub struct Row {
    index: usize,
    record: Rc<ItemRecord>,
    height: f32,
    position: Cell<f32>,
    active: Cell<bool>,
    selected: Cell<bool>,
    subscription: Cell<Option<SubscriptionId>>,
    on_click: RefCell<Option<ClickHandler>>,
}

/// Cheap, cloneable handle to a row. Identity is pointer identity.
#[derive(Clone)]
pub struct RowHandle(Rc<Row>);

/// Non-owning reference to a row
#[derive(Clone)]
pub struct WeakRow(Weak<Row>);

impl RowHandle {
    /// Create a dormant, unselected row at position 0
    pub fn new(index: usize, record: Rc<ItemRecord>, height: f32) -> Self {
        Self(Rc::new(Row {
            index,
            record,
            height,
            position: Cell::new(0.0),
            active: Cell::new(false),
            selected: Cell::new(false),
            subscription: Cell::new(None),
            on_click: RefCell::new(None),
        }))
    }

    /// Position of this row in the list (creation order)
    pub fn index(&self) -> usize {
        self.0.index
    }

    pub fn record(&self) -> &Rc<ItemRecord> {
        &self.0.record
    }

    pub fn height(&self) -> f32 {
        self.0.height
    }

    /// Signed vertical offset from the container origin (negative downwards)
    pub fn position(&self) -> f32 {
        self.0.position.get()
    }

    /// Written by the layout collaborator only
    pub fn set_position(&self, position: f32) {
        self.0.position.set(position);
    }

    pub fn is_active(&self) -> bool {
        self.0.active.get()
    }

    pub fn is_selected(&self) -> bool {
        self.0.selected.get()
    }

    pub(crate) fn set_selected(&self, selected: bool) {
        self.0.selected.set(selected);
    }

    /// Apply the activation rule for `range` to this row's position
    pub fn apply_range(&self, range: VisibleRange) {
        self.0.active.set(is_active(self.position(), range));
    }

    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.0.subscription.get()
    }

    pub(crate) fn set_subscription(&self, id: Option<SubscriptionId>) {
        self.0.subscription.set(id);
    }

    /// Route click input through `handler`
    pub(crate) fn bind_click(&self, handler: ClickHandler) {
        *self.0.on_click.borrow_mut() = Some(handler);
    }

    /// Drop the click binding (row is being destroyed)
    pub(crate) fn unbind_click(&self) {
        self.0.on_click.borrow_mut().take();
    }

    /// Deliver a click to whatever this row was wired to.
    ///
    /// Returns false when the row has no binding.
    pub fn click(&self) -> bool {
        let binding = self.0.on_click.borrow();
        match binding.as_ref() {
            Some(handler) => {
                handler(self);
                true
            }
            None => {
                tracing::warn!("Row {} clicked without a selection binding", self.index());
                false
            }
        }
    }

    pub fn downgrade(&self) -> WeakRow {
        WeakRow(Rc::downgrade(&self.0))
    }

    pub fn ptr_eq(&self, other: &RowHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for RowHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for RowHandle {}

impl fmt::Debug for RowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowHandle")
            .field("index", &self.index())
            .field("name", &self.record().name)
            .field("position", &self.position())
            .field("active", &self.is_active())
            .field("selected", &self.is_selected())
            .finish()
    }
}

impl WeakRow {
    pub fn upgrade(&self) -> Option<RowHandle> {
        self.0.upgrade().map(RowHandle)
    }

    /// Whether this points at the same row as `row`
    #[cfg(test)]
    pub fn is(&self, row: &RowHandle) -> bool {
        Weak::ptr_eq(&self.0, &Rc::downgrade(&row.0))
    }
}

impl fmt::Debug for WeakRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(row) => write!(f, "WeakRow({})", row.index()),
            None => write!(f, "WeakRow(<dropped>)"),
        }
    }
}
