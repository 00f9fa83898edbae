//! Single-selection state machine
//!
//! Each row is either Selected or Unselected. At most one row is Selected at
//! any time; the controller is the only writer of that state. Selecting a row
//! pushes its record to the detail view.

use super::row::{RowHandle, WeakRow};
use crate::catalog::ItemRecord;

/// Receives the full record of the selected row
pub trait DetailView {
    fn display(&mut self, record: &ItemRecord);
}

/// Owns the current selection and the detail view it drives
pub struct SelectionController<D: DetailView> {
    /// Identity of the selected row. Does not keep the row alive.
    current: Option<WeakRow>,
    detail: D,
    /// Number of completed `select(Some(..))` calls
    selections: u64,
}

impl<D: DetailView> SelectionController<D> {
    pub fn new(detail: D) -> Self {
        Self {
            current: None,
            detail,
            selections: 0,
        }
    }

    /// Select `row`, deselecting the previous row if it differs.
    ///
    /// `None` clears the selection without picking anything; the detail view
    /// keeps whatever it last displayed.
    pub fn select(&mut self, row: Option<&RowHandle>) {
        if let Some(previous) = self.current.take().and_then(|weak| weak.upgrade()) {
            let same = row.is_some_and(|r| r.ptr_eq(&previous));
            if !same {
                previous.set_selected(false);
            }
        }

        let Some(row) = row else {
            return;
        };

        row.set_selected(true);
        self.current = Some(row.downgrade());
        self.selections += 1;
        tracing::debug!("Selected row {} ({})", row.index(), row.record().name);
        self.detail.display(row.record());
    }

    /// Clear the selection (equivalent to `select(None)`)
    pub fn clear(&mut self) {
        self.select(None);
    }

    /// Currently selected row, if it still exists
    pub fn selected(&self) -> Option<RowHandle> {
        self.current.as_ref().and_then(WeakRow::upgrade)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected().map(|row| row.index())
    }

    #[cfg(test)]
    pub fn selection_count(&self) -> u64 {
        self.selections
    }

    pub fn detail(&self) -> &D {
        &self.detail
    }
}
