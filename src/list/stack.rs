//! Vertical stack layout and the template-based row factory
//!
//! `StackContainer` plays the role of the list's content container: rows are
//! attached in order and a layout pass stacks them top to bottom, writing
//! each row's position as a negative offset from the origin. The container
//! sizes itself to fit its rows until it is frozen, after which layout passes
//! are ignored.

use super::row::RowHandle;
use super::{RowContainer, RowFactory, RowFactoryError};
use crate::catalog::ItemRecord;
use crate::viewport::LayoutSurface;
use std::rc::Rc;

/// Content container that stacks rows vertically
#[derive(Debug, Default)]
pub struct StackContainer {
    rows: Vec<RowHandle>,
    spacing: f32,
    content_height: f32,
    frozen: bool,
    layout_passes: u32,
}

impl StackContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gap between consecutive rows
    #[cfg(test)]
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    /// Position every attached row and resize to fit.
    ///
    /// Returns false (and changes nothing) once the layout is frozen.
    pub fn layout_pass(&mut self) -> bool {
        if self.frozen {
            return false;
        }

        let mut cursor = 0.0_f32;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                cursor += self.spacing;
            }
            row.set_position(-cursor);
            cursor += row.height();
        }

        self.content_height = cursor;
        self.layout_passes += 1;
        tracing::trace!(
            "Layout pass {} stacked {} rows, height {}",
            self.layout_passes,
            self.rows.len(),
            cursor
        );
        true
    }

    /// Total height of the stacked rows from the last layout pass
    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    #[cfg(test)]
    pub fn layout_passes(&self) -> u32 {
        self.layout_passes
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Row whose vertical extent covers `y` (measured downwards from the top)
    pub fn row_at(&self, y: f32) -> Option<&RowHandle> {
        if y < 0.0 {
            return None;
        }
        self.rows.iter().find(|row| {
            let top = row.position().abs();
            y >= top && y < top + row.height()
        })
    }
}

impl LayoutSurface for StackContainer {
    fn freeze_layout(&mut self) {
        if !self.frozen {
            tracing::debug!(
                "Freezing list layout at {} rows, height {}",
                self.rows.len(),
                self.content_height
            );
        }
        self.frozen = true;
    }
}

impl RowContainer for StackContainer {
    fn attach(&mut self, row: &RowHandle) {
        self.rows.push(row.clone());
    }

    fn detach_all(&mut self) {
        self.rows.clear();
        self.content_height = 0.0;
        self.frozen = false;
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }
}

/// Prototype every created row is cloned from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowTemplate {
    /// Row height in content units (terminal lines in the TUI)
    pub height: f32,
}

impl Default for RowTemplate {
    fn default() -> Self {
        Self { height: 1.0 }
    }
}

/// Factory that stamps rows out of a template until the template is retired
#[derive(Debug)]
pub struct TemplateRowFactory {
    template: Option<RowTemplate>,
    created: usize,
    destroyed: usize,
}

impl TemplateRowFactory {
    pub fn new(template: RowTemplate) -> Self {
        Self {
            template: Some(template),
            created: 0,
            destroyed: 0,
        }
    }

    /// Give the factory a fresh template (used before repopulating)
    pub fn restore_template(&mut self, template: RowTemplate) {
        self.template = Some(template);
    }

    #[cfg(test)]
    pub fn has_template(&self) -> bool {
        self.template.is_some()
    }

    /// Rows created and not yet destroyed
    pub fn live_rows(&self) -> usize {
        self.created - self.destroyed
    }
}

impl RowFactory for TemplateRowFactory {
    fn create(
        &mut self,
        index: usize,
        record: Rc<ItemRecord>,
    ) -> Result<RowHandle, RowFactoryError> {
        let template = self.template.ok_or(RowFactoryError::TemplateRetired)?;
        if !(template.height.is_finite() && template.height > 0.0) {
            return Err(RowFactoryError::Other(format!(
                "template height {} is not positive",
                template.height
            )));
        }
        self.created += 1;
        Ok(RowHandle::new(index, record, template.height))
    }

    fn destroy(&mut self, row: RowHandle) {
        self.destroyed += 1;
        drop(row);
    }

    fn retire_template(&mut self) {
        if self.template.take().is_some() {
            tracing::debug!(
                "Row template retired after {} rows ({} live)",
                self.created,
                self.live_rows()
            );
        }
    }
}
