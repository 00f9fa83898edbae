//! Visible range and the row activation rule

/// Vertical span of content currently considered visible, overscan included
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRange {
    pub min: f32,
    pub max: f32,
}

impl VisibleRange {
    /// Build a range, swapping the bounds if they arrive reversed
    pub fn new(min: f32, max: f32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Range for a viewport scrolled to `offset`, widened by `buffer` on both ends
    pub fn around(offset: f32, viewport_height: f32, buffer: f32) -> Self {
        Self::new(offset - buffer, offset + viewport_height + buffer)
    }

    /// Whether `value` lies within the range, both ends inclusive
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Decide whether a row at `position` should be active for `range`.
///
/// Row positions grow negative downwards from the container origin, so the
/// magnitude is compared. Both bounds are inclusive.
pub fn is_active(position: f32, range: VisibleRange) -> bool {
    range.contains(position.abs())
}
