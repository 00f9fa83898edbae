//! Viewport range tracker
//!
//! Converts the scroll offset of the list container into a [`VisibleRange`]
//! and fans it out to every subscriber. Rows subscribe at population time
//! and decide their own activation from the range they receive.
//!
//! # Lifecycle
//!
//! ```text
//! configure(viewport, buffer)
//!        │
//!        ▼
//! rows subscribe ──► layout pass settles ──► finalize_after_layout(container)
//!                                                  │ freezes container
//!                                                  │ publishes range at offset 0
//!                                                  ▼
//!                                          on_scroll(offset) per scroll event
//! ```
//!
//! Fan-out is synchronous: every call to `on_scroll` delivers exactly one
//! notification to each live subscriber before returning, so no subscriber
//! ever observes a range older than the latest one computed.

use super::range::VisibleRange;
use std::fmt;

/// Result reported by a subscriber after receiving a range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Subscriber handled the range
    Delivered,
    /// Subscriber's target no longer exists; the subscription is dropped
    Gone,
}

/// Callback invoked with each published range
pub type RangeCallback = Box<dyn FnMut(VisibleRange) -> Delivery>;

/// Handle returned by [`ViewportRangeTracker::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Container whose automatic layout can be frozen once it has settled
pub trait LayoutSurface {
    /// Stop responding to further auto-layout passes
    fn freeze_layout(&mut self);
}

/// Misuse of the tracker. These indicate programming errors, not runtime conditions.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// `on_scroll` or `finalize_after_layout` called before `configure`
    NotConfigured,
    /// `finalize_after_layout` called a second time
    AlreadyFinalized,
    /// Scrolling requested before the initial range was published
    NotFinalized,
    /// Negative or non-finite viewport height or buffer
    InvalidConfiguration { viewport_height: f32, buffer: f32 },
    /// Non-finite scroll offset
    InvalidOffset(f32),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "Viewport tracker used before configure()"),
            Self::AlreadyFinalized => write!(f, "Viewport tracker was already finalized"),
            Self::NotFinalized => write!(f, "Layout is not finalized yet"),
            Self::InvalidConfiguration {
                viewport_height,
                buffer,
            } => write!(
                f,
                "Invalid viewport configuration (height {}, buffer {})",
                viewport_height, buffer
            ),
            Self::InvalidOffset(offset) => write!(f, "Invalid scroll offset {}", offset),
        }
    }
}

impl std::error::Error for TrackerError {}

#[derive(Debug, Clone, Copy)]
struct Geometry {
    viewport_height: f32,
    buffer: f32,
}

/// Tracks the visible vertical range of a scroll container and publishes it
pub struct ViewportRangeTracker {
    geometry: Option<Geometry>,
    offset: f32,
    current: Option<VisibleRange>,
    finalized: bool,
    subscribers: Vec<(SubscriptionId, RangeCallback)>,
    next_id: u64,
    notifications: u64,
}

impl ViewportRangeTracker {
    /// Create an unconfigured tracker with no subscribers
    pub fn new() -> Self {
        Self {
            geometry: None,
            offset: 0.0,
            current: None,
            finalized: false,
            subscribers: Vec::new(),
            next_id: 0,
            notifications: 0,
        }
    }

    /// Set the viewport height and overscan buffer.
    ///
    /// May be called again later (e.g. on resize); the new geometry applies
    /// from the next published range.
    pub fn configure(&mut self, viewport_height: f32, buffer: f32) -> Result<(), TrackerError> {
        let valid = viewport_height.is_finite()
            && buffer.is_finite()
            && viewport_height >= 0.0
            && buffer >= 0.0;
        if !valid {
            return Err(TrackerError::InvalidConfiguration {
                viewport_height,
                buffer,
            });
        }

        self.geometry = Some(Geometry {
            viewport_height,
            buffer,
        });
        tracing::debug!(
            "Viewport configured: height={} buffer={}",
            viewport_height,
            buffer
        );
        Ok(())
    }

    /// Recompute the range for `offset` and publish it to all subscribers
    pub fn on_scroll(&mut self, offset: f32) -> Result<VisibleRange, TrackerError> {
        let geometry = self.geometry.ok_or(TrackerError::NotConfigured)?;
        if !offset.is_finite() {
            return Err(TrackerError::InvalidOffset(offset));
        }

        let range = VisibleRange::around(offset, geometry.viewport_height, geometry.buffer);
        self.offset = offset;
        self.current = Some(range);
        self.publish(range);
        Ok(range)
    }

    /// Freeze the container's layout and publish the initial range.
    ///
    /// Must run exactly once, after the container has reached its final
    /// size. Row positions are not trustworthy before that point, so this
    /// is the first moment activation decisions can be made.
    pub fn finalize_after_layout(
        &mut self,
        container: &mut dyn LayoutSurface,
    ) -> Result<VisibleRange, TrackerError> {
        if self.geometry.is_none() {
            return Err(TrackerError::NotConfigured);
        }
        if self.finalized {
            return Err(TrackerError::AlreadyFinalized);
        }

        container.freeze_layout();
        self.finalized = true;
        tracing::debug!(
            "Layout finalized, publishing initial range to {} subscribers",
            self.subscribers.len()
        );
        self.on_scroll(0.0)
    }

    /// Register a callback for range updates
    pub fn subscribe(&mut self, callback: RangeCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, callback));
        id
    }

    /// Remove a subscription. Takes effect immediately; returns false if unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Clear finalization so a repopulated list can run the handshake again
    pub fn reset_finalization(&mut self) {
        self.finalized = false;
        self.current = None;
        self.offset = 0.0;
    }

    fn publish(&mut self, range: VisibleRange) {
        self.notifications += 1;
        let before = self.subscribers.len();
        self.subscribers
            .retain_mut(|(_, callback)| callback(range) == Delivery::Delivered);

        let pruned = before - self.subscribers.len();
        if pruned > 0 {
            tracing::debug!("Pruned {} stale range subscribers", pruned);
        }
        tracing::trace!(
            "Published range #{} [{}, {}] to {} subscribers",
            self.notifications,
            range.min,
            range.max,
            self.subscribers.len()
        );
    }

    /// Most recently published range
    pub fn current_range(&self) -> Option<VisibleRange> {
        self.current
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_configured(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Total number of ranges published so far
    #[cfg(test)]
    pub fn notification_count(&self) -> u64 {
        self.notifications
    }
}

impl Default for ViewportRangeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ViewportRangeTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportRangeTracker")
            .field("geometry", &self.geometry)
            .field("offset", &self.offset)
            .field("current", &self.current)
            .field("finalized", &self.finalized)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Surface {
        frozen: bool,
    }

    impl LayoutSurface for Surface {
        fn freeze_layout(&mut self) {
            self.frozen = true;
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<VisibleRange>>>, RangeCallback) {
        let seen: Rc<RefCell<Vec<VisibleRange>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let callback: RangeCallback = Box::new(move |range: VisibleRange| {
            sink.borrow_mut().push(range);
            Delivery::Delivered
        });
        (seen, callback)
    }

    #[test]
    fn scroll_before_configure_fails() {
        let mut tracker = ViewportRangeTracker::new();
        assert_eq!(tracker.on_scroll(10.0), Err(TrackerError::NotConfigured));

        let mut surface = Surface::default();
        assert_eq!(
            tracker.finalize_after_layout(&mut surface),
            Err(TrackerError::NotConfigured)
        );
        assert!(!surface.frozen);
    }

    #[test]
    fn configure_rejects_negative_and_nan() {
        let mut tracker = ViewportRangeTracker::new();
        assert!(tracker.configure(-1.0, 0.0).is_err());
        assert!(tracker.configure(10.0, -0.5).is_err());
        assert!(tracker.configure(f32::NAN, 0.0).is_err());
        assert!(!tracker.is_configured());
        assert!(tracker.configure(10.0, 0.0).is_ok());
    }

    #[test]
    fn scroll_publishes_buffered_range_once_per_event() {
        let mut tracker = ViewportRangeTracker::new();
        tracker.configure(800.0, 500.0).unwrap();
        let (seen, callback) = recorder();
        tracker.subscribe(callback);

        tracker.on_scroll(0.0).unwrap();
        tracker.on_scroll(250.0).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], VisibleRange::new(-500.0, 1300.0));
        assert_eq!(seen[1], VisibleRange::new(-250.0, 1550.0));
        assert_eq!(tracker.notification_count(), 2);
        assert_eq!(tracker.offset(), 250.0);
    }

    #[test]
    fn every_subscriber_receives_the_latest_range() {
        let mut tracker = ViewportRangeTracker::new();
        tracker.configure(10.0, 2.0).unwrap();
        let (first, cb1) = recorder();
        let (second, cb2) = recorder();
        tracker.subscribe(cb1);
        tracker.subscribe(cb2);

        let range = tracker.on_scroll(5.0).unwrap();
        assert_eq!(first.borrow().last(), Some(&range));
        assert_eq!(second.borrow().last(), Some(&range));
        assert_eq!(tracker.current_range(), Some(range));
    }

    #[test]
    fn unsubscribe_takes_effect_before_next_fan_out() {
        let mut tracker = ViewportRangeTracker::new();
        tracker.configure(10.0, 0.0).unwrap();
        let (seen, callback) = recorder();
        let id = tracker.subscribe(callback);

        tracker.on_scroll(1.0).unwrap();
        assert!(tracker.unsubscribe(id));
        assert!(!tracker.unsubscribe(id));
        tracker.on_scroll(2.0).unwrap();

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(tracker.subscriber_count(), 0);
    }

    #[test]
    fn gone_subscribers_are_pruned() {
        let mut tracker = ViewportRangeTracker::new();
        tracker.configure(10.0, 0.0).unwrap();
        tracker.subscribe(Box::new(|_| Delivery::Gone));
        let (seen, callback) = recorder();
        tracker.subscribe(callback);
        assert_eq!(tracker.subscriber_count(), 2);

        tracker.on_scroll(0.0).unwrap();
        assert_eq!(tracker.subscriber_count(), 1);
        tracker.on_scroll(3.0).unwrap();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn finalize_freezes_and_publishes_at_zero() {
        let mut tracker = ViewportRangeTracker::new();
        tracker.configure(20.0, 4.0).unwrap();
        tracker.on_scroll(9.0).unwrap();
        let (seen, callback) = recorder();
        tracker.subscribe(callback);

        let mut surface = Surface::default();
        let range = tracker.finalize_after_layout(&mut surface).unwrap();

        assert!(surface.frozen);
        assert!(tracker.is_finalized());
        assert_eq!(range, VisibleRange::new(-4.0, 24.0));
        assert_eq!(*seen.borrow(), vec![range]);
    }

    #[test]
    fn finalize_twice_is_an_error() {
        let mut tracker = ViewportRangeTracker::new();
        tracker.configure(20.0, 4.0).unwrap();
        let mut surface = Surface::default();
        tracker.finalize_after_layout(&mut surface).unwrap();
        assert_eq!(
            tracker.finalize_after_layout(&mut surface),
            Err(TrackerError::AlreadyFinalized)
        );

        tracker.reset_finalization();
        assert!(tracker.finalize_after_layout(&mut surface).is_ok());
    }

    #[test]
    fn non_finite_offset_is_rejected() {
        let mut tracker = ViewportRangeTracker::new();
        tracker.configure(20.0, 4.0).unwrap();
        assert!(matches!(
            tracker.on_scroll(f32::INFINITY),
            Err(TrackerError::InvalidOffset(_))
        ));
        assert_eq!(tracker.notification_count(), 0);
    }
}
