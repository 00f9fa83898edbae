// Viewport module - visible range tracking and row activation
//
// The tracker turns scroll offsets into a buffered visible range and pushes
// it to subscribers. Rows apply `is_active` to their own position to decide
// whether they are live. Deferred work (the post-layout finalize) goes
// through the idle queue.

pub mod idle;
pub mod range;
pub mod tracker;

pub use idle::{IdleQueue, Liveness};
pub use range::{is_active, VisibleRange};
pub use tracker::{
    Delivery, LayoutSurface, SubscriptionId, TrackerError, ViewportRangeTracker,
};
