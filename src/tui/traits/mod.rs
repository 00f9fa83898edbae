//! Component traits for the TUI
//!
//! App routes rendering and clipboard requests through these instead of
//! knowing how each panel draws itself.
//!
//! - [`Component`] - render + identity
//! - [`Copyable`] - components that provide clipboard content

mod component;
mod copyable;

pub use component::{Component, ComponentId, RenderContext};
pub use copyable::Copyable;
