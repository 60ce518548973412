//! Widget system: widget and element traits, lifecycle.

pub mod traits;
pub mod lifecycle;

pub use traits::{Element, Widget, WidgetBuilder, WidgetExt};
pub use lifecycle::{LifecycleEvent, LifecycleTracker};
