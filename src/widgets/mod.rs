//! Built-in widgets: Static, Button, and the `my-counter` element.

pub mod button;
pub mod counter;
pub mod static_widget;

pub use button::Button;
pub use counter::{Counter, CounterHandle, OverflowPolicy};
pub use static_widget::Static;
