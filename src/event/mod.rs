//! Event system: messages, listeners, propagation, input.

pub mod handler;
pub mod input;
pub mod message;

pub use handler::{EventDispatcher, Listener, ListenerId};
pub use input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent};
pub use message::{Click, CountChanged, Envelope, Message};
