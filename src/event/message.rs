//! Message trait, envelope, and built-in messages.
//!
//! The [`Message`] trait is object-safe and supports downcasting via `Any`.
//! [`Envelope`] wraps a boxed message with routing metadata (sender, retargeted
//! target, current node). Built-in messages: [`Click`], [`CountChanged`].

use std::any::Any;

use crate::dom::node::NodeId;

// ---------------------------------------------------------------------------
// Message trait
// ---------------------------------------------------------------------------

/// Object-safe message trait.
///
/// `message_name` is the event name listeners register for. `bubbles` and
/// `composed` decide how far the event propagates.
pub trait Message: 'static {
    /// Upcast to `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Event name, e.g. `"click"`.
    fn message_name(&self) -> &str;

    /// Whether the event propagates to ancestors of its target.
    fn bubbles(&self) -> bool {
        false
    }

    /// Whether the event crosses shadow boundaries on its way up.
    fn composed(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Wraps a boxed message with routing metadata.
pub struct Envelope {
    /// The message payload.
    pub message: Box<dyn Message>,
    /// The node the event was dispatched on.
    pub sender: NodeId,
    /// The target as seen from `current`: retargeted to the shadow host once the
    /// event has left a shadow tree.
    pub target: NodeId,
    /// The node whose listeners are currently running.
    pub current: NodeId,
    /// Whether this message has been handled (stops propagation).
    pub handled: bool,
}

impl Envelope {
    /// Create a new envelope for an event dispatched on `sender`.
    pub fn new(message: impl Message, sender: NodeId) -> Self {
        Self::from_boxed(Box::new(message), sender)
    }

    /// Create an envelope from an already boxed message.
    pub fn from_boxed(message: Box<dyn Message>, sender: NodeId) -> Self {
        Self {
            message,
            sender,
            target: sender,
            current: sender,
            handled: false,
        }
    }

    /// The event name of the wrapped message.
    pub fn name(&self) -> &str {
        self.message.message_name()
    }

    /// Attempt to downcast the message to a concrete type.
    pub fn downcast_ref<T: Message>(&self) -> Option<&T> {
        self.message.as_any().downcast_ref::<T>()
    }

    /// Mark this envelope as handled, stopping further propagation.
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("message_name", &self.message.message_name())
            .field("sender", &self.sender)
            .field("target", &self.target)
            .field("current", &self.current)
            .field("handled", &self.handled)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Built-in messages
// ---------------------------------------------------------------------------

/// A primary-button activation. Bubbles and crosses shadow boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Click;

impl Click {
    pub const NAME: &'static str = "click";
}

impl Message for Click {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        Self::NAME
    }
    fn bubbles(&self) -> bool {
        true
    }
    fn composed(&self) -> bool {
        true
    }
}

/// The new count of a counter element, delivered only to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountChanged(pub i64);

impl CountChanged {
    pub const NAME: &'static str = "count-changed";

    /// The count carried by the event.
    pub fn count(&self) -> i64 {
        self.0
    }
}

impl Message for CountChanged {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        Self::NAME
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids() -> (NodeId, NodeId) {
        let mut sm = SlotMap::<NodeId, ()>::with_key();
        (sm.insert(()), sm.insert(()))
    }

    #[test]
    fn click_bubbles_and_is_composed() {
        assert_eq!(Click.message_name(), "click");
        assert!(Click.bubbles());
        assert!(Click.composed());
    }

    #[test]
    fn count_changed_stays_on_host() {
        let msg = CountChanged(3);
        assert_eq!(msg.message_name(), "count-changed");
        assert!(!msg.bubbles());
        assert!(!msg.composed());
        assert_eq!(msg.count(), 3);
    }

    #[test]
    fn envelope_starts_at_sender() {
        let (a, _) = ids();
        let env = Envelope::new(Click, a);
        assert_eq!(env.sender, a);
        assert_eq!(env.target, a);
        assert_eq!(env.current, a);
        assert!(!env.handled);
        assert_eq!(env.name(), "click");
    }

    #[test]
    fn envelope_downcast() {
        let (a, _) = ids();
        let env = Envelope::new(CountChanged(-1), a);
        assert_eq!(env.downcast_ref::<CountChanged>(), Some(&CountChanged(-1)));
        assert!(env.downcast_ref::<Click>().is_none());
    }

    #[test]
    fn mark_handled() {
        let (a, _) = ids();
        let mut env = Envelope::new(Click, a);
        env.mark_handled();
        assert!(env.handled);
    }

    #[test]
    fn debug_shows_name() {
        let (a, b) = ids();
        let mut env = Envelope::new(CountChanged(1), a);
        env.current = b;
        let dbg = format!("{env:?}");
        assert!(dbg.contains("count-changed"));
        assert!(dbg.contains("current"));
    }
}
