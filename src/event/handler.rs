//! Event listeners and propagation path computation.
//!
//! [`EventDispatcher`] stores listener registrations per node and event name.
//! It does not invoke listeners itself: the document walks the path from
//! [`EventDispatcher::propagation_path`] and calls the listeners it hands out,
//! since listeners need `&mut Document`.

use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SecondaryMap, SlotMap};

use super::message::{Envelope, Message};
use crate::document::Document;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;

new_key_type! {
    /// Handle returned by listener registration, used for removal.
    pub struct ListenerId;
}

/// A shared event listener.
pub type Listener = Rc<dyn Fn(&mut Document, &mut Envelope)>;

struct Registration {
    node: NodeId,
    event: String,
    listener: Listener,
}

// ---------------------------------------------------------------------------
// EventDispatcher
// ---------------------------------------------------------------------------

/// Listener registry keyed by node and event name.
#[derive(Default)]
pub struct EventDispatcher {
    registrations: SlotMap<ListenerId, Registration>,
    /// Registration order per node.
    by_node: SecondaryMap<NodeId, Vec<ListenerId>>,
}

impl EventDispatcher {
    /// Create a new, empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `event` on `node`.
    pub fn add(&mut self, node: NodeId, event: impl Into<String>, listener: Listener) -> ListenerId {
        let id = self.registrations.insert(Registration {
            node,
            event: event.into(),
            listener,
        });
        match self.by_node.get_mut(node) {
            Some(ids) => ids.push(id),
            None => {
                self.by_node.insert(node, vec![id]);
            }
        }
        id
    }

    /// Remove a registration. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let Some(registration) = self.registrations.remove(id) else {
            return false;
        };
        if let Some(ids) = self.by_node.get_mut(registration.node) {
            ids.retain(|&other| other != id);
        }
        true
    }

    /// Drop every listener registered on `node`.
    pub fn clear_node(&mut self, node: NodeId) -> usize {
        let ids = self.by_node.remove(node).unwrap_or_default();
        for &id in &ids {
            self.registrations.remove(id);
        }
        ids.len()
    }

    /// Listeners for `event` on `node` with their ids, in registration order.
    ///
    /// Returned as clones so listeners may add or remove registrations while
    /// they run. Callers check [`contains`](Self::contains) before invoking each.
    pub fn listeners_for(&self, node: NodeId, event: &str) -> Vec<(ListenerId, Listener)> {
        self.by_node
            .get(node)
            .into_iter()
            .flatten()
            .filter_map(|&id| self.registrations.get(id).map(|r| (id, r)))
            .filter(|(_, r)| r.event == event)
            .map(|(id, r)| (id, Rc::clone(&r.listener)))
            .collect()
    }

    /// Whether `id` is still registered.
    pub fn contains(&self, id: ListenerId) -> bool {
        self.registrations.contains_key(id)
    }

    /// Number of listeners registered on `node`.
    pub fn count(&self, node: NodeId) -> usize {
        self.by_node.get(node).map_or(0, Vec::len)
    }

    /// Total number of registrations.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Compute the nodes an event visits, each paired with the target as seen
    /// from that node.
    ///
    /// A non-bubbling event only visits `target`. A bubbling event walks up to
    /// the enclosing shadow root, or through it to the top when composed; once it
    /// has left a shadow tree its target is the shadow host.
    pub fn propagation_path(dom: &Dom, target: NodeId, message: &dyn Message) -> Vec<(NodeId, NodeId)> {
        let mut path = dom.event_path(target, message.composed());
        if !message.bubbles() {
            path.truncate(1);
        }

        let mut seen_target = target;
        path.into_iter()
            .map(|node| {
                let entry = (node, seen_target);
                if let Some(host) = dom.shadow_host(node) {
                    seen_target = host;
                }
                entry
            })
            .collect()
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.registrations.len())
            .field("nodes", &self.by_node.len())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
