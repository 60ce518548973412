//! Element lifecycle: connected and disconnected callbacks.
//!
//! The `LifecycleTracker` records which custom element hosts are currently
//! connected to the document and accumulates lifecycle events that can be
//! drained by the host application.

use std::collections::HashSet;

use tracing::debug;

use crate::dom::node::NodeId;

/// Events that occur during a custom element's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// An element instance was constructed and attached to the document.
    Connected { host: NodeId, tag: String },
    /// An element's host was removed from the document.
    Disconnected { host: NodeId, tag: String },
}

/// Tracks connected element hosts and accumulates lifecycle events.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    connected: HashSet<NodeId>,
    pending: Vec<LifecycleEvent>,
}

impl LifecycleTracker {
    /// Create a new, empty lifecycle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `host` was connected. No duplicate event if it already is.
    pub fn on_connected(&mut self, host: NodeId, tag: &str) {
        if self.connected.insert(host) {
            debug!(?host, tag, "element connected");
            self.pending.push(LifecycleEvent::Connected {
                host,
                tag: tag.to_owned(),
            });
        }
    }

    /// Record that `host` was disconnected. No event if it was not connected.
    pub fn on_disconnected(&mut self, host: NodeId, tag: &str) {
        if self.connected.remove(&host) {
            debug!(?host, tag, "element disconnected");
            self.pending.push(LifecycleEvent::Disconnected {
                host,
                tag: tag.to_owned(),
            });
        }
    }

    /// Check whether a host is currently connected.
    pub fn is_connected(&self, host: NodeId) -> bool {
        self.connected.contains(&host)
    }

    /// The number of currently connected hosts.
    pub fn connected_count(&self) -> usize {
        self.connected.len()
    }

    /// Drain and return all pending lifecycle events, oldest first.
    pub fn drain(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Whether there are any pending events.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
