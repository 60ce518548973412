//! Hit testing over laid-out regions.
//!
//! [`SpatialMap`] keeps `(NodeId, Region)` pairs in paint order: a node painted
//! later covers the ones painted before it, so the last entry containing a point
//! is the node the user sees there.

use crate::dom::node::NodeId;
use crate::geometry::{Offset, Region};

/// Paint-ordered node regions.
#[derive(Debug, Default, Clone)]
pub struct SpatialMap {
    entries: Vec<(NodeId, Region)>,
}

impl SpatialMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with `entries`, last entry frontmost.
    ///
    /// Empty regions never take part in hit testing and are dropped.
    pub fn rebuild(&mut self, entries: impl IntoIterator<Item = (NodeId, Region)>) {
        self.entries.clear();
        self.entries
            .extend(entries.into_iter().filter(|(_, r)| !r.size().is_empty()));
    }

    /// Every node containing `point`, frontmost first.
    pub fn hit_test(&self, point: Offset) -> Vec<NodeId> {
        self.entries
            .iter()
            .rev()
            .filter(|(_, region)| region.contains(point.x, point.y))
            .map(|(id, _)| *id)
            .collect()
    }

    /// The frontmost node containing `point`.
    pub fn node_at(&self, point: Offset) -> Option<NodeId> {
        self.entries
            .iter()
            .rev()
            .find(|(_, region)| region.contains(point.x, point.y))
            .map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
