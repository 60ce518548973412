//! Scoped DOM queries: by id, class, type; generic predicate matching.
//!
//! Every query searches the light tree below a scope node (the document root or a
//! shadow root) and never descends into nested shadow trees, so two shadow roots
//! may each hold a node with the same id.

use super::node::{NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Find the first node in `scope` whose `id` field matches, in tree order.
    pub fn query_by_id(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        self.iter_scope(scope)
            .find(|(_, data)| data.id.as_deref() == Some(id))
            .map(|(node_id, _)| node_id)
    }

    /// Find all nodes in `scope` that have the given CSS class.
    pub fn query_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.query_all(scope, |data| data.has_class(class))
    }

    /// Find all nodes in `scope` whose `widget_type` matches.
    pub fn query_by_type(&self, scope: NodeId, widget_type: &str) -> Vec<NodeId> {
        self.query_all(scope, |data| data.widget_type == widget_type)
    }

    /// Find all nodes in `scope` matching an arbitrary predicate.
    pub fn query_all(&self, scope: NodeId, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.iter_scope(scope)
            .filter(|(_, data)| predicate(data))
            .map(|(node_id, _)| node_id)
            .collect()
    }

    /// Iterate `(NodeId, &NodeData)` pairs of the light tree under `scope`, in
    /// tree order, excluding `scope` itself.
    fn iter_scope(&self, scope: NodeId) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.walk_depth_first(scope)
            .into_iter()
            .skip(1)
            .filter_map(move |id| self.get(id).map(|data| (id, data)))
    }
}
