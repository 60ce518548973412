//! Tree operations: insert, remove, reparent, walk, shadow roots.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId, SHADOW_ROOT_TYPE};
use crate::error::{Error, Result};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The central DOM tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that node removal is O(subtree size) and lookup is O(1).
///
/// A shadow root is a node whose parent is its host but which is not listed among
/// the host's children. Light-tree walks and queries therefore never see inside a
/// shadow tree, while ancestor walks from inside one reach the host.
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    /// host -> shadow root
    shadow_roots: SecondaryMap<NodeId, NodeId>,
    /// shadow root -> host
    shadow_hosts: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
}

impl Dom {
    /// Create an empty DOM.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            shadow_roots: SecondaryMap::new(),
            shadow_hosts: SecondaryMap::new(),
            root: None,
        }
    }

    /// Insert a node with no parent.
    ///
    /// If no root has been set yet, this node becomes the root.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Insert a node as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `parent` does not exist in the tree.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        debug_assert!(
            self.nodes.contains_key(parent),
            "parent node does not exist"
        );
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        id
    }

    /// Remove a node, its descendants and every shadow tree attached below it.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        // Detach from parent's children list.
        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }

        // A shadow root removed on its own leaves its host without one.
        if let Some(host) = self.shadow_hosts.remove(id) {
            self.shadow_roots.remove(host);
        }

        if self.root == Some(id) {
            self.root = None;
        }

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed_root_data = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            if let Some(shadow) = self.shadow_roots.remove(current) {
                self.shadow_hosts.remove(shadow);
                to_remove.push_back(shadow);
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed_root_data = data;
            }
        }

        removed_root_data
    }

    /// Move `node` to become the last child of `new_parent`.
    ///
    /// The node keeps its subtree intact. If `node` was previously a child of
    /// another parent, it is detached first.
    ///
    /// # Panics
    ///
    /// Panics (debug) if either `node` or `new_parent` does not exist.
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) {
        debug_assert!(self.nodes.contains_key(node), "node does not exist");
        debug_assert!(
            self.nodes.contains_key(new_parent),
            "new_parent does not exist"
        );

        if let Some(old_parent) = self.parent.remove(node) {
            if let Some(siblings) = self.children.get_mut(old_parent) {
                siblings.retain(|&child| child != node);
            }
        }

        self.parent.insert(node, new_parent);
        if let Some(siblings) = self.children.get_mut(new_parent) {
            siblings.push(node);
        }
    }

    /// Attach a new, empty shadow root to `host` and return it.
    pub fn attach_shadow(&mut self, host: NodeId) -> Result<NodeId> {
        if !self.nodes.contains_key(host) {
            return Err(Error::node_not_found(host));
        }
        if self.shadow_roots.contains_key(host) {
            return Err(Error::ShadowRootExists(format!("{host:?}")));
        }
        let shadow = self.nodes.insert(NodeData::new(SHADOW_ROOT_TYPE));
        self.children.insert(shadow, Vec::new());
        self.parent.insert(shadow, host);
        self.shadow_roots.insert(host, shadow);
        self.shadow_hosts.insert(shadow, host);
        Ok(shadow)
    }

    /// The shadow root attached to `host`, if any.
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.shadow_roots.get(host).copied()
    }

    /// The host a shadow root is attached to, if `root` is a shadow root.
    pub fn shadow_host(&self, root: NodeId) -> Option<NodeId> {
        self.shadow_hosts.get(root).copied()
    }

    /// Whether `id` is a shadow root.
    pub fn is_shadow_root(&self, id: NodeId) -> bool {
        self.shadow_hosts.contains_key(id)
    }

    /// The root of the scope containing `id`: the nearest shadow root at or above
    /// it, or the top of its light tree.
    pub fn scope_root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        loop {
            if self.is_shadow_root(current) {
                return current;
            }
            match self.parent.get(current) {
                Some(&p) => current = p,
                None => return current,
            }
        }
    }

    /// The host whose shadow tree contains `id`, or `None` for light-tree nodes.
    pub fn scope_host(&self, id: NodeId) -> Option<NodeId> {
        self.shadow_host(self.scope_root(id))
    }

    /// Get the parent of a node, if it has one. The parent of a shadow root is its host.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the light children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Children in the composed tree: a shadow host renders its shadow root's
    /// children in place of its light children.
    pub fn composed_children(&self, id: NodeId) -> &[NodeId] {
        match self.shadow_root(id) {
            Some(shadow) => self.children(shadow),
            None => self.children(id),
        }
    }

    /// Walk from `id` up to the top, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself. Walks out of shadow trees
    /// through their shadow root and host.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// The propagation path of an event targeted at `target`.
    ///
    /// Starts at the target. A non-composed path ends at the first shadow root; a
    /// composed one continues through the host up to the top.
    pub fn event_path(&self, target: NodeId, composed: bool) -> Vec<NodeId> {
        if !self.nodes.contains_key(target) {
            return Vec::new();
        }
        let mut path = vec![target];
        if !composed && self.is_shadow_root(target) {
            return path;
        }
        for ancestor in self.ancestors(target) {
            path.push(ancestor);
            if !composed && self.is_shadow_root(ancestor) {
                break;
            }
        }
        path
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// A node's text content.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.text.as_deref())
    }

    /// Replace a node's text content.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or_else(|| Error::node_not_found(id))?;
        node.text = Some(text.into());
        Ok(())
    }

    /// The current root node, if set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Explicitly set the root node.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Number of nodes in the DOM, shadow trees included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the DOM is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the DOM contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal of the light tree starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        self.walk_with(start, |dom, id| dom.children(id))
    }

    /// Pre-order depth-first traversal of the composed tree starting from `start`.
    ///
    /// Shadow root nodes themselves are not yielded.
    pub fn walk_composed(&self, start: NodeId) -> Vec<NodeId> {
        self.walk_with(start, |dom, id| dom.composed_children(id))
    }

    fn walk_with<'a>(
        &'a self,
        start: NodeId,
        children: impl Fn(&'a Dom, NodeId) -> &'a [NodeId],
    ) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in children(self, current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}
