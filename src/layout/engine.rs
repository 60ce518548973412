//! TaffyTree wrapper for layout computation.
//!
//! [`LayoutEngine`] mirrors the composed DOM tree (shadow trees rendered in place
//! of their hosts' light children) into a taffy layout tree, runs layout, and
//! keeps the results as absolute [`Region`]s plus a hit-test map.

use std::collections::HashMap;

use taffy::prelude::*;
use tracing::trace;

use crate::css::styles::Styles;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::error::Result;
use crate::geometry::{Offset, Region};

use super::resolve::{measure_text, resolve_styles};
use super::spatial::SpatialMap;

/// Owns the taffy tree and the last computed layout.
pub struct LayoutEngine {
    /// The taffy tree, parameterized with our DOM NodeId as context data.
    tree: TaffyTree<NodeId>,
    /// Maps DOM NodeId -> taffy node id for the current layout.
    node_map: HashMap<NodeId, taffy::prelude::NodeId>,
    /// Absolute regions by DOM node.
    regions: HashMap<NodeId, Region>,
    /// Composed pre-order walk of the last layout, which is also paint order.
    order: Vec<NodeId>,
    spatial: SpatialMap,
}

impl LayoutEngine {
    /// Create a new, empty layout engine.
    pub fn new() -> Self {
        Self {
            tree: TaffyTree::new(),
            node_map: HashMap::new(),
            regions: HashMap::new(),
            order: Vec::new(),
            spatial: SpatialMap::new(),
        }
    }

    /// Lay out the composed tree under `root` inside a `viewport` of
    /// (columns, rows).
    ///
    /// The taffy tree is rebuilt from scratch on every call. `styles` maps each
    /// node to its computed [`Styles`]; nodes without an entry get the defaults.
    /// A node with no composed children and some text is sized to that text.
    pub fn layout(
        &mut self,
        dom: &Dom,
        root: NodeId,
        styles: &HashMap<NodeId, Styles>,
        viewport: (u16, u16),
    ) -> Result<()> {
        self.tree.clear();
        self.node_map.clear();
        self.regions.clear();
        self.order = dom.walk_composed(root);

        let defaults = Styles::default();
        for &dom_id in &self.order {
            let node_styles = styles.get(&dom_id).unwrap_or(&defaults);
            let content = if dom.composed_children(dom_id).is_empty() {
                dom.text(dom_id).map(measure_text)
            } else {
                None
            };
            let mut taffy_style = resolve_styles(node_styles, content);
            if dom_id == root {
                taffy_style.size = taffy::geometry::Size {
                    width: Dimension::from_length(f32::from(viewport.0)),
                    height: Dimension::from_length(f32::from(viewport.1)),
                };
            }
            let taffy_id = self.tree.new_leaf_with_context(taffy_style, dom_id)?;
            self.node_map.insert(dom_id, taffy_id);
        }

        for &dom_id in &self.order {
            let taffy_children: Vec<taffy::prelude::NodeId> = dom
                .composed_children(dom_id)
                .iter()
                .filter_map(|child| self.node_map.get(child).copied())
                .collect();
            if let Some(&taffy_id) = self.node_map.get(&dom_id) {
                self.tree.set_children(taffy_id, &taffy_children)?;
            }
        }

        let Some(&taffy_root) = self.node_map.get(&root) else {
            self.spatial.rebuild(std::iter::empty());
            return Ok(());
        };
        self.tree.compute_layout(
            taffy_root,
            taffy::geometry::Size {
                width: AvailableSpace::Definite(f32::from(viewport.0)),
                height: AvailableSpace::Definite(f32::from(viewport.1)),
            },
        )?;

        self.collect_regions(dom, root, Offset::default())?;
        self.spatial.rebuild(
            self.order
                .iter()
                .filter_map(|id| self.regions.get(id).map(|region| (*id, *region))),
        );
        trace!(nodes = self.order.len(), "layout computed");
        Ok(())
    }

    /// Record the absolute region of `node` and its composed descendants.
    ///
    /// Taffy locations are relative to the parent; `origin` is the parent's
    /// absolute top-left corner.
    fn collect_regions(&mut self, dom: &Dom, node: NodeId, origin: Offset) -> Result<()> {
        let Some(&taffy_id) = self.node_map.get(&node) else {
            return Ok(());
        };
        let layout = self.tree.layout(taffy_id)?;
        let region = Region::new(
            origin.x + layout.location.x.round() as i32,
            origin.y + layout.location.y.round() as i32,
            layout.size.width.round() as i32,
            layout.size.height.round() as i32,
        );
        self.regions.insert(node, region);
        for &child in dom.composed_children(node) {
            self.collect_regions(dom, child, region.offset())?;
        }
        Ok(())
    }

    /// The absolute region of a node from the last layout.
    pub fn region(&self, node: NodeId) -> Option<Region> {
        self.regions.get(&node).copied()
    }

    /// All regions from the last layout.
    pub fn regions(&self) -> &HashMap<NodeId, Region> {
        &self.regions
    }

    /// Nodes of the last layout in paint order.
    pub fn paint_order(&self) -> &[NodeId] {
        &self.order
    }

    /// The frontmost node at cell (x, y).
    pub fn node_at(&self, x: i32, y: i32) -> Option<NodeId> {
        self.spatial.node_at(Offset::new(x, y))
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}
