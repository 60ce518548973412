//! DOM arena: slotmap-backed node tree with shadow roots and scoped queries.

pub mod node;
pub mod tree;
pub mod query;

pub use node::{NodeId, NodeData, SHADOW_ROOT_TYPE};
pub use tree::Dom;
