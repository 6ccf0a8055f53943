//! Petit DOM - Headless document substrate
//!
//! A small arena-backed DOM tree: enough structure for the behavior layer
//! (attributes, classes, selector queries, geometry, focus) without any
//! parsing or rendering.

mod geometry;
mod node;
mod page;
mod query;
mod tree;

pub use geometry::Rect;
pub use node::{Attribute, ElementData, Node, NodeData};
pub use page::{Page, Viewport};
pub use query::{query, query_all, SimpleSelector};
pub use tree::DomTree;

/// Node identifier (index into the tree arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Document root ID
    pub const ROOT: NodeId = NodeId(0);

    /// Check this is a real node reference
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::NONE
    }

    /// Arena slot, mainly for logging
    #[inline]
    pub fn index(&self) -> u32 {
        self.0
    }
}
