//! Node and edge identities plus a monotonic allocator.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Monotonic allocator for NodeId and EdgeId.
/// `observe_*` bumps the counters past caller-assigned ids so generated ids
/// never collide with them.
#[derive(Default, Debug, Clone)]
pub struct IdAllocator {
    next_node: u32,
    next_edge: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_node(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node = self.next_node.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_edge(&mut self) -> EdgeId {
        let id = EdgeId(self.next_edge);
        self.next_edge = self.next_edge.wrapping_add(1);
        id
    }

    #[inline]
    pub fn observe_node(&mut self, id: NodeId) {
        self.next_node = self.next_node.max(id.0.wrapping_add(1));
    }

    #[inline]
    pub fn observe_edge(&mut self, id: EdgeId) {
        self.next_edge = self.next_edge.max(id.0.wrapping_add(1));
    }
}
