//! Arena-backed directed multigraph.
//!
//! Nodes and edges live in slot vectors and refer to each other by id, so the
//! node <-> edge back references never form ownership cycles. Every edge id
//! listed in a node's `outgoing`/`incoming` names an edge whose `start`/`end`
//! is that node, and vice versa; all mutation goes through [`Graph`] methods
//! that keep both sides in sync.

use hashbrown::HashMap;
use motion_clip_core::MotionClip;

use crate::error::{GraphError, Result};
use crate::ids::{EdgeId, IdAllocator, NodeId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    outgoing: Vec<EdgeId>,
    incoming: Vec<EdgeId>,
}

impl Node {
    fn new(id: NodeId) -> Self {
        Self {
            id,
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Outgoing edges in insertion order.
    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }

    /// Incoming edges in insertion order.
    pub fn incoming(&self) -> &[EdgeId] {
        &self.incoming
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge<E> {
    id: EdgeId,
    start: NodeId,
    end: NodeId,
    payload: E,
}

impl<E> Edge<E> {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn is_self_loop(&self) -> bool {
        self.start == self.end
    }
}

/// Edge description accepted by [`Graph::from_parts`].
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSpec<E> {
    pub id: EdgeId,
    pub start: NodeId,
    pub end: NodeId,
    pub payload: E,
}

#[derive(Clone, Debug)]
pub struct Graph<E = MotionClip> {
    nodes: Vec<Option<Node>>,
    edges: Vec<Option<Edge<E>>>,
    node_slots: HashMap<NodeId, usize>,
    edge_slots: HashMap<EdgeId, usize>,
    ids: IdAllocator,
}

/// The graph whose edges carry motion clips.
pub type MotionGraph = Graph<MotionClip>;

impl<E> Default for Graph<E> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            node_slots: HashMap::new(),
            edge_slots: HashMap::new(),
            ids: IdAllocator::new(),
        }
    }
}

impl<E> Graph<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a consistent graph from an edge list plus any explicitly known
    /// nodes. Nodes referenced only by edges are synthesized. Explicit nodes
    /// come first in node order, then synthesized ones in edge order.
    pub fn from_parts(
        edges: impl IntoIterator<Item = EdgeSpec<E>>,
        nodes: impl IntoIterator<Item = NodeId>,
    ) -> Result<Self> {
        let mut graph = Self::new();
        for id in nodes {
            graph.add_node(id)?;
        }
        for spec in edges {
            graph.ensure_node(spec.start);
            graph.ensure_node(spec.end);
            graph.add_edge(spec.id, spec.start, spec.end, spec.payload)?;
        }
        Ok(graph)
    }

    pub fn add_node(&mut self, id: NodeId) -> Result<NodeId> {
        if self.node_slots.contains_key(&id) {
            return Err(GraphError::DuplicateNode { id });
        }
        self.ids.observe_node(id);
        self.node_slots.insert(id, self.nodes.len());
        self.nodes.push(Some(Node::new(id)));
        Ok(id)
    }

    /// Add a node with a generated id.
    pub fn new_node(&mut self) -> NodeId {
        let mut id = self.ids.alloc_node();
        while self.contains_node(id) {
            id = self.ids.alloc_node();
        }
        self.node_slots.insert(id, self.nodes.len());
        self.nodes.push(Some(Node::new(id)));
        id
    }

    /// Insert `id` if it is not present yet.
    pub fn ensure_node(&mut self, id: NodeId) -> NodeId {
        if !self.node_slots.contains_key(&id) {
            self.ids.observe_node(id);
            self.node_slots.insert(id, self.nodes.len());
            self.nodes.push(Some(Node::new(id)));
        }
        id
    }

    pub fn add_edge(&mut self, id: EdgeId, start: NodeId, end: NodeId, payload: E) -> Result<EdgeId> {
        if self.edge_slots.contains_key(&id) {
            return Err(GraphError::DuplicateEdge { id });
        }
        let start_slot = self.slot_of(start).ok_or(GraphError::NodeNotFound { id: start })?;
        let end_slot = self.slot_of(end).ok_or(GraphError::NodeNotFound { id: end })?;

        self.ids.observe_edge(id);
        self.edge_slots.insert(id, self.edges.len());
        self.edges.push(Some(Edge {
            id,
            start,
            end,
            payload,
        }));
        if let Some(node) = self.nodes[start_slot].as_mut() {
            node.outgoing.push(id);
        }
        if let Some(node) = self.nodes[end_slot].as_mut() {
            node.incoming.push(id);
        }
        Ok(id)
    }

    /// Add an edge with a generated id.
    pub fn connect(&mut self, start: NodeId, end: NodeId, payload: E) -> Result<EdgeId> {
        let mut id = self.ids.alloc_edge();
        while self.contains_edge(id) {
            id = self.ids.alloc_edge();
        }
        self.add_edge(id, start, end, payload)
    }

    pub(crate) fn slot_of(&self, id: NodeId) -> Option<usize> {
        self.node_slots.get(&id).copied()
    }

    /// Upper bound on slot indices, for index-keyed scratch buffers.
    pub(crate) fn slot_capacity(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_slots.contains_key(&id)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge_slots.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slot_of(id).and_then(|s| self.nodes[s].as_ref())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge<E>> {
        self.edge_slots
            .get(&id)
            .and_then(|&s| self.edges[s].as_ref())
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter_map(Option::as_ref)
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes().map(Node::id).collect()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<E>> + '_ {
        self.edges.iter().filter_map(Option::as_ref)
    }

    pub fn node_count(&self) -> usize {
        self.node_slots.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_slots.is_empty()
    }

    pub fn outgoing(&self, id: NodeId) -> &[EdgeId] {
        self.node(id).map(Node::outgoing).unwrap_or(&[])
    }

    pub fn incoming(&self, id: NodeId) -> &[EdgeId] {
        self.node(id).map(Node::incoming).unwrap_or(&[])
    }

    /// End nodes of `id`'s outgoing edges, in edge order (may repeat).
    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing(id)
            .iter()
            .filter_map(move |e| self.edge(*e).map(Edge::end))
    }

    /// Detach and return an edge. Both endpoint nodes stay in the graph.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<Edge<E>> {
        let slot = self
            .edge_slots
            .remove(&id)
            .ok_or(GraphError::EdgeNotFound { id })?;
        let edge = self.edges[slot]
            .take()
            .ok_or(GraphError::EdgeNotFound { id })?;
        if let Some(s) = self.slot_of(edge.start) {
            if let Some(node) = self.nodes[s].as_mut() {
                node.outgoing.retain(|e| *e != id);
            }
        }
        if let Some(s) = self.slot_of(edge.end) {
            if let Some(node) = self.nodes[s].as_mut() {
                node.incoming.retain(|e| *e != id);
            }
        }
        Ok(edge)
    }

    /// Remove a node and every edge touching it. Returns the removed edges.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Vec<Edge<E>>> {
        let slot = self.slot_of(id).ok_or(GraphError::NodeNotFound { id })?;
        let (outgoing, incoming) = match self.nodes[slot].as_ref() {
            Some(node) => (node.outgoing.clone(), node.incoming.clone()),
            None => return Err(GraphError::NodeNotFound { id }),
        };
        let mut removed = Vec::with_capacity(outgoing.len() + incoming.len());
        for e in outgoing.into_iter().chain(incoming) {
            // self-loops appear in both lists
            if let Ok(edge) = self.remove_edge(e) {
                removed.push(edge);
            }
        }
        self.nodes[slot] = None;
        self.node_slots.remove(&id);
        Ok(removed)
    }

    /// Bulk removal; unknown ids are ignored. Returns how many nodes went away.
    pub fn remove_nodes(&mut self, ids: &[NodeId]) -> usize {
        ids.iter()
            .filter(|id| self.remove_node(**id).is_ok())
            .count()
    }

    /// Copy of the topology with every payload mapped through `f`.
    /// Node order, edge order and identities are preserved.
    pub fn map_edges<F, T>(&self, mut f: F) -> Graph<T>
    where
        F: FnMut(&Edge<E>) -> T,
    {
        Graph {
            nodes: self.nodes.clone(),
            edges: self
                .edges
                .iter()
                .map(|slot| {
                    slot.as_ref().map(|e| Edge {
                        id: e.id,
                        start: e.start,
                        end: e.end,
                        payload: f(e),
                    })
                })
                .collect(),
            node_slots: self.node_slots.clone(),
            edge_slots: self.edge_slots.clone(),
            ids: self.ids.clone(),
        }
    }

    /// Same node ids and order with every edge flipped; edge ids are kept.
    pub fn reversed(&self) -> Self
    where
        E: Clone,
    {
        Graph {
            nodes: self
                .nodes
                .iter()
                .map(|slot| {
                    slot.as_ref().map(|n| Node {
                        id: n.id,
                        outgoing: n.incoming.clone(),
                        incoming: n.outgoing.clone(),
                    })
                })
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|slot| {
                    slot.as_ref().map(|e| Edge {
                        id: e.id,
                        start: e.end,
                        end: e.start,
                        payload: e.payload.clone(),
                    })
                })
                .collect(),
            node_slots: self.node_slots.clone(),
            edge_slots: self.edge_slots.clone(),
            ids: self.ids.clone(),
        }
    }

    /// Topology only, for analysis passes that never read payloads.
    pub fn topology(&self) -> Graph<()> {
        self.map_edges(|_| ())
    }

    /// Verify the bidirectional node/edge invariant.
    pub fn is_consistent(&self) -> bool {
        for edge in self.edges() {
            let (Some(start), Some(end)) = (self.node(edge.start), self.node(edge.end)) else {
                return false;
            };
            if !start.outgoing.contains(&edge.id) || !end.incoming.contains(&edge.id) {
                return false;
            }
        }
        self.nodes().all(|node| {
            node.outgoing
                .iter()
                .all(|e| self.edge(*e).is_some_and(|edge| edge.start == node.id))
                && node
                    .incoming
                    .iter()
                    .all(|e| self.edge(*e).is_some_and(|edge| edge.end == node.id))
        })
    }
}
