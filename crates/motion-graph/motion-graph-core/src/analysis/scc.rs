//! Strongly connected components (Kosaraju) and their condensation DAG.

use std::cmp::Reverse;

use hashbrown::HashMap;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::post_order;
use crate::dfs::{depth_first, DfsVisitor};
use crate::graph::Graph;
use crate::ids::{EdgeId, NodeId};

/// 1-based component rank. Components are numbered in reverse topological
/// order: id 1 is always a sink of the condensation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SccId(pub usize);

impl std::fmt::Display for SccId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scc{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SccNode {
    id: SccId,
    members: Vec<NodeId>,
}

impl SccNode {
    pub fn id(&self) -> SccId {
        self.id
    }

    /// Original nodes in the order the labeling pass finished them.
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Read-only condensation of a graph. Rebuild it after mutating the graph.
#[derive(Clone, Debug, Default)]
pub struct SccDag {
    components: Vec<SccNode>,
    membership: HashMap<NodeId, SccId>,
    edges: IndexSet<(SccId, SccId)>,
}

impl SccDag {
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[SccNode] {
        &self.components
    }

    pub fn component(&self, id: SccId) -> Option<&SccNode> {
        id.0.checked_sub(1).and_then(|i| self.components.get(i))
    }

    pub fn component_of(&self, node: NodeId) -> Option<SccId> {
        self.membership.get(&node).copied()
    }

    /// Deduplicated inter-component arcs in discovery order. Never contains
    /// `(x, x)`.
    pub fn edges(&self) -> impl Iterator<Item = (SccId, SccId)> + '_ {
        self.edges.iter().copied()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_edge(&self, from: SccId, to: SccId) -> bool {
        self.edges.contains(&(from, to))
    }

    pub fn successors(&self, id: SccId) -> impl Iterator<Item = SccId> + '_ {
        self.edges
            .iter()
            .filter(move |(from, _)| *from == id)
            .map(|(_, to)| *to)
    }

    /// Components without outgoing inter-component arcs.
    pub fn sinks(&self) -> Vec<SccId> {
        let mut has_out = vec![false; self.components.len()];
        for (from, _) in &self.edges {
            if let Some(flag) = from.0.checked_sub(1).and_then(|i| has_out.get_mut(i)) {
                *flag = true;
            }
        }
        self.components
            .iter()
            .zip(has_out)
            .filter(|(_, out)| !out)
            .map(|(c, _)| c.id)
            .collect()
    }

    pub fn is_sink(&self, id: SccId) -> bool {
        !self.edges.iter().any(|(from, _)| *from == id)
    }
}

struct SccLabeler {
    current: usize,
    dag: SccDag,
}

impl DfsVisitor for SccLabeler {
    fn new_component(&mut self) {
        self.current += 1;
        self.dag.components.push(SccNode {
            id: SccId(self.current),
            members: Vec::new(),
        });
    }

    fn post_visit(&mut self, node: NodeId) {
        let id = SccId(self.current);
        self.dag.membership.insert(node, id);
        if let Some(component) = self.dag.components.last_mut() {
            component.members.push(node);
        }
    }

    fn cross_edge(&mut self, _from: NodeId, to: NodeId, _edge: EdgeId) {
        // `from` belongs to the component being built; an unlabeled `to` is
        // still on the stack and so in the same component.
        let current = SccId(self.current);
        if let Some(&target) = self.dag.membership.get(&to) {
            if target != current {
                self.dag.edges.insert((current, target));
            }
        }
    }
}

/// Kosaraju: finish order on the reversed graph, then a labeling pass over
/// the original graph in descending finish order. Two DFS passes,
/// O(nodes + edges). Deterministic for a fixed node insertion order.
pub fn strongly_connected_components<E>(graph: &Graph<E>) -> SccDag {
    let reversed = graph.topology().reversed();
    let finish = post_order(&reversed);

    let mut order = graph.node_ids();
    order.sort_by_key(|n| Reverse(finish.get(n).copied().unwrap_or(0)));

    let mut labeler = SccLabeler {
        current: 0,
        dag: SccDag {
            components: Vec::new(),
            membership: HashMap::with_capacity(graph.node_count()),
            edges: IndexSet::new(),
        },
    };
    depth_first(graph, order, &mut labeler);
    labeler.dag
}

#[cfg(test)]
mod tests {
    use super::super::test_graphs::*;
    use super::*;

    #[test]
    fn cycle_collapses_and_chain_stays_split() {
        let g = cycle_with_tail(&[A, B, C, D]);
        let dag = strongly_connected_components(&g);
        assert_eq!(dag.len(), 3);

        let ab = dag.component_of(A).unwrap();
        assert_eq!(dag.component_of(B), Some(ab));
        let c = dag.component_of(C).unwrap();
        let d = dag.component_of(D).unwrap();
        assert_ne!(c, d);
        assert_ne!(ab, c);

        assert_eq!(dag.edge_count(), 2);
        assert!(dag.has_edge(ab, c));
        assert!(dag.has_edge(c, d));
        assert_eq!(dag.sinks(), vec![d]);
        assert_eq!(d, SccId(1));
        assert_eq!(dag.component(ab).unwrap().len(), 2);
    }

    #[test]
    fn parallel_arcs_are_deduplicated() {
        // two arcs from the {A,B} cycle into C
        let g = build(&[A, B, C], &[(A, B), (B, A), (A, C), (B, C), (A, C)]);
        let dag = strongly_connected_components(&g);
        assert_eq!(dag.len(), 2);
        assert_eq!(dag.edge_count(), 1);
        assert!(dag.edges().all(|(from, to)| from != to));
    }

    #[test]
    fn ids_follow_reverse_topological_order() {
        // A -> B -> C -> D, all singletons
        let g = build(&[A, B, C, D], &[(A, B), (B, C), (C, D)]);
        let dag = strongly_connected_components(&g);
        assert_eq!(dag.len(), 4);
        for (from, to) in dag.edges() {
            assert!(from > to, "{from} -> {to}");
        }
        assert_eq!(dag.component_of(D), Some(SccId(1)));
        assert_eq!(dag.component_of(A), Some(SccId(4)));
    }

    #[test]
    fn self_loop_forms_a_sink() {
        let g = build(&[A, B], &[(A, B), (B, B)]);
        let dag = strongly_connected_components(&g);
        assert_eq!(dag.len(), 2);
        let b = dag.component_of(B).unwrap();
        assert!(dag.is_sink(b));
        assert!(!dag.is_sink(dag.component_of(A).unwrap()));
    }

    #[test]
    fn empty_graph() {
        let g: Graph<()> = Graph::new();
        let dag = strongly_connected_components(&g);
        assert!(dag.is_empty());
        assert!(dag.sinks().is_empty());
    }
}
