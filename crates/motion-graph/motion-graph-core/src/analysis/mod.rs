//! Graph analysis built on [`depth_first`]: reversal, reachability
//! clusters, post-order numbering, strongly connected components and sink
//! pruning.

mod prune;
mod scc;
mod stats;

pub use prune::prune_sink_components;
pub use scc::{strongly_connected_components, SccDag, SccId, SccNode};
pub use stats::GraphStats;

use hashbrown::HashMap;

use crate::dfs::{depth_first, DfsVisitor};
use crate::graph::Graph;
use crate::ids::NodeId;

/// New graph with the same node ids (same order) and every edge flipped.
/// Edge ids and payloads are kept; the input is not modified.
pub fn reverse<E: Clone>(graph: &Graph<E>) -> Graph<E> {
    graph.reversed()
}

struct ComponentLabeler {
    current: usize,
    labels: HashMap<NodeId, usize>,
}

impl DfsVisitor for ComponentLabeler {
    fn new_component(&mut self) {
        self.current += 1;
    }

    fn pre_visit(&mut self, node: NodeId) {
        self.labels.insert(node, self.current);
    }
}

/// Label nodes by the DFS tree (following outgoing edges only) that first
/// reaches them, starting searches in graph node order. Labels are 1-based.
///
/// This is one-directional reachability, not weak connectivity: a node that
/// can only be reached against edge direction may land in its own cluster,
/// depending on node order. Run it on [`reverse`] as well when full
/// connectivity is needed.
///
/// For a cycle with a pendant path (`A <-> B`, `B -> C -> D`), `D` only gets
/// a label of its own when the search reaches it before `A` or `B`, e.g. with
/// node order `D, C, A, B`. Starting from `A` sweeps all four nodes into
/// label 1.
pub fn connected_components<E>(graph: &Graph<E>) -> HashMap<NodeId, usize> {
    let mut labeler = ComponentLabeler {
        current: 0,
        labels: HashMap::with_capacity(graph.node_count()),
    };
    depth_first(graph, graph.node_ids(), &mut labeler);
    labeler.labels
}

struct PostOrder {
    next: usize,
    numbers: HashMap<NodeId, usize>,
}

impl DfsVisitor for PostOrder {
    fn post_visit(&mut self, node: NodeId) {
        self.numbers.insert(node, self.next);
        self.next += 1;
    }
}

/// Number nodes 0, 1, 2, ... in the order their DFS finishes, starting
/// searches in graph node order.
pub fn post_order<E>(graph: &Graph<E>) -> HashMap<NodeId, usize> {
    let mut visitor = PostOrder {
        next: 0,
        numbers: HashMap::with_capacity(graph.node_count()),
    };
    depth_first(graph, graph.node_ids(), &mut visitor);
    visitor.numbers
}
