//! Generic depth-first traversal with pluggable hooks.
//!
//! Each start node not yet visited opens a new component, then the search
//! marks a node visited, fires `pre_visit`, walks its outgoing edges in stored
//! order (descending into unvisited end nodes, reporting visited ones through
//! `cross_edge`) and finally fires `post_visit`. The traversal runs on an
//! explicit work stack, so deep graphs cannot overflow the call stack; the
//! callback order is the same as the recursive formulation.

use crate::graph::Graph;
use crate::ids::{EdgeId, NodeId};

/// Hooks invoked by [`depth_first`]. All methods default to no-ops.
pub trait DfsVisitor {
    fn pre_visit(&mut self, _node: NodeId) {}

    fn post_visit(&mut self, _node: NodeId) {}

    /// Fired once per start node that was not reached by an earlier search.
    fn new_component(&mut self) {}

    /// Fired for an edge whose end node was already visited. Forward, back
    /// and cross edges all land here.
    fn cross_edge(&mut self, _from: NodeId, _to: NodeId, _edge: EdgeId) {}
}

struct StackFrame {
    node: NodeId,
    next_edge: usize,
}

/// Visit every node reachable from `starts`, each exactly once.
/// Start ids that are not in the graph are skipped.
pub fn depth_first<E, V, I>(graph: &Graph<E>, starts: I, visitor: &mut V)
where
    V: DfsVisitor + ?Sized,
    I: IntoIterator<Item = NodeId>,
{
    let mut visited = vec![false; graph.slot_capacity()];
    let mut stack: Vec<StackFrame> = Vec::new();

    for start in starts {
        let Some(slot) = graph.slot_of(start) else {
            continue;
        };
        if visited[slot] {
            continue;
        }
        visitor.new_component();
        visited[slot] = true;
        visitor.pre_visit(start);
        stack.push(StackFrame {
            node: start,
            next_edge: 0,
        });

        while let Some(top) = stack.last_mut() {
            let outgoing = graph
                .node(top.node)
                .map(|n| n.outgoing())
                .unwrap_or(&[]);
            if top.next_edge >= outgoing.len() {
                let done = top.node;
                stack.pop();
                visitor.post_visit(done);
                continue;
            }
            let edge_id = outgoing[top.next_edge];
            top.next_edge += 1;
            let from = top.node;

            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            let to = edge.end();
            let Some(to_slot) = graph.slot_of(to) else {
                continue;
            };
            if visited[to_slot] {
                visitor.cross_edge(from, to, edge_id);
            } else {
                visited[to_slot] = true;
                visitor.pre_visit(to);
                stack.push(StackFrame {
                    node: to,
                    next_edge: 0,
                });
            }
        }
    }
}
