//! Removal of small dead-end clusters.

use log::debug;

use super::scc::strongly_connected_components;
use crate::graph::Graph;
use crate::ids::NodeId;

/// Repeatedly delete every sink component with fewer than `threshold` nodes
/// until a full pass removes nothing. The condensation is rebuilt each round
/// because removing a sink can turn its predecessors into new sinks.
///
/// Returns the removed node ids in removal order. A `threshold` of 0 or 1
/// never removes anything.
pub fn prune_sink_components<E>(graph: &mut Graph<E>, threshold: usize) -> Vec<NodeId> {
    let mut removed = Vec::new();
    let mut round = 0usize;
    loop {
        round += 1;
        let dag = strongly_connected_components(graph);
        let doomed: Vec<NodeId> = dag
            .sinks()
            .into_iter()
            .filter_map(|id| dag.component(id))
            .filter(|c| c.len() < threshold)
            .flat_map(|c| c.members().iter().copied())
            .collect();

        debug!(
            "prune round {round}: {} components, {} nodes in small sinks",
            dag.len(),
            doomed.len()
        );
        if doomed.is_empty() {
            break;
        }
        graph.remove_nodes(&doomed);
        removed.extend(doomed);
    }
    removed
}
