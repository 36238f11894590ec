use serde::{Deserialize, Serialize};

use super::scc::SccDag;
use crate::graph::Graph;

/// Size summary of a graph and its condensation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub components: usize,
    pub sinks: usize,
    pub largest_component: usize,
}

impl GraphStats {
    pub fn collect<E>(graph: &Graph<E>, dag: &SccDag) -> Self {
        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            components: dag.len(),
            sinks: dag.sinks().len(),
            largest_component: dag.components().iter().map(|c| c.len()).max().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::strongly_connected_components;
    use super::super::test_graphs::*;
    use super::*;

    #[test]
    fn counts() {
        let g = cycle_with_tail(&[A, B, C, D]);
        let dag = strongly_connected_components(&g);
        let stats = GraphStats::collect(&g, &dag);
        assert_eq!(
            stats,
            GraphStats {
                nodes: 4,
                edges: 4,
                components: 3,
                sinks: 1,
                largest_component: 2,
            }
        );
    }
}
