use motion_graph_core::{
    connected_components, post_order, prune_sink_components, reverse,
    strongly_connected_components, EdgeId, EdgeSpec, Graph, NodeId,
};

const A: NodeId = NodeId(100);
const B: NodeId = NodeId(200);
const C: NodeId = NodeId(300);
const D: NodeId = NodeId(400);

fn graph(nodes: &[NodeId], edges: &[(NodeId, NodeId)]) -> Graph<()> {
    Graph::from_parts(
        edges.iter().enumerate().map(|(i, (s, e))| EdgeSpec {
            id: EdgeId(i as u32 + 1),
            start: *s,
            end: *e,
            payload: (),
        }),
        nodes.iter().copied(),
    )
    .unwrap()
}

/// A -> B -> A plus the pendant path B -> C -> D.
fn cycle_with_tail(nodes: &[NodeId]) -> Graph<()> {
    graph(nodes, &[(A, B), (B, A), (B, C), (C, D)])
}

#[test]
fn component_labels_separate_tail_when_searched_first() {
    let g = cycle_with_tail(&[D, C, B, A]);
    let labels = connected_components(&g);
    assert_eq!(labels.len(), 4);
    assert_eq!(labels[&A], labels[&B]);
    assert_ne!(labels[&D], labels[&A]);
}

#[test]
fn one_direction_under_approximates_weak_connectivity() {
    // 1 -> 2 <- 3, searched from the shared target first
    let g = graph(
        &[NodeId(2), NodeId(1), NodeId(3)],
        &[(NodeId(1), NodeId(2)), (NodeId(3), NodeId(2))],
    );
    let forward = connected_components(&g);
    assert_ne!(forward[&NodeId(1)], forward[&NodeId(2)]);
    assert_ne!(forward[&NodeId(1)], forward[&NodeId(3)]);

    let backward = connected_components(&reverse(&g));
    assert_eq!(backward[&NodeId(1)], backward[&NodeId(2)]);
    assert_eq!(backward[&NodeId(3)], backward[&NodeId(2)]);
}

#[test]
fn post_order_parents_after_children() {
    let g = cycle_with_tail(&[A, B, C, D]);
    let post = post_order(&g);
    assert!(post[&A] > post[&C]);
    assert!(post[&C] > post[&D]);
}

#[test]
fn reverse_twice_restores_adjacency() {
    let g = cycle_with_tail(&[A, B, C, D]);
    let rr = reverse(&reverse(&g));
    assert_eq!(rr.node_ids(), g.node_ids());
    assert_eq!(rr.edge_count(), g.edge_count());
    for node in g.nodes() {
        assert_eq!(rr.outgoing(node.id()), node.outgoing());
        assert_eq!(rr.incoming(node.id()), node.incoming());
    }
    for edge in g.edges() {
        let back = rr.edge(edge.id()).unwrap();
        assert_eq!(back.start(), edge.start());
        assert_eq!(back.end(), edge.end());
    }
}

#[test]
fn scc_condensation_of_cycle_with_tail() {
    for order in [[A, B, C, D], [D, C, B, A], [C, A, D, B]] {
        let g = cycle_with_tail(&order);
        let dag = strongly_connected_components(&g);
        assert_eq!(dag.len(), 3, "order {order:?}");
        let ab = dag.component_of(A).unwrap();
        assert_eq!(dag.component_of(B), Some(ab));
        let c = dag.component_of(C).unwrap();
        let d = dag.component_of(D).unwrap();
        let edges: Vec<_> = dag.edges().collect();
        assert_eq!(edges.len(), 2);
        assert!(edges.contains(&(ab, c)));
        assert!(edges.contains(&(c, d)));
    }
}

#[test]
fn pruning_is_idempotent() {
    let mut g = graph(
        &[A, B, C, D, NodeId(500), NodeId(600)],
        &[
            (A, B),
            (B, A),
            (B, C),
            (C, D),
            (D, C),
            (A, NodeId(500)),
            (NodeId(500), NodeId(600)),
        ],
    );
    let removed = prune_sink_components(&mut g, 2);
    assert_eq!(removed, vec![NodeId(600), NodeId(500)]);
    assert!(g.is_consistent());

    let before = g.node_ids();
    let edges = g.edge_count();
    assert!(prune_sink_components(&mut g, 2).is_empty());
    assert_eq!(g.node_ids(), before);
    assert_eq!(g.edge_count(), edges);

    let dag = strongly_connected_components(&g);
    for sink in dag.sinks() {
        assert!(dag.component(sink).unwrap().len() >= 2);
    }
}
