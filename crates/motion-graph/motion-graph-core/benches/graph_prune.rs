//! SCC condensation and sink pruning over synthetic topologies.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use motion_graph_core::{
    prune_sink_components, strongly_connected_components, EdgeId, EdgeSpec, Graph, NodeId,
};

/// `rings` cycles of `ring_len` nodes, ring `i` feeding ring `i + 1`, plus a
/// dangling tail node hanging off every ring.
fn ringed_chain(rings: u32, ring_len: u32) -> Graph<()> {
    let mut edges = Vec::new();
    let mut next_edge = 0u32;
    let mut push = |edges: &mut Vec<EdgeSpec<()>>, start: u32, end: u32| {
        edges.push(EdgeSpec {
            id: EdgeId(next_edge),
            start: NodeId(start),
            end: NodeId(end),
            payload: (),
        });
        next_edge += 1;
    };
    let stride = ring_len + 1;
    for r in 0..rings {
        let base = r * stride;
        for i in 0..ring_len {
            push(&mut edges, base + i, base + (i + 1) % ring_len);
        }
        // tail
        push(&mut edges, base, base + ring_len);
        if r + 1 < rings {
            push(&mut edges, base + 1, base + stride);
        }
    }
    Graph::from_parts(edges, Vec::new()).expect("well-formed synthetic graph")
}

fn bench_scc(c: &mut Criterion) {
    let mut group = c.benchmark_group("strongly_connected_components");
    for rings in [10u32, 100, 1_000] {
        let graph = ringed_chain(rings, 8);
        group.bench_with_input(BenchmarkId::from_parameter(rings), &graph, |b, g| {
            b.iter(|| black_box(strongly_connected_components(black_box(g))))
        });
    }
    group.finish();
}

fn bench_prune(c: &mut Criterion) {
    let mut group = c.benchmark_group("prune_sink_components");
    for rings in [10u32, 100, 1_000] {
        let graph = ringed_chain(rings, 8);
        group.bench_with_input(BenchmarkId::from_parameter(rings), &graph, |b, g| {
            b.iter_batched(
                || g.clone(),
                |mut g| black_box(prune_sink_components(&mut g, 2)),
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scc, bench_prune);
criterion_main!(benches);
