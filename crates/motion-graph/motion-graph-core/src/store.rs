use motion_clip_core::MotionClip;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::{EdgeSpec, MotionGraph};
use crate::ids::{EdgeId, NodeId};

/// Public API: parse a stored motion graph
/// (`{ "nodes"?: [id], "edges": [{ id, start, end, motion }] }`) into a
/// [`MotionGraph`].
///
/// Notes:
/// - Unknown fields at any level are a parse error; nothing is recovered.
/// - Nodes referenced by edges but absent from `nodes` are synthesized.
/// - Edge order in the file becomes edge order in the graph, and with it the
///   traversal order of each node's outgoing edges.
pub fn parse_motion_graph_json(s: &str) -> Result<MotionGraph> {
    let stored: StoredMotionGraph = serde_json::from_str(s)?;
    let edges = stored.edges.into_iter().map(|e| EdgeSpec {
        id: e.id,
        start: e.start,
        end: e.end,
        payload: e.motion,
    });
    MotionGraph::from_parts(edges, stored.nodes)
}

/// Serialize `graph` in the format read by [`parse_motion_graph_json`].
pub fn export_motion_graph_json(graph: &MotionGraph) -> Result<String> {
    let out = StoredMotionGraphRef {
        nodes: graph.node_ids(),
        edges: graph
            .edges()
            .map(|e| StoredEdgeRef {
                id: e.id(),
                start: e.start(),
                end: e.end(),
                motion: e.payload(),
            })
            .collect(),
    };
    Ok(serde_json::to_string(&out)?)
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredMotionGraph {
    #[serde(default)]
    nodes: Vec<NodeId>,
    edges: Vec<StoredEdge>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredEdge {
    id: EdgeId,
    start: NodeId,
    end: NodeId,
    motion: MotionClip,
}

#[derive(Serialize)]
struct StoredMotionGraphRef<'a> {
    nodes: Vec<NodeId>,
    edges: Vec<StoredEdgeRef<'a>>,
}

#[derive(Serialize)]
struct StoredEdgeRef<'a> {
    id: EdgeId,
    start: NodeId,
    end: NodeId,
    motion: &'a MotionClip,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    const GRAPH: &str = r#"{
      "edges": [
        { "id": 10, "start": 1, "end": 2, "motion": {
            "name": "a", "layout": "rotations", "joints": ["root"],
            "frames": [{ "time": 0.0, "channels": [0, 0, 0, 1] }] } },
        { "id": 11, "start": 2, "end": 1, "motion": {
            "name": "b", "layout": "rotations", "joints": ["root"],
            "frames": [{ "time": 0.0, "channels": [0, 0, 0, 1] }] } }
      ]
    }"#;

    #[test]
    fn parse_synthesizes_nodes() {
        let g = parse_motion_graph_json(GRAPH).unwrap();
        assert_eq!(g.node_ids(), vec![NodeId(1), NodeId(2)]);
        assert_eq!(g.edge(EdgeId(11)).unwrap().payload().name(), "b");
        assert!(g.is_consistent());
    }

    #[test]
    fn unknown_elements_are_fatal() {
        let bad = GRAPH.replacen("\"edges\"", "\"extra\": [], \"edges\"", 1);
        assert!(matches!(
            parse_motion_graph_json(&bad),
            Err(GraphError::Parse { .. })
        ));
        let bad_edge = GRAPH.replacen("\"id\": 10,", "\"id\": 10, \"weight\": 1,", 1);
        assert!(parse_motion_graph_json(&bad_edge).is_err());
    }

    #[test]
    fn export_then_parse_keeps_isolated_nodes() {
        let mut g = parse_motion_graph_json(GRAPH).unwrap();
        g.add_node(NodeId(7)).unwrap();
        let json = export_motion_graph_json(&g).unwrap();
        let back = parse_motion_graph_json(&json).unwrap();
        assert_eq!(back.node_ids(), g.node_ids());
        assert_eq!(back.edge_count(), 2);
        assert_eq!(
            back.edge(EdgeId(10)).unwrap().payload(),
            g.edge(EdgeId(10)).unwrap().payload()
        );
    }
}
