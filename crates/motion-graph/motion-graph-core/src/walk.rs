//! Traversal of a built graph as a stream of edges.

use hashbrown::HashMap;
use motion_clip_core::{Frame, MotionClip};

use crate::error::{GraphError, Result};
use crate::graph::{Edge, Graph};
use crate::ids::{EdgeId, NodeId};

/// Picks the next edge out of `node`. `outgoing` is never empty.
pub trait TransitionChooser {
    fn choose(&mut self, node: NodeId, outgoing: &[EdgeId]) -> Option<EdgeId>;
}

/// Always the first stored outgoing edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstEdge;

impl TransitionChooser for FirstEdge {
    fn choose(&mut self, _node: NodeId, outgoing: &[EdgeId]) -> Option<EdgeId> {
        outgoing.first().copied()
    }
}

/// Cycles through each node's outgoing edges on successive visits.
#[derive(Clone, Debug, Default)]
pub struct RoundRobin {
    cursor: HashMap<NodeId, usize>,
}

impl TransitionChooser for RoundRobin {
    fn choose(&mut self, node: NodeId, outgoing: &[EdgeId]) -> Option<EdgeId> {
        let slot = self.cursor.entry(node).or_insert(0);
        let pick = outgoing.get(*slot % outgoing.len()).copied();
        *slot = slot.wrapping_add(1);
        pick
    }
}

/// Iterator over edges chosen one after another from a start node. Ends
/// only at a node without outgoing edges.
pub struct GraphWalker<'g, E, C> {
    graph: &'g Graph<E>,
    current: NodeId,
    chooser: C,
}

impl<'g, E, C: TransitionChooser> GraphWalker<'g, E, C> {
    pub fn new(graph: &'g Graph<E>, start: NodeId, chooser: C) -> Result<Self> {
        if !graph.contains_node(start) {
            return Err(GraphError::NodeNotFound { id: start });
        }
        Ok(Self {
            graph,
            current: start,
            chooser,
        })
    }

    pub fn current(&self) -> NodeId {
        self.current
    }
}

impl<'g, E, C: TransitionChooser> Iterator for GraphWalker<'g, E, C> {
    type Item = &'g Edge<E>;

    fn next(&mut self) -> Option<Self::Item> {
        let outgoing = self.graph.outgoing(self.current);
        if outgoing.is_empty() {
            return None;
        }
        let id = self.chooser.choose(self.current, outgoing)?;
        let edge = self.graph.edge(id)?;
        self.current = edge.end();
        Some(edge)
    }
}

impl<'g, C: TransitionChooser> GraphWalker<'g, MotionClip, C> {
    /// Concatenate the motions of the next `steps` edges into one clip with
    /// continuous timestamps: each clip starts one of its own frame intervals
    /// after the previous one ends. `None` if no edge could be taken.
    pub fn walk_motion(&mut self, steps: usize) -> Result<Option<MotionClip>> {
        let mut template: Option<&MotionClip> = None;
        let mut frames: Vec<Frame> = Vec::new();
        let mut cursor = 0.0f32;

        for edge in self.by_ref().take(steps) {
            let clip = edge.payload();
            if clip.is_empty() {
                continue;
            }
            template.get_or_insert(clip);
            let shift = cursor - clip.start_time();
            frames.extend(
                clip.frames()
                    .iter()
                    .map(|f| Frame::new(f.time + shift, f.channels.clone())),
            );
            let interval = if clip.frame_count() > 1 {
                clip.duration() / (clip.frame_count() - 1) as f32
            } else {
                0.0
            };
            cursor = clip.end_time() + shift + interval;
        }

        match template {
            Some(t) => Ok(Some(
                MotionClip::new("walk", t.layout(), t.joints().to_vec(), frames)?,
            )),
            None => Ok(None),
        }
    }
}
