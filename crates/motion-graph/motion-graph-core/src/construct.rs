//! Motion graph construction pipeline.
//!
//! captures -> split into pieces -> one edge per piece (pieces of one capture
//! chained through shared nodes) -> scored transitions between piece
//! boundaries -> aligned transition edges -> sink pruning.
//!
//! A transition `a -> b` leaves the end node of `a`. Its payload is `b`
//! spliced onto the last frame of `a`, so playing `a` and then the transition
//! never moves the root backwards. The window only decides which frames are
//! scored.

use log::{debug, info, warn};
use motion_clip_core::MotionClip;
use serde::{Deserialize, Serialize};

use crate::align::{Alignment, AlignmentKind};
use crate::analysis::{prune_sink_components, strongly_connected_components, GraphStats};
use crate::config::BuildConfig;
use crate::error::Result;
use crate::graph::MotionGraph;
use crate::ids::{EdgeId, NodeId};
use crate::metrics::{boundary_equal, Distance, FrameSelection, WeightedDistance};
use crate::split::split_clip;

/// Counters describing one [`MotionGraphBuilder::build`] run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    pub captures: usize,
    pub skipped_captures: usize,
    pub pieces: usize,
    pub candidates: usize,
    pub accepted_equal: usize,
    pub accepted_by_distance: usize,
    pub pruned: Vec<NodeId>,
    pub stats: GraphStats,
}

impl BuildReport {
    pub fn transitions(&self) -> usize {
        self.accepted_equal + self.accepted_by_distance
    }
}

#[derive(Clone, Copy, Debug)]
struct Piece {
    edge: EdgeId,
    start: NodeId,
    end: NodeId,
}

pub struct MotionGraphBuilder<D = WeightedDistance, A = AlignmentKind> {
    config: BuildConfig,
    distance: D,
    alignment: A,
}

impl MotionGraphBuilder {
    /// Builder using the weighted distance and alignment named by `config`.
    pub fn new(config: BuildConfig) -> Result<Self> {
        let distance = WeightedDistance::new(config.weights.clone());
        let alignment = config.alignment;
        Self::with_strategies(config, distance, alignment)
    }
}

impl<D: Distance, A: Alignment> MotionGraphBuilder<D, A> {
    pub fn with_strategies(config: BuildConfig, distance: D, alignment: A) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            distance,
            alignment,
        })
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn build(&self, captures: &[MotionClip]) -> Result<(MotionGraph, BuildReport)> {
        let mut graph = MotionGraph::new();
        let mut report = BuildReport {
            captures: captures.len(),
            ..Default::default()
        };

        let pieces = self.add_pieces(&mut graph, captures, &mut report)?;
        self.add_transitions(&mut graph, &pieces, &mut report)?;

        report.pruned = prune_sink_components(&mut graph, self.config.prune_threshold);
        let dag = strongly_connected_components(&graph);
        report.stats = GraphStats::collect(&graph, &dag);

        info!(
            "motion graph built: {} pieces, {} transitions, {} nodes pruned, {} nodes / {} edges remain",
            report.pieces,
            report.transitions(),
            report.pruned.len(),
            report.stats.nodes,
            report.stats.edges
        );
        Ok((graph, report))
    }

    fn add_pieces(
        &self,
        graph: &mut MotionGraph,
        captures: &[MotionClip],
        report: &mut BuildReport,
    ) -> Result<Vec<Piece>> {
        let mut pieces = Vec::new();
        for capture in captures {
            if capture.is_empty() {
                warn!("skipping capture '{}': no frames", capture.name());
                report.skipped_captures += 1;
                continue;
            }
            let mut start = graph.new_node();
            for clip in split_clip(capture, self.config.split_duration)? {
                let end = graph.new_node();
                let edge = graph.connect(start, end, clip)?;
                pieces.push(Piece { edge, start, end });
                start = end;
            }
        }
        report.pieces = pieces.len();
        Ok(pieces)
    }

    fn add_transitions(
        &self,
        graph: &mut MotionGraph,
        pieces: &[Piece],
        report: &mut BuildReport,
    ) -> Result<()> {
        let mut accepted: Vec<(NodeId, NodeId, MotionClip)> = Vec::new();
        for a in pieces {
            for b in pieces {
                // already continuous, or the same piece
                if a.end == b.start || a.end == b.end {
                    continue;
                }
                let (Some(first), Some(second)) = (graph.edge(a.edge), graph.edge(b.edge)) else {
                    continue;
                };
                let (first, second) = (first.payload(), second.payload());
                if first.layout() != second.layout() {
                    warn!(
                        "skipping transition {} -> {}: layouts {} and {} differ",
                        first.name(),
                        second.name(),
                        first.layout(),
                        second.layout()
                    );
                    continue;
                }
                report.candidates += 1;

                let window = self
                    .config
                    .transition_window
                    .min(first.frame_count())
                    .min(second.frame_count());
                if self.config.accept_equal_boundaries && boundary_equal(first, second) {
                    report.accepted_equal += 1;
                } else {
                    let d = self
                        .distance
                        .distance(first, second, FrameSelection::Window(window))?;
                    if d > self.config.distance_threshold {
                        continue;
                    }
                    report.accepted_by_distance += 1;
                    debug!(
                        "transition {} -> {} accepted at distance {d:.4}",
                        first.name(),
                        second.name()
                    );
                }
                // the edge leaves `a.end`, so `second` starts on `first`'s last frame
                let aligned = self.alignment.align(first, second, 1)?;
                accepted.push((a.end, b.end, aligned));
            }
        }
        for (start, end, clip) in accepted {
            graph.connect(start, end, clip)?;
        }
        Ok(())
    }
}
