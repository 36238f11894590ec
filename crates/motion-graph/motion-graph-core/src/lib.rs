//! Motion graph core: turns independently captured motion clips into a
//! directed graph whose walks play as one continuous motion.
//!
//! The pieces, bottom up:
//! - [`graph`]: arena-backed nodes and edges with motion payloads.
//! - [`dfs`]: depth-first traversal with visitor hooks.
//! - [`analysis`]: reversal, reachability clusters, post-order, SCCs and
//!   sink pruning.
//! - [`metrics`] / [`weights`]: transition scoring.
//! - [`align`]: stitching a motion onto another at a splice point.
//! - [`split`]: cutting long captures into edge-sized clips.
//! - [`construct`]: the end-to-end build pipeline.

pub mod align;
pub mod analysis;
pub mod config;
pub mod construct;
pub mod dfs;
pub mod error;
pub mod graph;
pub mod ids;
pub mod metrics;
pub mod split;
pub mod store;
pub mod walk;
pub mod weights;

// Re-exports for consumers
pub use align::{Alignment, AlignmentKind, FullAlignment, TranslationAlignment};
pub use analysis::{
    connected_components, post_order, prune_sink_components, reverse,
    strongly_connected_components, GraphStats, SccDag, SccId, SccNode,
};
pub use config::BuildConfig;
pub use construct::{BuildReport, MotionGraphBuilder};
pub use dfs::{depth_first, DfsVisitor};
pub use error::GraphError;
pub use graph::{Edge, EdgeSpec, Graph, MotionGraph, Node};
pub use ids::{EdgeId, IdAllocator, NodeId};
pub use metrics::{boundary_equal, Distance, FrameSelection, WeightedDistance};
pub use split::split_clip;
pub use store::{export_motion_graph_json, parse_motion_graph_json};
pub use walk::{FirstEdge, GraphWalker, RoundRobin, TransitionChooser};
pub use weights::{normalize_joint_name, WeightMap};
pub use motion_clip_core::{ChannelLayout, Frame, MotionClip};
