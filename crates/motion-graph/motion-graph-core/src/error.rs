//! Error types for motion graph construction, analysis and persistence

use motion_clip_core::ClipError;

use crate::ids::{EdgeId, NodeId};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GraphError {
    #[error("Node not found: {id}")]
    NodeNotFound { id: NodeId },

    #[error("Edge not found: {id}")]
    EdgeNotFound { id: EdgeId },

    #[error("Duplicate node id: {id}")]
    DuplicateNode { id: NodeId },

    #[error("Duplicate edge id: {id}")]
    DuplicateEdge { id: EdgeId },

    /// A distance or alignment input has no frames
    #[error("Motion '{name}' has no frames ({context})")]
    EmptyMotion { name: String, context: String },

    /// A frame selection reaches outside one of the compared motions
    #[error("Frame selection {selection} is out of range for motions of {first_len} and {second_len} frames")]
    SelectionOutOfRange {
        selection: String,
        first_len: usize,
        second_len: usize,
    },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Malformed persisted graph
    #[error("Parse error: {reason}")]
    Parse { reason: String },

    #[error(transparent)]
    Clip(#[from] ClipError),
}

impl GraphError {
    pub(crate) fn empty_motion(name: &str, context: &str) -> Self {
        Self::EmptyMotion {
            name: name.to_string(),
            context: context.to_string(),
        }
    }

    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::NodeNotFound { .. }
            | Self::EdgeNotFound { .. }
            | Self::DuplicateNode { .. }
            | Self::DuplicateEdge { .. } => "graph",
            Self::EmptyMotion { .. } | Self::SelectionOutOfRange { .. } => "precondition",
            Self::InvalidConfig { .. } => "config",
            Self::Parse { .. } => "serialization",
            Self::Clip(_) => "clip",
        }
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        assert_eq!(
            GraphError::NodeNotFound { id: NodeId(3) }.category(),
            "graph"
        );
        assert_eq!(
            GraphError::empty_motion("walk", "weighted distance").category(),
            "precondition"
        );
        let clip: GraphError = ClipError::EmptyRange { start: 1, end: 1 }.into();
        assert_eq!(clip.category(), "clip");
    }

    #[test]
    fn display_names_the_motion() {
        let err = GraphError::empty_motion("walk", "translation alignment");
        assert_eq!(
            err.to_string(),
            "Motion 'walk' has no frames (translation alignment)"
        );
    }
}
