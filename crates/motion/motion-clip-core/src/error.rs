//! Error types for motion clip construction and slicing

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ClipError {
    /// A frame carries the wrong number of channel values for the layout
    #[error("Frame {frame} has {actual} channels, layout '{layout}' expects {expected}")]
    ChannelCount {
        frame: usize,
        layout: String,
        expected: usize,
        actual: usize,
    },

    /// Frame timestamps must be non-decreasing
    #[error("Frame {frame} time {time} precedes previous time {previous}")]
    NonMonotonicTime {
        frame: usize,
        time: f32,
        previous: f32,
    },

    /// The clip has no frames but the operation needs at least one
    #[error("Motion clip '{name}' has no frames")]
    EmptyClip { name: String },

    /// A frame index lies outside the clip
    #[error("Frame {frame} is out of range for clip of {len} frames")]
    FrameOutOfRange { frame: usize, len: usize },

    /// Sub-range extraction produced nothing
    #[error("Empty frame range [{start}, {end})")]
    EmptyRange { start: usize, end: usize },

    /// Time window does not overlap the clip
    #[error("Time window [{start}, {end}] is outside clip span [{clip_start}, {clip_end}]")]
    TimeOutOfRange {
        start: f32,
        end: f32,
        clip_start: f32,
        clip_end: f32,
    },

    /// The layout has no channels of the requested kind
    #[error("Layout '{layout}' has no {what} channels")]
    MissingChannels { layout: String, what: String },

    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl ClipError {
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::ChannelCount { .. } | Self::NonMonotonicTime { .. } => "validation",
            Self::EmptyClip { .. }
            | Self::FrameOutOfRange { .. }
            | Self::EmptyRange { .. }
            | Self::TimeOutOfRange { .. } => "range",
            Self::MissingChannels { .. } => "layout",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for ClipError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
