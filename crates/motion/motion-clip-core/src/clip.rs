//! Motion clip container: an ordered, time-stamped sequence of skeletal
//! configurations sharing one channel layout and joint list.

use serde::{Deserialize, Serialize};

use crate::error::ClipError;
use crate::math::{Quat, Vec3};

/// Encoded transform type of every frame in a clip.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelLayout {
    /// One quaternion `[x, y, z, w]` per joint.
    Rotations,
    /// Root translation `[x, y, z]` followed by one quaternion per joint.
    RootTranslationRotations,
}

impl ChannelLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelLayout::Rotations => "rotations",
            ChannelLayout::RootTranslationRotations => "root_translation_rotations",
        }
    }

    #[inline]
    pub fn has_translation(&self) -> bool {
        matches!(self, ChannelLayout::RootTranslationRotations)
    }

    /// Index of the first rotation channel (skips root translation if present).
    #[inline]
    pub fn rotation_offset(&self) -> usize {
        if self.has_translation() {
            3
        } else {
            0
        }
    }

    pub fn channel_count(&self, joints: usize) -> usize {
        self.rotation_offset() + 4 * joints
    }
}

impl std::fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sampled configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Frame {
    /// Seconds.
    pub time: f32,
    pub channels: Vec<f32>,
}

impl Frame {
    pub fn new(time: f32, channels: Vec<f32>) -> Self {
        Self { time, channels }
    }
}

/// A validated motion clip. The first joint id is the root joint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ClipRepr", into = "ClipRepr")]
pub struct MotionClip {
    name: String,
    layout: ChannelLayout,
    joints: Vec<String>,
    frames: Vec<Frame>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClipRepr {
    name: String,
    layout: ChannelLayout,
    joints: Vec<String>,
    frames: Vec<Frame>,
}

impl TryFrom<ClipRepr> for MotionClip {
    type Error = ClipError;

    fn try_from(repr: ClipRepr) -> Result<Self, Self::Error> {
        MotionClip::new(repr.name, repr.layout, repr.joints, repr.frames)
    }
}

impl From<MotionClip> for ClipRepr {
    fn from(clip: MotionClip) -> Self {
        ClipRepr {
            name: clip.name,
            layout: clip.layout,
            joints: clip.joints,
            frames: clip.frames,
        }
    }
}

impl MotionClip {
    /// Validate channel counts and timestamp ordering. An empty frame list is
    /// accepted; operations that need frames check for it themselves.
    pub fn new(
        name: impl Into<String>,
        layout: ChannelLayout,
        joints: Vec<String>,
        frames: Vec<Frame>,
    ) -> Result<Self, ClipError> {
        let expected = layout.channel_count(joints.len());
        let mut previous = f32::NEG_INFINITY;
        for (i, frame) in frames.iter().enumerate() {
            if frame.channels.len() != expected {
                return Err(ClipError::ChannelCount {
                    frame: i,
                    layout: layout.as_str().to_string(),
                    expected,
                    actual: frame.channels.len(),
                });
            }
            if !(frame.time >= previous) {
                return Err(ClipError::NonMonotonicTime {
                    frame: i,
                    time: frame.time,
                    previous,
                });
            }
            previous = frame.time;
        }
        Ok(Self {
            name: name.into(),
            layout,
            joints,
            frames,
        })
    }

    pub fn from_json_str(s: &str) -> Result<Self, ClipError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_string(&self) -> Result<String, ClipError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    pub fn joints(&self) -> &[String] {
        &self.joints
    }

    pub fn root_joint(&self) -> Option<&str> {
        self.joints.first().map(String::as_str)
    }

    pub fn joint_index(&self, name: &str) -> Option<usize> {
        self.joints.iter().position(|j| j == name)
    }

    pub fn channel_count(&self) -> usize {
        self.layout.channel_count(self.joints.len())
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Fails fast on an empty clip.
    pub fn ensure_frames(&self) -> Result<(), ClipError> {
        if self.frames.is_empty() {
            Err(ClipError::EmptyClip {
                name: self.name.clone(),
            })
        } else {
            Ok(())
        }
    }

    pub fn frame(&self, index: usize) -> Result<&Frame, ClipError> {
        self.frames.get(index).ok_or(ClipError::FrameOutOfRange {
            frame: index,
            len: self.frames.len(),
        })
    }

    /// Time of the first frame, `0.0` for an empty clip.
    pub fn start_time(&self) -> f32 {
        self.frames.first().map(|f| f.time).unwrap_or(0.0)
    }

    /// Time of the last frame, `0.0` for an empty clip.
    pub fn end_time(&self) -> f32 {
        self.frames.last().map(|f| f.time).unwrap_or(0.0)
    }

    pub fn duration(&self) -> f32 {
        self.end_time() - self.start_time()
    }

    pub fn translation(&self, index: usize) -> Result<Vec3, ClipError> {
        if !self.layout.has_translation() {
            return Err(ClipError::MissingChannels {
                layout: self.layout.as_str().to_string(),
                what: "translation".into(),
            });
        }
        let c = &self.frame(index)?.channels;
        Ok([c[0], c[1], c[2]])
    }

    /// Rotation of `joint` (index into [`MotionClip::joints`]) at `index`.
    pub fn rotation(&self, index: usize, joint: usize) -> Result<Quat, ClipError> {
        if joint >= self.joints.len() {
            return Err(ClipError::MissingChannels {
                layout: self.layout.as_str().to_string(),
                what: format!("joint {joint} rotation"),
            });
        }
        let c = &self.frame(index)?.channels;
        let o = self.layout.rotation_offset() + 4 * joint;
        Ok([c[o], c[o + 1], c[o + 2], c[o + 3]])
    }

    pub fn root_rotation(&self, index: usize) -> Result<Quat, ClipError> {
        self.rotation(index, 0)
    }

    /// Frames `[start, end)` as a new clip.
    pub fn sub_range(&self, start: usize, end: usize) -> Result<MotionClip, ClipError> {
        if end > self.frames.len() {
            return Err(ClipError::FrameOutOfRange {
                frame: end,
                len: self.frames.len(),
            });
        }
        if start >= end {
            return Err(ClipError::EmptyRange { start, end });
        }
        Ok(MotionClip {
            name: format!("{}[{}..{}]", self.name, start, end),
            layout: self.layout,
            joints: self.joints.clone(),
            frames: self.frames[start..end].to_vec(),
        })
    }

    /// Frames whose time lies in `[start, end]` as a new clip.
    pub fn sub_range_by_time(&self, start: f32, end: f32) -> Result<MotionClip, ClipError> {
        let first = self.frames.iter().position(|f| f.time >= start);
        let last = self.frames.iter().rposition(|f| f.time <= end);
        match (first, last) {
            (Some(a), Some(b)) if a <= b => self.sub_range(a, b + 1),
            _ => Err(ClipError::TimeOutOfRange {
                start,
                end,
                clip_start: self.start_time(),
                clip_end: self.end_time(),
            }),
        }
    }

    /// A clip with this clip's layout and joints but different frames.
    pub fn with_frames(&self, frames: Vec<Frame>) -> Result<MotionClip, ClipError> {
        MotionClip::new(self.name.clone(), self.layout, self.joints.clone(), frames)
    }
}
