//! Alignment strategies: rewrite a second motion so it continues from a
//! splice point on a first motion.
//!
//! The splice point is frame `first.len() - frames` of the first motion. Both
//! strategies return a new clip with the second motion's name, layout, joints
//! and timestamps; the inputs are never modified.

use motion_clip_core::math::{quat_from_rpy, quat_to_rpy, vec3_add, vec3_sub, Vec3};
use motion_clip_core::MotionClip;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

pub trait Alignment {
    fn align(&self, first: &MotionClip, second: &MotionClip, frames: usize) -> Result<MotionClip>;
}

/// Shift every root translation of the second motion so its first frame sits
/// on the splice point. Rotations are untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TranslationAlignment;

/// Translation alignment plus a yaw correction of the root joint.
///
/// Only yaw is matched: roll and pitch of the second motion are kept as
/// recorded, so a second motion starting tilted stays tilted. Existing
/// graphs were built with this behavior and their numeric output depends on
/// it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FullAlignment;

/// Serializable selector for the built-in strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentKind {
    Translation,
    #[default]
    Full,
}

impl Alignment for AlignmentKind {
    fn align(&self, first: &MotionClip, second: &MotionClip, frames: usize) -> Result<MotionClip> {
        match self {
            AlignmentKind::Translation => TranslationAlignment.align(first, second, frames),
            AlignmentKind::Full => FullAlignment.align(first, second, frames),
        }
    }
}

fn splice_index(first: &MotionClip, second: &MotionClip, frames: usize, context: &str) -> Result<usize> {
    if first.is_empty() {
        return Err(GraphError::empty_motion(first.name(), context));
    }
    if second.is_empty() {
        return Err(GraphError::empty_motion(second.name(), context));
    }
    if frames == 0 || frames > first.frame_count() {
        return Err(GraphError::SelectionOutOfRange {
            selection: format!("splice {frames} frames from the end"),
            first_len: first.frame_count(),
            second_len: second.frame_count(),
        });
    }
    Ok(first.frame_count() - frames)
}

/// Offset that moves the second motion's first translation onto the splice
/// point, or `None` when neither layout carries translation.
fn translation_offset(first: &MotionClip, second: &MotionClip, splice: usize) -> Result<Option<Vec3>> {
    if !first.layout().has_translation() && !second.layout().has_translation() {
        return Ok(None);
    }
    let target = first.translation(splice)?;
    let origin = second.translation(0)?;
    Ok(Some(vec3_sub(target, origin)))
}

fn apply_translation(channels: &mut [f32], offset: Vec3) {
    let moved = vec3_add([channels[0], channels[1], channels[2]], offset);
    channels[..3].copy_from_slice(&moved);
}

impl Alignment for TranslationAlignment {
    fn align(&self, first: &MotionClip, second: &MotionClip, frames: usize) -> Result<MotionClip> {
        let splice = splice_index(first, second, frames, "translation alignment")?;
        let mut out = second.frames().to_vec();
        if let Some(offset) = translation_offset(first, second, splice)? {
            for frame in &mut out {
                apply_translation(&mut frame.channels, offset);
            }
        }
        Ok(second.with_frames(out)?)
    }
}

impl Alignment for FullAlignment {
    fn align(&self, first: &MotionClip, second: &MotionClip, frames: usize) -> Result<MotionClip> {
        let splice = splice_index(first, second, frames, "full alignment")?;
        let offset = translation_offset(first, second, splice)?;

        let (_, _, target_yaw) = quat_to_rpy(first.root_rotation(splice)?);
        let (_, _, start_yaw) = quat_to_rpy(second.root_rotation(0)?);
        let delta = target_yaw - start_yaw;

        let root = second.layout().rotation_offset();
        let mut out = second.frames().to_vec();
        for frame in &mut out {
            if let Some(offset) = offset {
                apply_translation(&mut frame.channels, offset);
            }
            let c = &mut frame.channels;
            let (roll, pitch, yaw) = quat_to_rpy([c[root], c[root + 1], c[root + 2], c[root + 3]]);
            let q = quat_from_rpy(roll, pitch, yaw + delta);
            c[root..root + 4].copy_from_slice(&q);
        }
        Ok(second.with_frames(out)?)
    }
}
