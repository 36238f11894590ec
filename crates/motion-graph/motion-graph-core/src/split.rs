//! Cutting long captures into edge-sized clips.

use motion_clip_core::MotionClip;

use crate::error::{GraphError, Result};

/// Split `clip` into `floor(duration / threshold)` contiguous,
/// non-overlapping pieces by frame index, the last piece absorbing the
/// remainder. Clips not longer than `threshold` come back whole as a single
/// element. Piece count never exceeds the frame count.
pub fn split_clip(clip: &MotionClip, threshold: f32) -> Result<Vec<MotionClip>> {
    if !(threshold.is_finite() && threshold > 0.0) {
        return Err(GraphError::InvalidConfig {
            reason: format!("split threshold must be positive and finite, got {threshold}"),
        });
    }
    let duration = clip.duration();
    if duration <= threshold {
        return Ok(vec![clip.clone()]);
    }

    let len = clip.frame_count();
    let parts = ((duration / threshold).floor() as usize).clamp(1, len.max(1));
    if parts == 1 {
        return Ok(vec![clip.clone()]);
    }
    let size = len / parts;
    let mut pieces = Vec::with_capacity(parts);
    for i in 0..parts {
        let start = i * size;
        let end = if i + 1 == parts { len } else { start + size };
        pieces.push(clip.sub_range(start, end)?);
    }
    Ok(pieces)
}
