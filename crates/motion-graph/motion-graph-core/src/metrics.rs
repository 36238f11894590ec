//! Transition scoring: weighted pose distance and boundary equality.

use motion_clip_core::math::quat_distance;
use motion_clip_core::MotionClip;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::weights::WeightMap;

/// Which frames of the two motions get compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameSelection {
    /// One frame pair: `start_frame` counts back from the last frame of the
    /// first motion, `end_frame` counts forward from the first frame of the
    /// second motion.
    Offsets { start_frame: usize, end_frame: usize },
    /// The last `k` frames of the first motion against the first `k` frames
    /// of the second, pairwise in order.
    Window(usize),
}

impl FrameSelection {
    /// `(first_index, second_index)` pairs, checked against both lengths.
    pub fn pairs(&self, first_len: usize, second_len: usize) -> Result<Vec<(usize, usize)>> {
        let out_of_range = || GraphError::SelectionOutOfRange {
            selection: format!("{self:?}"),
            first_len,
            second_len,
        };
        match *self {
            FrameSelection::Offsets {
                start_frame,
                end_frame,
            } => {
                if start_frame >= first_len || end_frame >= second_len {
                    return Err(out_of_range());
                }
                Ok(vec![(first_len - 1 - start_frame, end_frame)])
            }
            FrameSelection::Window(k) => {
                if k == 0 || k > first_len || k > second_len {
                    return Err(out_of_range());
                }
                let base = first_len - k;
                Ok((0..k).map(|i| (base + i, i)).collect())
            }
        }
    }
}

/// Scalar dissimilarity between the tail of one motion and the head of
/// another. Implementations return a non-negative value and fail on empty
/// motions.
pub trait Distance {
    fn distance(
        &self,
        first: &MotionClip,
        second: &MotionClip,
        selection: FrameSelection,
    ) -> Result<f32>;

    /// Legacy single-pair comparison: last frame of `first` against the first
    /// frame of `second`.
    #[deprecated(note = "compare frame windows with `FrameSelection::Window` instead")]
    fn default_frame_distance(&self, first: &MotionClip, second: &MotionClip) -> Result<f32> {
        self.distance(
            first,
            second,
            FrameSelection::Offsets {
                start_frame: 0,
                end_frame: 0,
            },
        )
    }
}

/// Sum over compared frame pairs of the per-joint weighted quaternion
/// distance. Joints are matched by name; joints missing from the second
/// motion or weighing zero contribute nothing. Root translation is ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightedDistance {
    weights: WeightMap,
}

impl WeightedDistance {
    pub fn new(weights: WeightMap) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightMap {
        &self.weights
    }

    /// `(first_joint, second_joint, weight)` for every weighted joint shared
    /// by both motions.
    fn joint_pairs(&self, first: &MotionClip, second: &MotionClip) -> Vec<(usize, usize, f32)> {
        let same_order = first.joints() == second.joints();
        first
            .joints()
            .iter()
            .zip(self.weights.resolve(first.joints()))
            .enumerate()
            .filter_map(|(i, (name, w))| {
                if w == 0.0 {
                    return None;
                }
                let j = if same_order {
                    i
                } else {
                    second.joint_index(name)?
                };
                Some((i, j, w))
            })
            .collect()
    }
}

impl Distance for WeightedDistance {
    fn distance(
        &self,
        first: &MotionClip,
        second: &MotionClip,
        selection: FrameSelection,
    ) -> Result<f32> {
        if first.is_empty() {
            return Err(GraphError::empty_motion(first.name(), "weighted distance"));
        }
        if second.is_empty() {
            return Err(GraphError::empty_motion(second.name(), "weighted distance"));
        }
        let frame_pairs = selection.pairs(first.frame_count(), second.frame_count())?;
        let joints = self.joint_pairs(first, second);

        let mut total = 0.0f32;
        for (fa, fb) in frame_pairs {
            for &(ja, jb, w) in &joints {
                let qa = first.rotation(fa, ja)?;
                let qb = second.rotation(fb, jb)?;
                total += w * quat_distance(qa, qb);
            }
        }
        Ok(total)
    }
}

/// True when the last frame of `first` and the first frame of `second` share
/// the same layout and hold exactly the same rotation for every joint except
/// the root. Layout mismatches and empty motions compare unequal.
pub fn boundary_equal(first: &MotionClip, second: &MotionClip) -> bool {
    if first.layout() != second.layout() || first.channel_count() != second.channel_count() {
        return false;
    }
    let (Some(tail), Some(head)) = (first.frames().last(), second.frames().first()) else {
        return false;
    };
    // skip root translation and the root joint's quaternion
    let skip = (first.layout().rotation_offset() + 4).min(tail.channels.len());
    tail.channels[skip..] == head.channels[skip..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use motion_clip_core::{ChannelLayout, Frame};

    fn joints() -> Vec<String> {
        vec!["HumanoidRoot".into(), "l_hip".into(), "r_knee".into()]
    }

    fn pose(t: f32, root_x: f32, hip_z: f32) -> Frame {
        let hip = motion_clip_core::math::quat_from_rpy(0.0, 0.0, hip_z);
        let mut c = vec![root_x, 0.0, 0.0];
        c.extend_from_slice(&[0.0, 0.0, 0.0, 1.0]);
        c.extend_from_slice(&hip);
        c.extend_from_slice(&[0.0, 0.0, 0.0, 1.0]);
        Frame::new(t, c)
    }

    fn clip(name: &str, hips: &[f32]) -> MotionClip {
        let frames = hips
            .iter()
            .enumerate()
            .map(|(i, h)| pose(i as f32 / 30.0, i as f32, *h))
            .collect();
        MotionClip::new(name, ChannelLayout::RootTranslationRotations, joints(), frames).unwrap()
    }

    #[test]
    fn window_pairs_tail_with_head() {
        let pairs = FrameSelection::Window(3).pairs(5, 4).unwrap();
        assert_eq!(pairs, vec![(2, 0), (3, 1), (4, 2)]);
        assert!(FrameSelection::Window(5).pairs(5, 4).is_err());
        assert!(FrameSelection::Window(0).pairs(5, 4).is_err());
    }

    #[test]
    fn offsets_count_back_from_the_end() {
        let sel = FrameSelection::Offsets {
            start_frame: 1,
            end_frame: 2,
        };
        assert_eq!(sel.pairs(5, 4).unwrap(), vec![(3, 2)]);
        assert!(sel.pairs(1, 4).is_err());
    }

    #[test]
    fn static_pose_has_zero_distance_to_itself() {
        let m = clip("still", &[0.3; 6]);
        let d = WeightedDistance::default();
        for k in 1..=6 {
            assert_eq!(d.distance(&m, &m, FrameSelection::Window(k)).unwrap(), 0.0);
        }
    }

    #[test]
    fn full_window_compares_frames_with_themselves() {
        let m = clip("moving", &[0.0, 0.1, 0.4, 0.9]);
        let d = WeightedDistance::default();
        assert_eq!(d.distance(&m, &m, FrameSelection::Window(4)).unwrap(), 0.0);
        assert!(d.distance(&m, &m, FrameSelection::Window(2)).unwrap() > 0.0);
    }

    #[test]
    fn differing_weighted_joint_is_positive() {
        let a = clip("a", &[0.0, 0.0]);
        let b = clip("b", &[0.5, 0.5]);
        let d = WeightedDistance::default();
        let dist = d.distance(&a, &b, FrameSelection::Window(2)).unwrap();
        assert!(dist > 1e-3);
        // root translation differs between a and b but is never compared
        let mut unweighted = WeightMap::default();
        unweighted.insert("hip", 0.0);
        let d0 = WeightedDistance::new(unweighted);
        assert_eq!(d0.distance(&a, &b, FrameSelection::Window(2)).unwrap(), 0.0);
    }

    #[test]
    #[allow(deprecated)]
    fn legacy_single_frame_mode() {
        let a = clip("a", &[0.0, 0.2]);
        let b = clip("b", &[0.2, 0.7]);
        let d = WeightedDistance::default();
        assert_eq!(d.default_frame_distance(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn empty_motion_fails_fast() {
        let a = clip("a", &[0.0]);
        let empty = MotionClip::new("e", ChannelLayout::RootTranslationRotations, joints(), vec![])
            .unwrap();
        let err = WeightedDistance::default()
            .distance(&a, &empty, FrameSelection::Window(1))
            .unwrap_err();
        assert!(matches!(err, GraphError::EmptyMotion { .. }));
    }

    #[test]
    fn boundary_equality_ignores_root() {
        let m = clip("loop", &[0.2, 0.6, 0.2]);
        assert!(boundary_equal(&m, &m));

        let mut frames = m.frames().to_vec();
        // change the root quaternion of the first frame only
        frames[0].channels[3..7].copy_from_slice(&[0.0, 0.0, 1.0, 0.0]);
        let rerooted = m.with_frames(frames).unwrap();
        assert!(boundary_equal(&m, &rerooted));

        let moving = clip("moving", &[0.1, 0.6]);
        assert!(!boundary_equal(&moving, &moving));
    }

    #[test]
    fn layout_mismatch_is_not_equal() {
        let still = clip("still", &[0.0, 0.0]);
        let channels = still.frames()[0].channels.clone();
        let frames = vec![Frame::new(0.0, channels[..12].to_vec())];
        let rotations = MotionClip::new(
            "rot",
            ChannelLayout::Rotations,
            vec!["HumanoidRoot".into(), "l_hip".into(), "r_knee".into()],
            frames,
        )
        .unwrap();
        assert!(!boundary_equal(&still, &rotations));
    }
}
