//! Construction settings for [`crate::construct::MotionGraphBuilder`].

use serde::{Deserialize, Serialize};

use crate::align::AlignmentKind;
use crate::error::{GraphError, Result};
use crate::weights::WeightMap;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Captures longer than this many seconds are split into pieces.
    pub split_duration: f32,
    /// Frames compared (and blended over) at a candidate transition.
    pub transition_window: usize,
    /// Accept a transition when its weighted distance is at most this.
    pub distance_threshold: f32,
    /// Sink components with fewer nodes than this are pruned.
    pub prune_threshold: usize,
    pub alignment: AlignmentKind,
    /// Accept pairs whose boundary frames are identical without scoring them.
    pub accept_equal_boundaries: bool,
    pub weights: WeightMap,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            split_duration: 2.0,
            transition_window: 5,
            distance_threshold: 0.5,
            prune_threshold: 2,
            alignment: AlignmentKind::default(),
            accept_equal_boundaries: true,
            weights: WeightMap::default(),
        }
    }
}

impl BuildConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: BuildConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(GraphError::InvalidConfig { reason });
        if !(self.split_duration.is_finite() && self.split_duration > 0.0) {
            return invalid(format!(
                "split_duration must be positive, got {}",
                self.split_duration
            ));
        }
        if self.transition_window == 0 {
            return invalid("transition_window must be at least 1".into());
        }
        if !(self.distance_threshold.is_finite() && self.distance_threshold >= 0.0) {
            return invalid(format!(
                "distance_threshold must be finite and non-negative, got {}",
                self.distance_threshold
            ));
        }
        if self.prune_threshold == 0 {
            return invalid("prune_threshold must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        BuildConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = BuildConfig::from_json_str(
            r#"{ "transition_window": 3, "alignment": "translation", "weights": { "l_hip": 2.0 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.transition_window, 3);
        assert_eq!(cfg.alignment, AlignmentKind::Translation);
        assert_eq!(cfg.weights.weight("r_hip"), 2.0);
        assert_eq!(cfg.weights.weight("knee"), 0.0);
        assert_eq!(cfg.split_duration, 2.0);
    }

    #[test]
    fn unknown_fields_and_bad_values_are_rejected() {
        assert!(matches!(
            BuildConfig::from_json_str(r#"{ "window": 3 }"#),
            Err(GraphError::Parse { .. })
        ));
        assert!(matches!(
            BuildConfig::from_json_str(r#"{ "transition_window": 0 }"#),
            Err(GraphError::InvalidConfig { .. })
        ));
        assert!(matches!(
            BuildConfig::from_json_str(r#"{ "split_duration": -1.0 }"#),
            Err(GraphError::InvalidConfig { .. })
        ));
    }
}
