//! Per-joint weights for pose distance.
//!
//! Joint names are keyed without their bilateral prefix, so `l_knee` and
//! `r_knee` share the weight stored under `knee`. The same normalization is
//! applied on insert and lookup.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Longest first so `left_` wins over `l`-style matches.
const BILATERAL_PREFIXES: [&str; 4] = ["left_", "right_", "l_", "r_"];

/// Default table: H-Anim spine, neck and limb landmarks.
const DEFAULT_WEIGHTS: [(&str, f32); 10] = [
    ("sacroiliac", 1.0),
    ("vl5", 1.0),
    ("vt10", 0.8),
    ("vt1", 0.6),
    ("vc4", 0.4),
    ("shoulder", 0.7),
    ("wrist", 0.2),
    ("hip", 1.0),
    ("knee", 0.7),
    ("ankle", 0.4),
];

/// Strip one bilateral prefix, if any.
pub fn normalize_joint_name(name: &str) -> &str {
    for prefix in BILATERAL_PREFIXES {
        if let Some(rest) = name.strip_prefix(prefix) {
            if !rest.is_empty() {
                return rest;
            }
        }
    }
    name
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, f32>", into = "HashMap<String, f32>")]
pub struct WeightMap {
    weights: HashMap<String, f32>,
}

impl From<HashMap<String, f32>> for WeightMap {
    fn from(raw: HashMap<String, f32>) -> Self {
        let mut map = WeightMap::empty();
        for (name, w) in raw {
            map.insert(&name, w);
        }
        map
    }
}

impl From<WeightMap> for HashMap<String, f32> {
    fn from(map: WeightMap) -> Self {
        map.weights
    }
}

impl Default for WeightMap {
    fn default() -> Self {
        let mut map = WeightMap::empty();
        for (name, w) in DEFAULT_WEIGHTS {
            map.insert(name, w);
        }
        map
    }
}

impl WeightMap {
    /// A map where every joint weighs zero.
    pub fn empty() -> Self {
        Self {
            weights: HashMap::new(),
        }
    }

    /// Set the weight for `name` (after prefix normalization).
    pub fn insert(&mut self, name: &str, weight: f32) -> Option<f32> {
        self.weights
            .insert(normalize_joint_name(name).to_string(), weight)
    }

    pub fn remove(&mut self, name: &str) -> Option<f32> {
        self.weights.remove(normalize_joint_name(name))
    }

    /// Weight for `name`; unknown joints weigh zero.
    pub fn weight(&self, name: &str) -> f32 {
        self.weights
            .get(normalize_joint_name(name))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.weights.contains_key(normalize_joint_name(name))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Weights for `joints` in order, ready for per-frame loops.
    pub fn resolve(&self, joints: &[String]) -> Vec<f32> {
        joints.iter().map(|j| self.weight(j)).collect()
    }
}
