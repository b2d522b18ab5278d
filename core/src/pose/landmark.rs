use crate::math::AngleHelper;
use crate::prelude::JointTriple;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Index of a tracked body joint in the 33-point BlazePose topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointId(pub u8);

impl JointId {
    pub const NOSE: JointId = JointId(0);
    pub const LEFT_EYE: JointId = JointId(2);
    pub const RIGHT_EYE: JointId = JointId(5);
    pub const LEFT_EAR: JointId = JointId(7);
    pub const RIGHT_EAR: JointId = JointId(8);
    pub const LEFT_SHOULDER: JointId = JointId(11);
    pub const RIGHT_SHOULDER: JointId = JointId(12);
    pub const LEFT_ELBOW: JointId = JointId(13);
    pub const RIGHT_ELBOW: JointId = JointId(14);
    pub const LEFT_WRIST: JointId = JointId(15);
    pub const RIGHT_WRIST: JointId = JointId(16);
    pub const LEFT_HIP: JointId = JointId(23);
    pub const RIGHT_HIP: JointId = JointId(24);
    pub const LEFT_KNEE: JointId = JointId(25);
    pub const RIGHT_KNEE: JointId = JointId(26);
    pub const LEFT_ANKLE: JointId = JointId(27);
    pub const RIGHT_ANKLE: JointId = JointId(28);
}

/// A joint position in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Landmarks detected in one frame. Joints the provider could not locate
/// are simply absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandmarkSet {
    points: BTreeMap<JointId, Landmark>,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, joint: JointId, landmark: Landmark) {
        self.points.insert(joint, landmark);
    }

    pub fn with(mut self, joint: JointId, landmark: Landmark) -> Self {
        self.insert(joint, landmark);
        self
    }

    pub fn get(&self, joint: JointId) -> Option<Landmark> {
        self.points.get(&joint).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (JointId, Landmark)> + '_ {
        self.points.iter().map(|(joint, landmark)| (*joint, *landmark))
    }

    /// Included angle at `vertex`, or `None` if any of the three joints is
    /// missing.
    pub fn angle(&self, first: JointId, vertex: JointId, last: JointId) -> Option<f32> {
        Some(AngleHelper::included_angle(
            self.get(first)?,
            self.get(vertex)?,
            self.get(last)?,
        ))
    }

    pub fn triple_angle(&self, joints: &JointTriple) -> Option<f32> {
        self.angle(joints.first, joints.vertex, joints.last)
    }
}

impl FromIterator<(JointId, Landmark)> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = (JointId, Landmark)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
