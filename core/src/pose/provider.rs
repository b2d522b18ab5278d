use crate::pose::{Landmark, LandmarkSet};
use crate::prelude::JointTriple;
use image::RgbImage;
use std::collections::VecDeque;

/// Anything that can locate body joints in a frame.
///
/// The only failure mode is an empty [`LandmarkSet`]; callers treat it as
/// "nothing to count this frame".
pub trait PoseProvider {
    fn detect(&mut self, frame: &RgbImage) -> LandmarkSet;
}

impl<P: PoseProvider + ?Sized> PoseProvider for Box<P> {
    fn detect(&mut self, frame: &RgbImage) -> LandmarkSet {
        (**self).detect(frame)
    }
}

/// Provider that never detects anyone.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPoseProvider;

impl PoseProvider for NullPoseProvider {
    fn detect(&mut self, _frame: &RgbImage) -> LandmarkSet {
        LandmarkSet::new()
    }
}

/// Replays prepared landmark sets, one per call, then reports nothing.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPoseProvider {
    script: VecDeque<LandmarkSet>,
}

impl ScriptedPoseProvider {
    pub fn new(script: impl IntoIterator<Item = LandmarkSet>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl PoseProvider for ScriptedPoseProvider {
    fn detect(&mut self, _frame: &RgbImage) -> LandmarkSet {
        self.script.pop_front().unwrap_or_default()
    }
}

const ARM_ELBOW: Landmark = Landmark::new(320.0, 240.0);
const ARM_SEGMENT: f32 = 100.0;

/// Builds an arm whose `joints` triple reads back as `angle_deg`: the first
/// joint sits straight above the vertex and the last joint is swept from it.
pub fn arm_pose(joints: &JointTriple, angle_deg: f32) -> LandmarkSet {
    let first = Landmark::new(ARM_ELBOW.x, ARM_ELBOW.y - ARM_SEGMENT);
    let sweep = (angle_deg - 90.0).to_radians();
    let last = Landmark::new(
        ARM_ELBOW.x + ARM_SEGMENT * sweep.cos(),
        ARM_ELBOW.y + ARM_SEGMENT * sweep.sin(),
    );
    LandmarkSet::new()
        .with(joints.first, first)
        .with(joints.vertex, ARM_ELBOW)
        .with(joints.last, last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn arm_pose_reads_back_requested_angle() {
        let joints = JointTriple::default();
        for angle in [15.0, 180.0, 210.0, 250.0, 310.0, 345.0] {
            let measured = arm_pose(&joints, angle).triple_angle(&joints).unwrap();
            assert_abs_diff_eq!(measured, angle, epsilon = 1e-2);
        }
    }

    #[test]
    fn scripted_provider_drains_then_reports_empty() {
        let frame = RgbImage::new(4, 4);
        let joints = JointTriple::default();
        let mut provider = ScriptedPoseProvider::new([arm_pose(&joints, 200.0)]);
        assert_eq!(provider.remaining(), 1);
        assert!(!provider.detect(&frame).is_empty());
        assert!(provider.detect(&frame).is_empty());
    }

    #[test]
    fn null_provider_is_always_empty() {
        let mut provider: Box<dyn PoseProvider> = Box::new(NullPoseProvider);
        assert!(provider.detect(&RgbImage::new(2, 2)).is_empty());
    }
}
