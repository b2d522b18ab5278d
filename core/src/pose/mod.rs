//! The boundary to the external pose-estimation capability.

pub mod landmark;
pub mod provider;

pub use landmark::{JointId, Landmark, LandmarkSet};
pub use provider::{arm_pose, NullPoseProvider, PoseProvider, ScriptedPoseProvider};
