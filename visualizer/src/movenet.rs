//! Single-pose MoveNet running on tract.

use anyhow::Context;
use image::{imageops, imageops::FilterType, RgbImage};
use log::{info, warn};
use repcore::pose::{JointId, Landmark, LandmarkSet, PoseProvider};
use std::path::Path;
use std::sync::Arc;
use tract_onnx::prelude::{
    tvec, Datum, Framework, Graph, InferenceFact, InferenceModelExt, SimplePlan, TValue, Tensor, TypedFact,
    TypedOp,
};

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// MoveNet's 17 COCO keypoints, in output order, as BlazePose joints.
const COCO_JOINTS: [JointId; 17] = [
    JointId::NOSE,
    JointId::LEFT_EYE,
    JointId::RIGHT_EYE,
    JointId::LEFT_EAR,
    JointId::RIGHT_EAR,
    JointId::LEFT_SHOULDER,
    JointId::RIGHT_SHOULDER,
    JointId::LEFT_ELBOW,
    JointId::RIGHT_ELBOW,
    JointId::LEFT_WRIST,
    JointId::RIGHT_WRIST,
    JointId::LEFT_HIP,
    JointId::RIGHT_HIP,
    JointId::LEFT_KNEE,
    JointId::RIGHT_KNEE,
    JointId::LEFT_ANKLE,
    JointId::RIGHT_ANKLE,
];

/// Pose provider backed by a MoveNet single-pose ONNX export taking a
/// `[1, side, side, 3]` float image and producing `[1, 1, 17, 3]` rows of
/// normalised `(y, x, score)`.
pub struct MoveNetProvider {
    plan: Plan,
    input_side: u32,
    confidence_floor: f32,
}

impl MoveNetProvider {
    pub fn load<P: AsRef<Path>>(path: P, input_side: u32, confidence_floor: f32) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let side = input_side as usize;
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .with_context(|| format!("reading pose model {}", path.display()))?
            .with_input_fact(0, InferenceFact::dt_shape(f32::datum_type(), tvec!(1, side, side, 3)))?
            .into_optimized()
            .context("optimizing pose model")?
            .into_runnable()
            .context("planning pose model")?;
        info!("loaded pose model {}", path.display());
        Ok(Self {
            plan,
            input_side,
            confidence_floor,
        })
    }

    fn input_tensor(&self, frame: &RgbImage) -> anyhow::Result<Tensor> {
        let side = self.input_side;
        let resized = imageops::resize(frame, side, side, FilterType::Triangle);
        let data: Vec<f32> = resized.into_raw().into_iter().map(f32::from).collect();
        let tensor = Tensor::from_shape(&[1, side as usize, side as usize, 3], &data)?;
        Ok(tensor)
    }

    fn infer(&self, frame: &RgbImage) -> anyhow::Result<LandmarkSet> {
        let input = self.input_tensor(frame)?;
        let outputs = self.plan.run(tvec!(TValue::from_const(Arc::new(input))))?;
        let rows = outputs
            .first()
            .context("pose model produced no output")?
            .as_slice::<f32>()?;
        Ok(keypoints_to_landmarks(
            rows,
            frame.width() as f32,
            frame.height() as f32,
            self.confidence_floor,
        ))
    }
}

impl PoseProvider for MoveNetProvider {
    fn detect(&mut self, frame: &RgbImage) -> LandmarkSet {
        match self.infer(frame) {
            Ok(landmarks) => landmarks,
            Err(err) => {
                warn!("pose inference failed: {err:#}");
                LandmarkSet::new()
            }
        }
    }
}

/// Converts `(y, x, score)` rows into pixel landmarks, dropping keypoints
/// under `floor`.
fn keypoints_to_landmarks(rows: &[f32], width: f32, height: f32, floor: f32) -> LandmarkSet {
    rows.chunks_exact(3)
        .zip(COCO_JOINTS)
        .filter(|(row, _)| row[2] >= floor)
        .map(|(row, joint)| (joint, Landmark::new(row[1] * width, row[0] * height)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_scaled_and_remapped() {
        let mut rows = vec![0.0; 17 * 3];
        // left elbow
        rows[7 * 3..7 * 3 + 3].copy_from_slice(&[0.5, 0.25, 0.9]);
        // right wrist, below the floor
        rows[10 * 3..10 * 3 + 3].copy_from_slice(&[0.1, 0.1, 0.2]);

        let landmarks = keypoints_to_landmarks(&rows, 640.0, 480.0, 0.3);
        assert_eq!(landmarks.len(), 1);
        assert_eq!(landmarks.get(JointId::LEFT_ELBOW), Some(Landmark::new(160.0, 240.0)));
        assert_eq!(landmarks.get(JointId::RIGHT_WRIST), None);
    }

    #[test]
    fn short_output_maps_what_it_has() {
        let rows = [0.5, 0.5, 1.0, 0.5];
        let landmarks = keypoints_to_landmarks(&rows, 100.0, 100.0, 0.0);
        assert_eq!(landmarks.get(JointId::NOSE), Some(Landmark::new(50.0, 50.0)));
        assert_eq!(landmarks.len(), 1);
    }

    #[test]
    fn missing_model_fails_to_load() {
        assert!(MoveNetProvider::load("does/not/exist.onnx", 192, 0.3).is_err());
    }
}
