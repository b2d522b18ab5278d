use anyhow::Context;
use repcore::TrackerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Window settings. Every field has a default, so an absent or partial
/// file still yields a working trainer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub camera_index: u32,
    /// Replay still images from here instead of opening a camera.
    pub frames_dir: Option<PathBuf>,
    pub model_path: PathBuf,
    /// Square input side the pose model expects.
    pub model_input: u32,
    /// Keypoints scoring below this are dropped.
    pub confidence_floor: f32,
    /// Number of recent percentages shown in the live trace.
    pub trace_len: usize,
    pub tracker: TrackerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            frames_dir: None,
            model_path: PathBuf::from("models/movenet_singlepose_lightning.onnx"),
            model_input: 192,
            confidence_floor: 0.3,
            trace_len: 200,
            tracker: TrackerConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading app config {}", path_ref.display()))?;
        let config: AppConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing app config {}", path_ref.display()))?;
        config
            .tracker
            .validate()
            .with_context(|| format!("validating tracker settings in {}", path_ref.display()))?;
        Ok(config)
    }
}
