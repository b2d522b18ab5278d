use crate::generator::profile::CurlProfile;
use anyhow::Context;
use repcore::TrackerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One replay: what the synthetic athlete does and how the tracker is set up.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub profile: CurlProfile,
    pub tracker: TrackerConfig,
}

impl ReplayConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading replay config {}", path_ref.display()))?;
        let config: ReplayConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing replay config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(profile: CurlProfile, history_dir: Option<PathBuf>) -> Self {
        let mut tracker = TrackerConfig::default();
        if let Some(dir) = history_dir {
            tracker.history_dir = dir;
        }
        Self { profile, tracker }
    }

    pub fn to_tracker_config(&self) -> anyhow::Result<TrackerConfig> {
        self.tracker
            .validate()
            .context("validating tracker settings")?;
        Ok(self.tracker.clone())
    }
}
