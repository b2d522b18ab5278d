use crate::generator::template::curl_wave;
use rand::{rngs::StdRng, Rng, SeedableRng};
use repcore::pose::{arm_pose, LandmarkSet};
use repcore::TrackerConfig;
use serde::{Deserialize, Serialize};

/// Shape of a synthetic curl session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurlProfile {
    pub reps: usize,
    pub frames_per_half: usize,
    /// Degrees past each edge of the percentage range the arm travels.
    pub overshoot: f32,
    /// Peak jitter in degrees added to every sample.
    pub noise: f32,
    /// Chance of an extra frame without landmarks after each sample.
    pub dropout: f32,
    pub seed: u64,
}

impl Default for CurlProfile {
    fn default() -> Self {
        Self {
            reps: 3,
            frames_per_half: 15,
            overshoot: 10.0,
            noise: 2.0,
            dropout: 0.0,
            seed: 0,
        }
    }
}

impl CurlProfile {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            (0.0..=self.overshoot).contains(&self.noise),
            "noise {} must lie within 0..={} (the overshoot)",
            self.noise,
            self.overshoot
        );
        anyhow::ensure!(
            (0.0..1.0).contains(&self.dropout),
            "dropout {} must lie within 0..1",
            self.dropout
        );
        Ok(())
    }

    /// Jittered elbow angles, one per tracked frame.
    pub fn angles(&self, config: &TrackerConfig) -> anyhow::Result<Vec<f32>> {
        self.validate()?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut angles = curl_wave(self.reps, self.frames_per_half, config.percent_range, self.overshoot);
        if self.noise > 0.0 {
            for angle in &mut angles {
                *angle += rng.gen_range(-self.noise..=self.noise);
            }
        }
        Ok(angles)
    }

    /// Landmark sets for the whole session, dropout frames included.
    pub fn landmark_script(&self, config: &TrackerConfig) -> anyhow::Result<Vec<LandmarkSet>> {
        let angles = self.angles(config)?;
        // dropout draws from its own stream, leaving the jitter untouched
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(1));
        let mut script = Vec::with_capacity(angles.len());
        for angle in angles {
            script.push(arm_pose(&config.joints, angle));
            if self.dropout > 0.0 && rng.gen_bool(f64::from(self.dropout)) {
                script.push(LandmarkSet::new());
            }
        }
        Ok(script)
    }
}
