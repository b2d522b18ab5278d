use crate::pose::JointId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Inclusive angle domain in degrees, mapped linearly onto an output span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    pub low: f32,
    pub high: f32,
}

impl AngleRange {
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }
}

/// Vertical pixel span of the progress bar. `bottom` is reached at the low
/// edge of the bar angle range and `top` at the high edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarSpan {
    pub bottom: f32,
    pub top: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

/// The three joints whose included angle drives the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointTriple {
    pub first: JointId,
    pub vertex: JointId,
    pub last: JointId,
}

impl Default for JointTriple {
    fn default() -> Self {
        Self {
            first: JointId::LEFT_SHOULDER,
            vertex: JointId::LEFT_ELBOW,
            last: JointId::LEFT_WRIST,
        }
    }
}

/// Shared configuration for the tracking pipeline and session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub joints: JointTriple,
    /// Angle domain mapped onto the 0..=100 percentage.
    pub percent_range: AngleRange,
    /// Angle domain mapped onto the progress bar; deliberately separate from
    /// `percent_range`.
    pub bar_range: AngleRange,
    pub bar_span: BarSpan,
    pub frame_size: FrameSize,
    pub history_dir: PathBuf,
    pub tick_interval_ms: u64,
    /// Width of the band around 0% and 100% that counts as a boundary hit.
    pub boundary_tolerance: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            joints: JointTriple::default(),
            percent_range: AngleRange::new(210.0, 310.0),
            bar_range: AngleRange::new(220.0, 310.0),
            bar_span: BarSpan {
                bottom: 430.0,
                top: 60.0,
            },
            frame_size: FrameSize {
                width: 640,
                height: 480,
            },
            history_dir: PathBuf::from("./training_data"),
            tick_interval_ms: 10,
            boundary_tolerance: 0.0,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> CoreResult<()> {
        for (name, range) in [("percent_range", self.percent_range), ("bar_range", self.bar_range)] {
            if !(range.low < range.high) {
                return Err(CoreError::InvalidConfig(format!(
                    "{name} must satisfy low < high (got {} .. {})",
                    range.low, range.high
                )));
            }
        }
        if self.frame_size.width == 0 || self.frame_size.height == 0 {
            return Err(CoreError::InvalidConfig("frame size must be non-zero".into()));
        }
        if !(0.0..50.0).contains(&self.boundary_tolerance) {
            return Err(CoreError::InvalidConfig(format!(
                "boundary_tolerance {} outside 0..50",
                self.boundary_tolerance
            )));
        }
        Ok(())
    }
}

/// Common error type for the core crate.
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("image failure: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid history entry name: {0}")]
    InvalidEntryName(String),
    #[error("a session is already running")]
    SessionAlreadyRunning,
    #[error("no session is running")]
    SessionNotRunning,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
