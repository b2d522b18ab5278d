//! Core of the Get Fit arm-curl trainer.
//!
//! Frames flow through a pose provider, the elbow angle is mapped to a
//! completion percentage, a direction-aware counter turns boundary hits into
//! half repetitions, and finished sessions are archived as chart images.

pub mod capture;
pub mod history;
pub mod math;
pub mod pose;
pub mod prelude;
pub mod processing;
pub mod scheduler;
pub mod session;
pub mod shell;
pub mod telemetry;

pub use prelude::{CoreError, CoreResult, TrackerConfig};
