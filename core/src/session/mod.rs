pub mod chart;
pub mod controller;
pub mod sample;

pub use chart::ChartRenderer;
pub use controller::{FrameReading, SessionController, SessionState, SessionSummary, TickOutcome};
pub use sample::{AngleSample, SampleSeries};
