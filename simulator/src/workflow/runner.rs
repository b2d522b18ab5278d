use crate::workflow::config::ReplayConfig;
use anyhow::Context;
use log::{debug, info};
use repcore::capture::StaticFrameSource;
use repcore::pose::ScriptedPoseProvider;
use repcore::scheduler::TickScheduler;
use repcore::session::{SessionController, TickOutcome};
use repcore::telemetry::FrameMetrics;
use serde::Serialize;
use std::ops::ControlFlow;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct ReplayResult {
    /// Final count as rendered in history file names.
    pub count: String,
    pub scripted_frames: usize,
    pub ticks: usize,
    pub samples: usize,
    pub metrics: FrameMetrics,
    pub saved: Option<PathBuf>,
}

#[derive(Clone)]
pub struct Runner {
    config: ReplayConfig,
}

impl Runner {
    pub fn new(config: ReplayConfig) -> Self {
        Self { config }
    }

    /// Plays the configured profile through a real session controller until
    /// the script runs out, then stops the session.
    pub fn execute(&self) -> anyhow::Result<ReplayResult> {
        let tracker = self.config.to_tracker_config()?;
        let script = self
            .config
            .profile
            .landmark_script(&tracker)
            .context("building landmark script")?;
        let scripted_frames = script.len();

        let mut controller = SessionController::new(
            tracker.clone(),
            StaticFrameSource::limited(tracker.frame_size, scripted_frames),
            ScriptedPoseProvider::new(script),
        )
        .context("creating session controller")?;
        controller.start().context("starting session")?;

        let mut scheduler = TickScheduler::from_millis(tracker.tick_interval_ms);
        let ticks = scheduler.run(|| match controller.update() {
            TickOutcome::Idle | TickOutcome::NoFrame => ControlFlow::Break(()),
            TickOutcome::Tracked { reading, .. } => {
                if reading.counted {
                    debug!("half rep at {:.1}%, total {}", reading.reading.percentage, reading.count);
                }
                ControlFlow::Continue(())
            }
            TickOutcome::RawFrame(_) => ControlFlow::Continue(()),
        });

        let summary = controller.stop().context("stopping session")?;
        info!(
            "replay finished after {ticks} ticks with {} curls",
            summary.count
        );

        Ok(ReplayResult {
            count: summary.count.to_string(),
            scripted_frames,
            ticks,
            samples: summary.samples,
            metrics: summary.metrics,
            saved: summary.saved,
        })
    }
}
