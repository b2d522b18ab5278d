use crate::capture::{normalize_frame, FrameSource};
use crate::history::HistoryStore;
use crate::pose::PoseProvider;
use crate::prelude::{CoreError, CoreResult, TrackerConfig};
use crate::processing::{AngleMapper, AngleReading, Direction, OverlayRenderer, RepCount, RepCounter};
use crate::session::chart::ChartRenderer;
use crate::session::sample::SampleSeries;
use crate::telemetry::{FrameMetrics, LogManager, MetricsRecorder};
use chrono::{Local, NaiveDateTime};
use image::RgbImage;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running { started_at: Instant },
}

/// Counter state after one tracked frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReading {
    pub reading: AngleReading,
    pub count: RepCount,
    pub direction: Direction,
    /// A half rep was completed on this frame.
    pub counted: bool,
}

/// Result of a single tick.
#[derive(Debug, Clone)]
pub enum TickOutcome {
    /// No session is running; nothing was read.
    Idle,
    /// The frame source had nothing to offer.
    NoFrame,
    /// No usable landmarks; the frame is shown as captured.
    RawFrame(RgbImage),
    Tracked {
        frame: RgbImage,
        reading: FrameReading,
    },
}

impl TickOutcome {
    pub fn frame(&self) -> Option<&RgbImage> {
        match self {
            TickOutcome::RawFrame(frame) | TickOutcome::Tracked { frame, .. } => Some(frame),
            TickOutcome::Idle | TickOutcome::NoFrame => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub count: RepCount,
    pub samples: usize,
    pub metrics: FrameMetrics,
    /// Where the chart went; `None` when no rep was counted.
    pub saved: Option<PathBuf>,
}

/// Owns one training session: capture, counting, overlay and archiving.
pub struct SessionController<F, P> {
    config: TrackerConfig,
    frames: F,
    pose: P,
    mapper: AngleMapper,
    counter: RepCounter,
    overlay: OverlayRenderer,
    chart: ChartRenderer,
    store: HistoryStore,
    samples: SampleSeries,
    state: SessionState,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl<F: FrameSource, P: PoseProvider> SessionController<F, P> {
    pub fn new(config: TrackerConfig, frames: F, pose: P) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            mapper: AngleMapper::new(&config),
            counter: RepCounter::with_tolerance(config.boundary_tolerance),
            overlay: OverlayRenderer::new(config.bar_span),
            chart: ChartRenderer::new(config.frame_size),
            store: HistoryStore::new(config.history_dir.clone()),
            samples: SampleSeries::new(),
            state: SessionState::Idle,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("session"),
            config,
            frames,
            pose,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Running { .. })
    }

    pub fn count(&self) -> RepCount {
        self.counter.count()
    }

    pub fn samples(&self) -> &SampleSeries {
        &self.samples
    }

    pub fn start(&mut self) -> CoreResult<()> {
        if self.is_running() {
            return Err(CoreError::SessionAlreadyRunning);
        }
        self.metrics.reset();
        self.state = SessionState::Running {
            started_at: Instant::now(),
        };
        self.logger.record("session started");
        Ok(())
    }

    /// Ends the session, archiving its chart when any rep was counted.
    pub fn stop(&mut self) -> CoreResult<SessionSummary> {
        self.stop_at(Local::now().naive_local())
    }

    /// [`stop`](Self::stop) with an explicit finishing time for the entry name.
    pub fn stop_at(&mut self, finished_at: NaiveDateTime) -> CoreResult<SessionSummary> {
        if !self.is_running() {
            return Err(CoreError::SessionNotRunning);
        }
        self.state = SessionState::Idle;

        let count = self.counter.count();
        let samples = self.samples.len();
        let metrics = self.metrics.snapshot();
        let saved = if count.is_zero() {
            Ok(None)
        } else {
            let chart = self.chart.render(&self.samples);
            self.store.save(&finished_at, count, &chart).map(Some)
        };

        // the session is over even if archiving failed
        self.samples.clear();
        self.counter.reset();
        let saved = saved?;
        self.logger.record(&format!(
            "session stopped: count {count}, {samples} samples, {} tracked / {} without landmarks / {} missing frames",
            metrics.tracked, metrics.without_landmarks, metrics.missing
        ));

        Ok(SessionSummary {
            count,
            samples,
            metrics,
            saved,
        })
    }

    /// One capture-process-render step.
    pub fn update(&mut self) -> TickOutcome {
        let SessionState::Running { started_at } = self.state else {
            return TickOutcome::Idle;
        };

        let Some(frame) = self.frames.read_frame() else {
            self.metrics.record_missing();
            self.logger.trace_frame("no frame available, skipping tick");
            return TickOutcome::NoFrame;
        };
        let mut frame = normalize_frame(frame, self.config.frame_size);

        let landmarks = self.pose.detect(&frame);
        let Some(angle) = landmarks.triple_angle(&self.config.joints) else {
            self.metrics.record_without_landmarks();
            self.logger.trace_frame("no landmarks for the tracked joints");
            return TickOutcome::RawFrame(frame);
        };

        let reading = self.mapper.map(angle);
        self.samples
            .push(started_at.elapsed().as_secs_f64(), reading.percentage);
        let counted = self.counter.observe(reading.percentage);
        let count = self.counter.count();
        self.overlay.render(
            &mut frame,
            &reading,
            count,
            self.counter.is_boundary(reading.percentage),
        );
        self.metrics.record_tracked();
        if counted {
            self.logger.trace_frame(&format!("half rep counted, total {count}"));
        }

        TickOutcome::Tracked {
            frame,
            reading: FrameReading {
                reading,
                count,
                direction: self.counter.direction(),
                counted,
            },
        }
    }
}
