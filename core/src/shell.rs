//! View-state shell tying the session controller and history browser
//! together behind the window's buttons.

use crate::capture::FrameSource;
use crate::history::browser::NO_HISTORY_MESSAGE;
use crate::history::{HistoryBrowser, HistoryStore, HistoryView};
use crate::pose::PoseProvider;
use crate::prelude::{CoreResult, TrackerConfig};
use crate::session::{SessionController, SessionSummary, TickOutcome};
use crate::telemetry::LogManager;
use image::RgbImage;

pub const START_LABEL: &str = "Start Training";
pub const STOP_LABEL: &str = "Stop Training";
pub const VIEW_HISTORY_LABEL: &str = "View History";
pub const CLOSE_HISTORY_LABEL: &str = "Close History";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Live,
    History,
}

/// Which buttons the window shows, and their labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// Start/Stop toggle; hidden while browsing history.
    pub training: Option<&'static str>,
    pub history: &'static str,
    /// Next/Previous; only while browsing history.
    pub navigation: bool,
}

/// Content of the main pane.
#[derive(Debug, Clone)]
pub enum Display {
    Blank,
    Frame(RgbImage),
    Message(String),
}

pub struct TrainingShell<F, P> {
    session: SessionController<F, P>,
    browser: HistoryBrowser,
    mode: ViewMode,
    display: Display,
    caption: String,
    logger: LogManager,
}

impl<F: FrameSource, P: PoseProvider> TrainingShell<F, P> {
    pub fn new(config: TrackerConfig, frames: F, pose: P) -> CoreResult<Self> {
        let browser = HistoryBrowser::new(HistoryStore::new(config.history_dir.clone()), config.frame_size);
        Ok(Self {
            session: SessionController::new(config, frames, pose)?,
            browser,
            mode: ViewMode::Live,
            display: Display::Blank,
            caption: String::new(),
            logger: LogManager::new("shell"),
        })
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn session(&self) -> &SessionController<F, P> {
        &self.session
    }

    pub fn browser(&self) -> &HistoryBrowser {
        &self.browser
    }

    pub fn is_training(&self) -> bool {
        self.session.is_running()
    }

    pub fn controls(&self) -> Controls {
        match self.mode {
            ViewMode::Live => Controls {
                training: Some(if self.is_training() { STOP_LABEL } else { START_LABEL }),
                history: VIEW_HISTORY_LABEL,
                navigation: false,
            },
            ViewMode::History => Controls {
                training: None,
                history: CLOSE_HISTORY_LABEL,
                navigation: true,
            },
        }
    }

    /// Starts or stops the session. Ignored while browsing history.
    pub fn toggle_training(&mut self) -> CoreResult<Option<SessionSummary>> {
        if self.mode != ViewMode::Live {
            return Ok(None);
        }
        if self.is_training() {
            self.finish_session().map(Some)
        } else {
            self.session.start()?;
            self.caption.clear();
            Ok(None)
        }
    }

    /// Switches between live view and history browsing. Entering history
    /// ends a running session first so its chart is part of the listing.
    pub fn toggle_history(&mut self) -> CoreResult<()> {
        match self.mode {
            ViewMode::Live => {
                if self.is_training() {
                    self.finish_session()?;
                }
                self.mode = ViewMode::History;
                self.display = Display::Blank;
                self.caption.clear();
                self.browser.open()?;
                self.refresh_history()
            }
            ViewMode::History => {
                self.browser.close();
                self.mode = ViewMode::Live;
                self.display = Display::Blank;
                self.caption.clear();
                self.logger.record("history closed");
                Ok(())
            }
        }
    }

    pub fn next(&mut self) -> CoreResult<()> {
        if self.mode == ViewMode::History && self.browser.next() {
            self.refresh_history()?;
        }
        Ok(())
    }

    pub fn previous(&mut self) -> CoreResult<()> {
        if self.mode == ViewMode::History && self.browser.previous() {
            self.refresh_history()?;
        }
        Ok(())
    }

    /// Runs one session tick and updates the pane with whatever frame it
    /// produced. Does nothing outside a running live session.
    pub fn tick(&mut self) -> TickOutcome {
        if self.mode != ViewMode::Live {
            return TickOutcome::Idle;
        }
        let outcome = self.session.update();
        if let Some(frame) = outcome.frame() {
            self.display = Display::Frame(frame.clone());
        }
        outcome
    }

    fn finish_session(&mut self) -> CoreResult<SessionSummary> {
        let summary = self.session.stop()?;
        self.caption = if summary.saved.is_some() {
            format!("Session saved | Total Curls : {}", summary.count)
        } else {
            "Session ended without a completed curl".to_string()
        };
        Ok(summary)
    }

    /// A failed render leaves an error message in the pane, never the previous image.
    fn refresh_history(&mut self) -> CoreResult<()> {
        let view = match self.browser.render() {
            Ok(view) => view,
            Err(err) => {
                self.display = Display::Message(match self.browser.selected() {
                    Some(entry) => format!("Could not load {}", entry.file_name()),
                    None => NO_HISTORY_MESSAGE.to_string(),
                });
                self.caption.clear();
                return Err(err);
            }
        };
        match view {
            HistoryView::Empty => {
                self.display = Display::Message(NO_HISTORY_MESSAGE.to_string());
                self.caption.clear();
            }
            HistoryView::Entry { image, caption, .. } => {
                self.display = Display::Frame(image);
                self.caption = caption;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::StaticFrameSource;
    use crate::pose::{arm_pose, ScriptedPoseProvider};
    use tempfile::{tempdir, TempDir};

    type Shell = TrainingShell<StaticFrameSource, ScriptedPoseProvider>;

    fn shell(dir: &TempDir, angles: &[f32]) -> Shell {
        let config = TrackerConfig {
            history_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let script: Vec<_> = angles.iter().map(|a| arm_pose(&config.joints, *a)).collect();
        TrainingShell::new(
            config.clone(),
            StaticFrameSource::endless(config.frame_size),
            ScriptedPoseProvider::new(script),
        )
        .unwrap()
    }

    #[test]
    fn live_mode_shows_training_toggle_only() {
        let dir = tempdir().unwrap();
        let mut shell = shell(&dir, &[]);
        assert_eq!(
            shell.controls(),
            Controls {
                training: Some(START_LABEL),
                history: VIEW_HISTORY_LABEL,
                navigation: false,
            }
        );
        shell.toggle_training().unwrap();
        assert_eq!(shell.controls().training, Some(STOP_LABEL));
    }

    #[test]
    fn history_mode_swaps_controls_and_reports_empty_history() {
        let dir = tempdir().unwrap();
        let mut shell = shell(&dir, &[]);
        shell.toggle_history().unwrap();
        assert_eq!(shell.mode(), ViewMode::History);
        assert_eq!(
            shell.controls(),
            Controls {
                training: None,
                history: CLOSE_HISTORY_LABEL,
                navigation: true,
            }
        );
        assert!(matches!(shell.display(), Display::Message(msg) if msg == NO_HISTORY_MESSAGE));
        assert!(shell.toggle_training().unwrap().is_none());
        assert!(!shell.is_training());
    }

    #[test]
    fn ticks_update_the_pane_while_training() {
        let dir = tempdir().unwrap();
        let mut shell = shell(&dir, &[250.0]);
        assert!(matches!(shell.tick(), TickOutcome::Idle));
        shell.toggle_training().unwrap();
        assert!(matches!(shell.tick(), TickOutcome::Tracked { .. }));
        assert!(matches!(shell.display(), Display::Frame(_)));
    }

    #[test]
    fn entering_history_flushes_the_running_session() {
        let dir = tempdir().unwrap();
        let mut shell = shell(&dir, &[320.0, 200.0]);
        shell.toggle_training().unwrap();
        shell.tick();
        shell.tick();
        shell.toggle_history().unwrap();
        assert!(!shell.is_training());
        assert_eq!(shell.browser().entries().len(), 1);
        assert!(shell.caption().ends_with("Total Curls : 1"));
        assert!(matches!(shell.display(), Display::Frame(_)));
    }

    #[test]
    fn closing_history_clears_the_pane() {
        let dir = tempdir().unwrap();
        let mut shell = shell(&dir, &[320.0, 200.0]);
        shell.toggle_training().unwrap();
        shell.tick();
        shell.tick();
        let summary = shell.toggle_training().unwrap().unwrap();
        assert_eq!(summary.count.value(), 1.0);
        shell.toggle_history().unwrap();
        shell.toggle_history().unwrap();
        assert_eq!(shell.mode(), ViewMode::Live);
        assert!(matches!(shell.display(), Display::Blank));
        assert!(shell.caption().is_empty());
    }

    #[test]
    fn navigation_is_ignored_in_live_mode() {
        let dir = tempdir().unwrap();
        let mut shell = shell(&dir, &[]);
        shell.next().unwrap();
        shell.previous().unwrap();
        assert_eq!(shell.browser().cursor(), None);
    }

    fn seed_corrupt_entry(dir: &TempDir, name: &str) {
        std::fs::write(dir.path().join(name), "not a png").unwrap();
    }

    #[test]
    fn unreadable_entry_clears_the_live_frame() {
        let dir = tempdir().unwrap();
        let mut shell = shell(&dir, &[250.0]);
        shell.toggle_training().unwrap();
        shell.tick();
        shell.toggle_training().unwrap();
        assert!(matches!(shell.display(), Display::Frame(_)));

        seed_corrupt_entry(&dir, "2024-01-01T00-00-00_1.png");
        assert!(shell.toggle_history().is_err());
        assert_eq!(shell.mode(), ViewMode::History);
        assert!(
            matches!(shell.display(), Display::Message(msg) if msg.contains("2024-01-01T00-00-00_1.png"))
        );
        assert!(shell.caption().is_empty());
    }

    #[test]
    fn navigating_onto_an_unreadable_entry_clears_the_pane() {
        let dir = tempdir().unwrap();
        let mut shell = shell(&dir, &[320.0, 200.0]);
        shell.toggle_training().unwrap();
        shell.tick();
        shell.tick();
        shell.toggle_training().unwrap();
        seed_corrupt_entry(&dir, "2999-01-01T00-00-00_1.png");

        shell.toggle_history().unwrap();
        assert!(matches!(shell.display(), Display::Frame(_)));
        assert!(shell.next().is_err());
        assert_eq!(shell.browser().cursor(), Some(1));
        assert!(matches!(shell.display(), Display::Message(_)));

        shell.previous().unwrap();
        assert!(matches!(shell.display(), Display::Frame(_)));
        assert!(shell.caption().ends_with("Total Curls : 1"));
    }
}
