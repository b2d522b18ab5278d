//! Fixed-interval tick scheduling, independent of any UI toolkit.

use std::ops::ControlFlow;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    next_due: Option<Instant>,
}

impl TickScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Reports whether a tick is due at `now`. The first poll is always due;
    /// afterwards ticks are spaced by the interval. A late poll fires once
    /// and does not try to catch up on missed ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now < due => false,
            _ => {
                self.next_due = Some(now + self.interval);
                true
            }
        }
    }

    /// Time left until the next tick, zero if one is already due.
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
            .unwrap_or_default()
    }

    pub fn reset(&mut self) {
        self.next_due = None;
    }

    /// Blocks, calling `tick` once per interval until it breaks. Returns the
    /// number of ticks run, including the one that broke.
    pub fn run<F>(&mut self, mut tick: F) -> usize
    where
        F: FnMut() -> ControlFlow<()>,
    {
        let mut ticks = 0;
        loop {
            let now = Instant::now();
            if !self.poll(now) {
                thread::sleep(self.until_next(now));
                continue;
            }
            ticks += 1;
            if tick().is_break() {
                return ticks;
            }
        }
    }
}
