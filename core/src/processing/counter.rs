use crate::processing::mapper::{PERCENT_MAX, PERCENT_MIN};
use std::fmt;
use std::str::FromStr;

/// Which half of the curl the counter is waiting to complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Waiting for the percentage to reach 100.
    #[default]
    Contracting,
    /// Waiting for the percentage to fall back to 0.
    Extended,
}

/// Repetition count in half-rep steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RepCount {
    half_reps: u32,
}

impl RepCount {
    pub const ZERO: RepCount = RepCount { half_reps: 0 };

    pub const fn from_half_reps(half_reps: u32) -> Self {
        Self { half_reps }
    }

    pub const fn half_reps(self) -> u32 {
        self.half_reps
    }

    pub fn value(self) -> f32 {
        self.half_reps as f32 / 2.0
    }

    /// Completed repetitions, dropping a pending half.
    pub const fn whole(self) -> u32 {
        self.half_reps / 2
    }

    pub const fn is_zero(self) -> bool {
        self.half_reps == 0
    }
}

/// Plain number: `2` for whole counts, `2.5` otherwise.
impl fmt::Display for RepCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.half_reps % 2 == 0 {
            write!(f, "{}", self.whole())
        } else {
            write!(f, "{}.5", self.whole())
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("not a half-rep count: {0:?}")]
pub struct ParseRepCountError(String);

impl FromStr for RepCount {
    type Err = ParseRepCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseRepCountError(s.to_string());
        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (s, None),
        };
        let whole: u32 = whole.parse().map_err(|_| invalid())?;
        let half = match fraction {
            None | Some("0") => 0,
            Some("5") => 1,
            Some(_) => return Err(invalid()),
        };
        whole
            .checked_mul(2)
            .and_then(|doubled| doubled.checked_add(half))
            .map(RepCount::from_half_reps)
            .ok_or_else(invalid)
    }
}

/// Direction-aware half-rep counter driven by the completion percentage.
///
/// Only boundary values trigger a transition and there is no hysteresis
/// band: with the default zero tolerance the percentage must be exactly 0
/// or 100. The direction flag keeps a value that lingers on a boundary from
/// counting twice.
#[derive(Debug, Clone, Default)]
pub struct RepCounter {
    count: RepCount,
    direction: Direction,
    tolerance: f32,
}

impl RepCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(tolerance: f32) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
            ..Self::default()
        }
    }

    pub fn at_top(&self, percentage: f32) -> bool {
        percentage >= PERCENT_MAX - self.tolerance
    }

    pub fn at_bottom(&self, percentage: f32) -> bool {
        percentage <= PERCENT_MIN + self.tolerance
    }

    pub fn is_boundary(&self, percentage: f32) -> bool {
        self.at_top(percentage) || self.at_bottom(percentage)
    }

    /// Applies one frame's percentage. Returns `true` when a half rep was
    /// counted.
    pub fn observe(&mut self, percentage: f32) -> bool {
        match self.direction {
            Direction::Contracting if self.at_top(percentage) => {
                self.count.half_reps += 1;
                self.direction = Direction::Extended;
                true
            }
            Direction::Extended if self.at_bottom(percentage) => {
                self.count.half_reps += 1;
                self.direction = Direction::Contracting;
                true
            }
            _ => false,
        }
    }

    pub fn count(&self) -> RepCount {
        self.count
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn reset(&mut self) {
        self.count = RepCount::ZERO;
        self.direction = Direction::Contracting;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(counter: &mut RepCounter, values: &[f32]) {
        for &value in values {
            counter.observe(value);
        }
    }

    #[test]
    fn two_full_cycles_count_two() {
        let mut counter = RepCounter::new();
        feed(&mut counter, &[100.0, 0.0, 100.0, 0.0]);
        assert_eq!(counter.count().value(), 2.0);
        assert_eq!(counter.direction(), Direction::Contracting);
    }

    #[test]
    fn lingering_on_a_boundary_counts_once() {
        let mut counter = RepCounter::new();
        feed(&mut counter, &[100.0, 100.0, 0.0, 0.0]);
        assert_eq!(counter.count().value(), 1.0);
    }

    #[test]
    fn starting_at_bottom_does_not_count() {
        let mut counter = RepCounter::new();
        assert!(!counter.observe(0.0));
        assert!(counter.observe(100.0));
        assert_eq!(counter.count(), RepCount::from_half_reps(1));
        assert_eq!(counter.direction(), Direction::Extended);
    }

    #[test]
    fn near_boundary_values_need_exact_hits_by_default() {
        let mut counter = RepCounter::new();
        feed(&mut counter, &[99.999, 50.0, 0.001]);
        assert!(counter.count().is_zero());
    }

    #[test]
    fn tolerance_widens_the_boundary() {
        let mut counter = RepCounter::with_tolerance(2.0);
        feed(&mut counter, &[98.5, 1.5]);
        assert_eq!(counter.count().value(), 1.0);
        assert!(counter.is_boundary(99.0));
        assert!(!counter.is_boundary(50.0));
    }

    #[test]
    fn reset_clears_count_and_direction() {
        let mut counter = RepCounter::new();
        feed(&mut counter, &[100.0]);
        counter.reset();
        assert!(counter.count().is_zero());
        assert_eq!(counter.direction(), Direction::Contracting);
    }

    #[test]
    fn rep_count_renders_as_plain_number() {
        assert_eq!(RepCount::from_half_reps(4).to_string(), "2");
        assert_eq!(RepCount::from_half_reps(5).to_string(), "2.5");
        assert_eq!(RepCount::ZERO.to_string(), "0");
        assert_eq!(RepCount::from_half_reps(5).whole(), 2);
    }

    #[test]
    fn rep_count_parses_its_own_rendering() {
        assert_eq!("3".parse::<RepCount>().unwrap(), RepCount::from_half_reps(6));
        assert_eq!("3.5".parse::<RepCount>().unwrap(), RepCount::from_half_reps(7));
        assert_eq!("3.0".parse::<RepCount>().unwrap(), RepCount::from_half_reps(6));
        assert!("3.25".parse::<RepCount>().is_err());
        assert!("x".parse::<RepCount>().is_err());
    }

    #[test]
    fn parse_error_names_the_rejected_text() {
        let err = "2.7".parse::<RepCount>().unwrap_err();
        assert_eq!(err, ParseRepCountError("2.7".to_string()));
        assert_eq!(err.to_string(), "not a half-rep count: \"2.7\"");
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }
}
