use serde::Serialize;

/// One percentage reading, timed from the start of the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleSample {
    pub elapsed_secs: f64,
    pub percentage: f32,
}

/// Ordered samples of the running session.
#[derive(Debug, Clone, Default)]
pub struct SampleSeries {
    samples: Vec<AngleSample>,
}

impl SampleSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, elapsed_secs: f64, percentage: f32) {
        self.samples.push(AngleSample {
            elapsed_secs,
            percentage,
        });
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AngleSample> + '_ {
        self.samples.iter()
    }

    /// Time between the first and last sample.
    pub fn span_secs(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => (last.elapsed_secs - first.elapsed_secs).max(0.0),
            _ => 0.0,
        }
    }

    /// The most recent `count` percentages, oldest first.
    pub fn recent_percentages(&self, count: usize) -> Vec<f32> {
        let start = self.samples.len().saturating_sub(count);
        self.samples[start..].iter().map(|s| s.percentage).collect()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_covers_first_to_last() {
        let mut series = SampleSeries::new();
        assert_eq!(series.span_secs(), 0.0);
        series.push(0.5, 10.0);
        series.push(2.0, 90.0);
        assert_eq!(series.span_secs(), 1.5);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn recent_percentages_keeps_the_tail() {
        let mut series = SampleSeries::new();
        for step in 0..5 {
            series.push(step as f64, step as f32 * 10.0);
        }
        assert_eq!(series.recent_percentages(2), vec![30.0, 40.0]);
        assert_eq!(series.recent_percentages(10).len(), 5);
        series.clear();
        assert!(series.is_empty());
    }
}
