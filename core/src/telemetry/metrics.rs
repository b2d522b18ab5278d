use serde::Serialize;

/// Per-session frame counters.
#[derive(Debug, Default)]
pub struct MetricsRecorder {
    inner: FrameMetrics,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameMetrics {
    pub tracked: usize,
    pub without_landmarks: usize,
    pub missing: usize,
}

impl FrameMetrics {
    pub fn total_ticks(&self) -> usize {
        self.tracked + self.without_landmarks + self.missing
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_tracked(&mut self) {
        self.inner.tracked += 1;
    }

    pub fn record_without_landmarks(&mut self) {
        self.inner.without_landmarks += 1;
    }

    pub fn record_missing(&mut self) {
        self.inner.missing += 1;
    }

    pub fn snapshot(&self) -> FrameMetrics {
        self.inner
    }

    pub fn reset(&mut self) {
        self.inner = FrameMetrics::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_outcome_separately() {
        let mut metrics = MetricsRecorder::new();
        metrics.record_tracked();
        metrics.record_tracked();
        metrics.record_missing();
        metrics.record_without_landmarks();
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.tracked, 2);
        assert_eq!(snapshot.total_ticks(), 4);
        metrics.reset();
        assert_eq!(metrics.snapshot(), FrameMetrics::default());
    }
}
