use log::{debug, info, warn};

/// Scoped logger owned by long-lived components; every line carries the
/// component name.
#[derive(Debug, Clone)]
pub struct LogManager {
    scope: &'static str,
}

impl LogManager {
    pub fn new(scope: &'static str) -> Self {
        Self { scope }
    }

    /// Lifecycle events: sessions, saved entries, mode changes.
    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.scope, message);
    }

    /// Per-frame detail, too chatty for `info`.
    pub fn trace_frame(&self, message: &str) {
        debug!("[{}] {}", self.scope, message);
    }

    pub fn warn(&self, message: &str) {
        warn!("[{}] {}", self.scope, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("repcore")
    }
}
