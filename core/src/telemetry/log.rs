use log::{info, warn};

/// Thin wrapper over the `log` facade shared by the decision components.
pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }

    /// Non-fatal degradation notices: fallback activations, journal write
    /// failures.
    pub fn alert(&self, message: &str) {
        warn!("{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
