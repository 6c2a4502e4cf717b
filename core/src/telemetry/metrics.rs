use std::sync::Mutex;

/// Counter snapshot for end-of-run summaries and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub service_decisions: usize,
    pub fallback_decisions: usize,
    pub override_decisions: usize,
    pub journal_errors: usize,
}

/// In-process counters over the decision paths.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_service_decision(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.service_decisions += 1;
        }
    }

    pub fn record_fallback_decision(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.fallback_decisions += 1;
        }
    }

    pub fn record_override_decision(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.override_decisions += 1;
        }
    }

    pub fn record_journal_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.journal_errors += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
