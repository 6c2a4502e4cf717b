use crate::feed::profile::VehicleObservation;
use trafficcore::control::OverrideController;
use trafficcore::journal::{DecisionJournal, DecisionRecord};
use trafficcore::policy::DensityBand;
use trafficcore::prelude::{DecisionBackend, PolicyConfig};
use trafficcore::resolver::{Provenance, TimingResolver};
use trafficcore::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};

pub type DynBackend = Box<dyn DecisionBackend + Send + Sync>;

/// Presentation payload for one completed decision cycle.
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub vehicle_count: u32,
    pub green_signal_time: u32,
    pub density: DensityBand,
    pub provenance: Provenance,
    pub override_active: bool,
}

/// Executes decision cycles: override check, timing resolution, journal
/// append. Every cycle completes with a valid green time even under total
/// network loss.
pub struct Runner {
    resolver: TimingResolver<DynBackend>,
    overrides: OverrideController,
    journal: DecisionJournal,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl Runner {
    pub fn new(
        backend: DynBackend,
        overrides: OverrideController,
        journal: DecisionJournal,
        policy: PolicyConfig,
    ) -> Self {
        Self {
            resolver: TimingResolver::new(backend, policy),
            overrides,
            journal,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new(),
        }
    }

    pub fn overrides(&self) -> &OverrideController {
        &self.overrides
    }

    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn execute(&self, observation: &VehicleObservation) -> CycleOutcome {
        let override_active = self.overrides.is_emergency();
        let resolved = self
            .resolver
            .resolve(observation.vehicle_count, override_active);

        // exactly one record per cycle, whichever path produced the value
        let record = DecisionRecord::new(observation.vehicle_count, resolved.green_signal_time);
        if let Err(err) = self.journal.append(&record) {
            self.logger.alert(&format!("journal append failed: {}", err));
            self.metrics.record_journal_error();
        }

        match resolved.provenance {
            Provenance::Service => self.metrics.record_service_decision(),
            Provenance::Fallback(_) => self.metrics.record_fallback_decision(),
            Provenance::Emergency => self.metrics.record_override_decision(),
        }

        CycleOutcome {
            vehicle_count: observation.vehicle_count,
            green_signal_time: resolved.green_signal_time,
            density: DensityBand::for_count(self.resolver.config(), observation.vehicle_count),
            provenance: resolved.provenance,
            override_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;
    use trafficcore::api::{DecisionQuery, ServiceDecision};
    use trafficcore::prelude::{DecisionError, DecisionResult};
    use trafficcore::resolver::FallbackCause;

    struct ScriptedBackend {
        green: Option<u32>,
        calls: Arc<AtomicUsize>,
    }

    impl DecisionBackend for ScriptedBackend {
        fn request(&self, _query: &DecisionQuery) -> DecisionResult<ServiceDecision> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.green {
                Some(secs) => Ok(ServiceDecision {
                    green_signal_time: secs,
                    timestamp: "2024-05-01T09:30:00+00:00".to_string(),
                }),
                None => Err(DecisionError::Transport("connection refused".to_string())),
            }
        }
    }

    fn runner_with(
        green: Option<u32>,
        emergency: bool,
        dir: &TempDir,
    ) -> (Runner, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let backend = ScriptedBackend {
            green,
            calls: calls.clone(),
        };
        let overrides = OverrideController::new();
        if emergency {
            overrides.activate();
        }
        let journal = DecisionJournal::open(dir.path().join("log.csv")).unwrap();
        let runner = Runner::new(
            Box::new(backend),
            overrides,
            journal,
            PolicyConfig::default(),
        );
        (runner, calls)
    }

    fn observation(frame_index: u64, vehicle_count: u32) -> VehicleObservation {
        VehicleObservation {
            frame_index,
            vehicle_count,
        }
    }

    #[test]
    fn cycle_journals_service_decision() {
        let dir = tempfile::tempdir().unwrap();
        let (runner, calls) = runner_with(Some(30), false, &dir);

        let outcome = runner.execute(&observation(0, 6));
        assert_eq!(outcome.green_signal_time, 30);
        assert_eq!(outcome.provenance, Provenance::Service);
        assert_eq!(outcome.density, DensityBand::High);
        assert!(!outcome.override_active);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let contents = fs::read_to_string(dir.path().join("log.csv")).unwrap();
        let rows: Vec<&str> = contents.lines().collect();
        assert_eq!(rows.len(), 1);
        let fields: Vec<&str> = rows[0].split(',').collect();
        assert!(!fields[0].is_empty());
        assert_eq!(fields[1], "6");
        assert_eq!(fields[2], "30");
    }

    #[test]
    fn cycle_falls_back_when_service_is_down() {
        let dir = tempfile::tempdir().unwrap();
        let (runner, _calls) = runner_with(None, false, &dir);

        let outcome = runner.execute(&observation(0, 4));
        assert_eq!(outcome.green_signal_time, 12);
        assert_eq!(
            outcome.provenance,
            Provenance::Fallback(FallbackCause::Transport)
        );

        let snapshot = runner.metrics_snapshot();
        assert_eq!(snapshot.fallback_decisions, 1);
        assert_eq!(snapshot.service_decisions, 0);

        // the degraded cycle still journals exactly one record
        let contents = fs::read_to_string(dir.path().join("log.csv")).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }

    #[test]
    fn override_cycle_skips_backend() {
        let dir = tempfile::tempdir().unwrap();
        let (runner, calls) = runner_with(Some(20), true, &dir);

        let outcome = runner.execute(&observation(0, 7));
        assert_eq!(outcome.green_signal_time, 40);
        assert_eq!(outcome.provenance, Provenance::Emergency);
        assert!(outcome.override_active);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(runner.metrics_snapshot().override_decisions, 1);
    }

    #[test]
    fn journal_rows_follow_cycle_order() {
        let dir = tempfile::tempdir().unwrap();
        let (runner, _calls) = runner_with(Some(20), false, &dir);

        for (frame, count) in [(0, 1), (1, 4), (2, 9)] {
            runner.execute(&observation(frame, count));
        }

        let contents = fs::read_to_string(dir.path().join("log.csv")).unwrap();
        let counts: Vec<String> = contents
            .lines()
            .map(|row| row.split(',').nth(1).unwrap().to_string())
            .collect();
        assert_eq!(counts, vec!["1", "4", "9"]);
    }
}
