use crate::api::DecisionQuery;
use crate::policy::fallback_green_time;
use crate::prelude::{DecisionBackend, DecisionError, PolicyConfig};
use crate::telemetry::LogManager;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the local fallback produced the duration instead of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackCause {
    Transport,
    MalformedResponse,
}

/// Which path produced a resolved duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    Service,
    Fallback(FallbackCause),
    Emergency,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Service => write!(f, "service"),
            Provenance::Fallback(FallbackCause::Transport) => write!(f, "fallback/transport"),
            Provenance::Fallback(FallbackCause::MalformedResponse) => {
                write!(f, "fallback/malformed-response")
            }
            Provenance::Emergency => write!(f, "emergency"),
        }
    }
}

/// A finalized green-time decision with its provenance tag.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedTiming {
    pub green_signal_time: u32,
    pub provenance: Provenance,
}

/// Client-side caller of the decision service.
///
/// Never fails: an active emergency short-circuits with zero network cost,
/// and every request failure lands on the local fallback formula.
pub struct TimingResolver<B> {
    backend: B,
    config: PolicyConfig,
    logger: LogManager,
}

impl<B: DecisionBackend> TimingResolver<B> {
    pub fn new(backend: B, config: PolicyConfig) -> Self {
        Self {
            backend,
            config,
            logger: LogManager::new(),
        }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn resolve(&self, vehicle_count: u32, emergency: bool) -> ResolvedTiming {
        if emergency {
            return ResolvedTiming {
                green_signal_time: self.config.emergency_green_secs,
                provenance: Provenance::Emergency,
            };
        }

        let query = DecisionQuery::new(vehicle_count, false);
        match self.backend.request(&query) {
            Ok(decision) => ResolvedTiming {
                green_signal_time: decision.green_signal_time,
                provenance: Provenance::Service,
            },
            Err(err) => {
                let cause = match err {
                    DecisionError::MalformedResponse(_) => FallbackCause::MalformedResponse,
                    _ => FallbackCause::Transport,
                };
                self.logger.alert(&format!(
                    "decision service unavailable, using fallback: {}",
                    err
                ));
                ResolvedTiming {
                    green_signal_time: fallback_green_time(&self.config, vehicle_count),
                    provenance: Provenance::Fallback(cause),
                }
            }
        }
    }
}
