use crate::api::{DecisionQuery, ServiceDecision};
use serde::{Deserialize, Serialize};

/// Tunable constants for the timing policy and its degraded-mode fallback.
///
/// Defaults match the durations the signal controller has always shipped
/// with, so a config file only needs to name the values it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub low_count_max: u32,
    pub medium_count_max: u32,
    pub low_green_secs: u32,
    pub medium_green_secs: u32,
    pub high_green_secs: u32,
    pub emergency_green_secs: u32,
    pub fallback_secs_per_vehicle: u32,
    pub fallback_floor_secs: u32,
    pub fallback_ceiling_secs: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            low_count_max: 2,
            medium_count_max: 5,
            low_green_secs: 10,
            medium_green_secs: 20,
            high_green_secs: 30,
            emergency_green_secs: 40,
            fallback_secs_per_vehicle: 3,
            fallback_floor_secs: 10,
            fallback_ceiling_secs: 60,
        }
    }
}

/// Common error type for decision-path failures.
#[derive(thiserror::Error, Debug)]
pub enum DecisionError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("journal write failure: {0}")]
    JournalWrite(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type DecisionResult<T> = Result<T, DecisionError>;

/// Trait describing the remote decision endpoint as seen by the client side.
pub trait DecisionBackend {
    fn request(&self, query: &DecisionQuery) -> DecisionResult<ServiceDecision>;
}

impl<B: DecisionBackend + ?Sized> DecisionBackend for Box<B> {
    fn request(&self, query: &DecisionQuery) -> DecisionResult<ServiceDecision> {
        (**self).request(query)
    }
}
