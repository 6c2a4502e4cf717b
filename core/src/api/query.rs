use crate::prelude::{DecisionError, DecisionResult};
use serde::{Deserialize, Serialize};

/// Request body accepted by the decision service.
///
/// Both fields default when absent, so a partial or over-specified body never
/// fails to deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionQuery {
    pub vehicle_count: i64,
    pub emergency: bool,
}

impl DecisionQuery {
    pub fn new(vehicle_count: u32, emergency: bool) -> Self {
        Self {
            vehicle_count: i64::from(vehicle_count),
            emergency,
        }
    }

    /// Rejects counts outside the non-negative domain before they reach the
    /// policy.
    pub fn validated_count(&self) -> DecisionResult<u32> {
        u32::try_from(self.vehicle_count).map_err(|_| {
            DecisionError::InvalidInput(format!(
                "vehicle count {} outside supported range",
                self.vehicle_count
            ))
        })
    }
}
