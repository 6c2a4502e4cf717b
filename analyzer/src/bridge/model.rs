use crate::workflow::runner::CycleOutcome;
use serde::{Deserialize, Serialize};

/// Latest decision state exposed to the presentation surface.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PanelModel {
    pub vehicle_count: u32,
    pub green_signal_time: u32,
    pub density_label: String,
    pub override_active: bool,
    pub decision_source: String,
}

impl PanelModel {
    pub fn from_outcome(outcome: &CycleOutcome) -> Self {
        Self {
            vehicle_count: outcome.vehicle_count,
            green_signal_time: outcome.green_signal_time,
            density_label: outcome.density.to_string(),
            override_active: outcome.override_active,
            decision_source: outcome.provenance.to_string(),
        }
    }
}
