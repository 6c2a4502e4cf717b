use crate::prelude::PolicyConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display-facing density label derived from the same thresholds as the
/// green-time policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DensityBand {
    Low,
    Medium,
    High,
}

impl DensityBand {
    pub fn for_count(config: &PolicyConfig, vehicle_count: u32) -> Self {
        if vehicle_count <= config.low_count_max {
            DensityBand::Low
        } else if vehicle_count <= config.medium_count_max {
            DensityBand::Medium
        } else {
            DensityBand::High
        }
    }
}

impl fmt::Display for DensityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DensityBand::Low => write!(f, "Low"),
            DensityBand::Medium => write!(f, "Medium"),
            DensityBand::High => write!(f, "High"),
        }
    }
}
