use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed decision cycle; immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub timestamp: DateTime<Utc>,
    pub vehicle_count: u32,
    pub green_signal_time: u32,
}

impl DecisionRecord {
    pub fn new(vehicle_count: u32, green_signal_time: u32) -> Self {
        Self {
            timestamp: Utc::now(),
            vehicle_count,
            green_signal_time,
        }
    }

    /// Renders the record as a single newline-terminated CSV row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{}\n",
            self.timestamp.to_rfc3339(),
            self.vehicle_count,
            self.green_signal_time
        )
    }
}
