use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// Operator-facing override mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverrideState {
    Normal,
    Emergency,
}

/// Shared handle over the emergency override.
///
/// Activation is idempotent and comes from explicit operator action only,
/// never from detection results. No clearing transition exists: once active,
/// the override holds until the process restarts.
#[derive(Clone)]
pub struct OverrideController {
    state: Arc<RwLock<OverrideState>>,
}

impl OverrideController {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(OverrideState::Normal)),
        }
    }

    pub fn activate(&self) -> OverrideState {
        if let Ok(mut state) = self.state.write() {
            *state = OverrideState::Emergency;
        }
        OverrideState::Emergency
    }

    pub fn state(&self) -> OverrideState {
        self.state
            .read()
            .map(|state| *state)
            .unwrap_or(OverrideState::Normal)
    }

    pub fn is_emergency(&self) -> bool {
        self.state() == OverrideState::Emergency
    }
}

impl Default for OverrideController {
    fn default() -> Self {
        Self::new()
    }
}
