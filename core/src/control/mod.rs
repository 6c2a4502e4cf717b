pub mod overrides;

pub use overrides::{OverrideController, OverrideState};
