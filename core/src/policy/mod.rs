pub mod decide;
pub mod density;
pub mod fallback;

pub use decide::DecisionPolicy;
pub use density::DensityBand;
pub use fallback::fallback_green_time;
