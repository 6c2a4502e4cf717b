pub mod timing;

pub use timing::{FallbackCause, Provenance, ResolvedTiming, TimingResolver};
