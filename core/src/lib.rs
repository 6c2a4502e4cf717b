//! Decision core for the adaptive traffic-signal timing platform.
//!
//! The modules cover the signal-timing decision path end to end: the stepped
//! green-time policy and its degraded-mode fallback, the resilient timing
//! resolver, the operator emergency override, and the append-only decision
//! journal.

pub mod api;
pub mod control;
pub mod journal;
pub mod policy;
pub mod prelude;
pub mod resolver;
pub mod telemetry;

pub use prelude::{DecisionBackend, DecisionError, DecisionResult, PolicyConfig};
