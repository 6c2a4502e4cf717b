use crate::prelude::PolicyConfig;

/// Local degraded-mode formula used when the decision service is unreachable.
///
/// Linear in the count and deliberately distinct from the stepped policy;
/// the clamp guarantees a usable duration for every input.
pub fn fallback_green_time(config: &PolicyConfig, vehicle_count: u32) -> u32 {
    let scaled = vehicle_count.saturating_mul(config.fallback_secs_per_vehicle);
    // floor never exceeds ceiling, so the clamp cannot panic
    let floor = config.fallback_floor_secs.min(config.fallback_ceiling_secs);
    scaled.clamp(floor, config.fallback_ceiling_secs)
}
