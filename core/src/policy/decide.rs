use crate::prelude::PolicyConfig;

/// Stepped green-time policy; rules are evaluated in order and the first
/// match wins.
pub struct DecisionPolicy {
    config: PolicyConfig,
}

impl DecisionPolicy {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Total over all counts; the emergency flag takes precedence over any
    /// vehicle count.
    pub fn decide(&self, vehicle_count: u32, emergency: bool) -> u32 {
        if emergency {
            self.config.emergency_green_secs
        } else if vehicle_count <= self.config.low_count_max {
            self.config.low_green_secs
        } else if vehicle_count <= self.config.medium_count_max {
            self.config.medium_green_secs
        } else {
            self.config.high_green_secs
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> DecisionPolicy {
        DecisionPolicy::new(PolicyConfig::default())
    }

    #[test]
    fn emergency_takes_precedence() {
        let policy = policy();
        assert_eq!(policy.decide(0, true), 40);
        assert_eq!(policy.decide(100, true), 40);
    }

    #[test]
    fn counts_step_through_thresholds() {
        let policy = policy();
        assert_eq!(policy.decide(0, false), 10);
        assert_eq!(policy.decide(2, false), 10);
        assert_eq!(policy.decide(3, false), 20);
        assert_eq!(policy.decide(5, false), 20);
        assert_eq!(policy.decide(6, false), 30);
    }

    #[test]
    fn normal_output_is_monotonic_and_bounded() {
        let policy = policy();
        let mut previous = 0;
        for count in 0..=50 {
            let green = policy.decide(count, false);
            assert!(green >= previous);
            assert!([10, 20, 30].contains(&green));
            previous = green;
        }
    }
}
