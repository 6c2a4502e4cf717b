use crate::prelude::{DecisionError, DecisionResult};
use serde::{Deserialize, Serialize};

/// Response body produced by the decision service.
///
/// The timestamp records the service's wall-clock time of computation and is
/// observational only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDecision {
    pub green_signal_time: u32,
    pub timestamp: String,
}

impl ServiceDecision {
    /// Parses a response body, classifying undecodable or out-of-range
    /// payloads as malformed.
    pub fn from_json_slice(body: &[u8]) -> DecisionResult<Self> {
        let decision: ServiceDecision = serde_json::from_slice(body)
            .map_err(|err| DecisionError::MalformedResponse(err.to_string()))?;
        if decision.green_signal_time == 0 {
            return Err(DecisionError::MalformedResponse(
                "green_signal_time must be positive".to_string(),
            ));
        }
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_body_parses() {
        let body = br#"{"green_signal_time": 20, "timestamp": "2024-05-01T09:30:00+00:00"}"#;
        let decision = ServiceDecision::from_json_slice(body).unwrap();
        assert_eq!(decision.green_signal_time, 20);
        assert!(!decision.timestamp.is_empty());
    }

    #[test]
    fn missing_green_time_is_malformed() {
        let body = br#"{"timestamp": "2024-05-01T09:30:00+00:00"}"#;
        assert!(matches!(
            ServiceDecision::from_json_slice(body),
            Err(DecisionError::MalformedResponse(_))
        ));
    }

    #[test]
    fn zero_green_time_is_malformed() {
        let body = br#"{"green_signal_time": 0, "timestamp": "2024-05-01T09:30:00+00:00"}"#;
        assert!(matches!(
            ServiceDecision::from_json_slice(body),
            Err(DecisionError::MalformedResponse(_))
        ));
    }
}
