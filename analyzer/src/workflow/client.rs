use std::time::Duration;
use trafficcore::api::{DecisionQuery, ServiceDecision};
use trafficcore::prelude::{DecisionBackend, DecisionError, DecisionResult};

/// HTTP client for the decision service.
///
/// Send errors and non-success statuses classify as transport failures;
/// undecodable bodies classify as malformed responses.
pub struct HttpDecisionBackend {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpDecisionBackend {
    pub fn new(endpoint: &str, timeout: Duration) -> DecisionResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| DecisionError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

impl DecisionBackend for HttpDecisionBackend {
    fn request(&self, query: &DecisionQuery) -> DecisionResult<ServiceDecision> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(query)
            .send()
            .map_err(|err| DecisionError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DecisionError::Transport(format!(
                "decision service replied {}",
                status
            )));
        }

        let body = response
            .bytes()
            .map_err(|err| DecisionError::Transport(err.to_string()))?;
        ServiceDecision::from_json_slice(&body)
    }
}
