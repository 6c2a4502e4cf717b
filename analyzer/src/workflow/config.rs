use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use trafficcore::prelude::PolicyConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub decision_endpoint: String,
    pub request_timeout_secs: u64,
    pub journal_path: PathBuf,
    pub policy: PolicyConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            decision_endpoint: "http://127.0.0.1:5000/process".to_string(),
            request_timeout_secs: 5,
            journal_path: PathBuf::from("tools/data/traffic_log.csv"),
            policy: PolicyConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading analyzer config {}", path_ref.display()))?;
        let config: AnalyzerConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing analyzer config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        endpoint: Option<String>,
        timeout_secs: u64,
        journal: Option<PathBuf>,
    ) -> Self {
        let mut config = Self::default();
        if let Some(endpoint) = endpoint {
            config.decision_endpoint = endpoint;
        }
        config.request_timeout_secs = timeout_secs;
        if let Some(journal) = journal {
            config.journal_path = journal;
        }
        config
    }
}
