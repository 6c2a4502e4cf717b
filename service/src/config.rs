use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use trafficcore::prelude::PolicyConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub port: u16,
    pub policy: PolicyConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            policy: PolicyConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading service config {}", path_ref.display()))?;
        let config: ServiceConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing service config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_keeps_policy_defaults() {
        let cfg = ServiceConfig::from_args(8080);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.policy.low_green_secs, 10);
        assert_eq!(cfg.policy.emergency_green_secs, 40);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"port: 6000\npolicy:\n  emergency_green_secs: 45\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = ServiceConfig::load(&path).unwrap();
        assert_eq!(cfg.port, 6000);
        assert_eq!(cfg.policy.emergency_green_secs, 45);
        assert_eq!(cfg.policy.medium_green_secs, 20);
    }
}
