use std::{fs::File, time::Duration};

use anyhow::{anyhow, Context, Result};
use roster_api::ApiConfig;
use serde::{Deserialize, Serialize};
use xdg::BaseDirectories;

/// User overrides for the simulated backend, read from
/// `$XDG_CONFIG_HOME/roster-tui/config.json`. Everything is optional; a
/// missing file just means defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub latency_ms: Option<u64>,
    pub lookup_latency_ms: Option<u64>,
    pub failure_rate: Option<f64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = BaseDirectories::with_prefix("roster-tui")?
            .find_config_file("config.json")
            .ok_or_else(|| anyhow!("config does not exist"))?;

        let file = File::open(&path).context("error opening config file")?;
        let config = serde_json::from_reader(&file).context("error deserialising config file")?;

        Ok(config)
    }

    /// Fold the overrides into the default API tuning.
    pub fn api_config(&self) -> ApiConfig {
        let mut config = ApiConfig::default();
        if let Some(ms) = self.latency_ms {
            config.latency = Duration::from_millis(ms);
        }
        if let Some(ms) = self.lookup_latency_ms {
            config.lookup_latency = Duration::from_millis(ms);
        }
        if let Some(rate) = self.failure_rate {
            config.failure_rate = rate.clamp(0.0, 1.0);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_keeps_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        let api = config.api_config();

        assert_eq!(api.latency, Duration::from_millis(800));
        assert_eq!(api.lookup_latency, Duration::from_millis(300));
        assert_eq!(api.failure_rate, 0.1);
    }

    #[test]
    fn test_overrides_apply_and_rate_is_clamped() {
        let config: Config =
            serde_json::from_str(r#"{"latencyMs": 5, "failureRate": 3.0}"#).unwrap();
        let api = config.api_config();

        assert_eq!(api.latency, Duration::from_millis(5));
        assert_eq!(api.failure_rate, 1.0);
    }
}
