use crate::api;
use anyhow::Result;
use config::{Config, File};
use core_logic::{ConfigError, RunConfig};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BalanceConfig {
    pub delay_min: u64,
    pub delay_max: u64,
    pub invite_code: String,
    pub base_url: Option<String>,
    pub use_proxy: Option<bool>,
}

impl BalanceConfig {
    pub fn load(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path))
            .build()?;

        settings.try_deserialize().map_err(|e| anyhow::anyhow!(e))
    }

    pub fn to_run_config(&self) -> Result<RunConfig, ConfigError> {
        let run = RunConfig {
            delay_min: self.delay_min,
            delay_max: self.delay_max,
            invite_code: self.invite_code.clone(),
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| api::DEFAULT_BASE_URL.to_string()),
            use_proxy: self.use_proxy.unwrap_or(true),
        };
        run.validate()?;
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_minimal_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "delay_min = 5\ndelay_max = 30\ninvite_code = \"ABC123\"\n",
        )
        .unwrap();

        let cfg = BalanceConfig::load(path.to_str().unwrap()).unwrap();
        let run = cfg.to_run_config().unwrap();

        assert_eq!(run.delay_min, 5);
        assert_eq!(run.delay_max, 30);
        assert_eq!(run.invite_code, "ABC123");
        assert_eq!(run.base_url, api::DEFAULT_BASE_URL);
        assert!(run.use_proxy);
    }

    #[test]
    fn test_load_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            concat!(
                "delay_min = 0\n",
                "delay_max = 0\n",
                "invite_code = \"ABC123\"\n",
                "base_url = \"http://127.0.0.1:9999\"\n",
                "use_proxy = false\n",
            ),
        )
        .unwrap();

        let run = BalanceConfig::load(path.to_str().unwrap())
            .unwrap()
            .to_run_config()
            .unwrap();

        assert_eq!(run.base_url, "http://127.0.0.1:9999");
        assert!(!run.use_proxy);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_config.toml");

        // Propagated to main, where it aborts with a nonzero exit.
        assert!(BalanceConfig::load(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_inverted_delay_bounds_rejected() {
        let cfg = BalanceConfig {
            delay_min: 30,
            delay_max: 5,
            invite_code: "ABC123".to_string(),
            base_url: None,
            use_proxy: None,
        };

        assert!(cfg.to_run_config().is_err());
    }
}
