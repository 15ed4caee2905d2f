use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Shared run configuration, loaded once and read-only across all wallet runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Lower bound of the inter-wallet pause, in whole seconds (inclusive).
    pub delay_min: u64,
    /// Upper bound of the inter-wallet pause, in whole seconds (inclusive).
    pub delay_max: u64,
    /// Referral code sent with login and embedded in the Referer header.
    pub invite_code: String,
    /// Service origin. Overridable so tests can point at a local server.
    pub base_url: String,
    /// When false, requests go out directly instead of through the
    /// per-wallet proxy. Pairing is still validated either way.
    pub use_proxy: bool,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delay_min > self.delay_max {
            return Err(ConfigError::InvalidValue {
                field: "delay_min".to_string(),
                reason: format!(
                    "delay_min ({}) must not exceed delay_max ({})",
                    self.delay_min, self.delay_max
                ),
            });
        }
        if self.invite_code.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "invite_code".to_string(),
            });
        }
        Ok(())
    }
}

/// One outbound proxy, parsed from a `host:port:username:password` line.
/// Assigned to exactly one wallet by position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl ProxyConfig {
    /// Base URL without credentials, suitable for `reqwest::Proxy::all`.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Full authority form with inline credentials, for log lines.
    pub fn authority(&self) -> String {
        format!(
            "http://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port
        )
    }
}
