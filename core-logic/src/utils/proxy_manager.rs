use crate::config::ProxyConfig;
use crate::error::ConfigError;
use std::fs;
use std::path::Path;
use tracing::info;

pub struct ProxyManager;

impl ProxyManager {
    /// Loads proxies from a newline-delimited file, preserving order.
    /// Format expected: independent lines of `host:port:username:password`.
    ///
    /// A malformed line is an error rather than a skip: wallets are paired
    /// with proxies by position, so dropping a line would silently shift
    /// every assignment after it.
    pub fn load_proxies(path: impl AsRef<Path>) -> Result<Vec<ProxyConfig>, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            msg: e.to_string(),
        })?;

        let mut proxies = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            proxies.push(Self::parse_line(line)?);
        }

        info!("Loaded {} proxies from {}", proxies.len(), path.display());
        Ok(proxies)
    }

    pub fn parse_line(line: &str) -> Result<ProxyConfig, ConfigError> {
        let parts: Vec<&str> = line.split(':').collect();
        if parts.len() != 4 {
            return Err(ConfigError::InvalidValue {
                field: "proxy".to_string(),
                reason: format!(
                    "expected host:port:username:password, got {} fields",
                    parts.len()
                ),
            });
        }

        let port: u16 = parts[1].parse().map_err(|e| ConfigError::ParseError {
            field: "proxy.port".to_string(),
            source: e,
        })?;

        Ok(ProxyConfig {
            host: parts[0].to_string(),
            port,
            username: parts[2].to_string(),
            password: parts[3].to_string(),
        })
    }
}
