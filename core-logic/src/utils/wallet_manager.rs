use crate::error::ConfigError;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// One wallet's raw private key material. Held only for the duration of a
/// single session run; the backing memory is wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletCredential {
    key: String,
}

impl WalletCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for WalletCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletCredential")
            .field("key", &"***REDACTED***")
            .finish()
    }
}

pub struct WalletManager;

impl WalletManager {
    /// Loads private keys from a newline-delimited file, preserving order.
    /// Blank lines and `#` comments are skipped.
    pub fn load_keys(path: impl AsRef<Path>) -> Result<Vec<WalletCredential>, ConfigError> {
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

        let keys: Vec<WalletCredential> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(WalletCredential::new)
            .collect();

        info!("Loaded {} private keys from {}", keys.len(), path.display());
        Ok(keys)
    }
}
