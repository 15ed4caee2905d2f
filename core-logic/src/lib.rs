//! # Core Logic - Shared Utilities for the Wallet Quest Bot
//!
//! This crate provides the infrastructure shared by the bot binary:
//! configuration, typed errors, credential/proxy loading and logging.
//!
//! ## Modules
//!
//! - [`config`] - Run configuration and proxy descriptor types
//! - [`error`] - Typed error handling with thiserror
//! - [`utils`] - Utility modules (wallets, proxies, logging, delays)

// Module declarations - internal modules marked pub(crate)
pub mod config;
pub mod error;
pub(crate) mod utils;

// Selective exports - only public API types
pub use config::{ProxyConfig, RunConfig};
pub use error::{ConfigError, CoreError, NetworkError, WalletError};

// Utils are pub(crate) - only export specific public utilities
pub use utils::{
    setup_logger, uniform_sampler, DelaySampler, ProxyManager, WalletCredential, WalletManager,
};
