//! Sequences session runs across all wallets: positional wallet-proxy
//! pairing, one run at a time, a sampled pause between runs.

use crate::session::{RunOutcome, SessionRunner};
use core_logic::{
    uniform_sampler, ConfigError, DelaySampler, ProxyConfig, RunConfig, WalletCredential,
};
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub success: u64,
    pub failed: u64,
}

/// Pairs wallet i with proxy i. Requires at least as many proxies as
/// wallets; surplus proxies stay unused. Order-sensitive by contract:
/// reordering either input reassigns wallets to different proxies.
pub fn pair(
    keys: Vec<WalletCredential>,
    proxies: Vec<ProxyConfig>,
) -> Result<Vec<(WalletCredential, ProxyConfig)>, ConfigError> {
    if proxies.len() < keys.len() {
        return Err(ConfigError::ProxyShortage {
            wallets: keys.len(),
            proxies: proxies.len(),
        });
    }
    Ok(keys.into_iter().zip(proxies).collect())
}

pub struct BatchCoordinator {
    pairs: Vec<(WalletCredential, ProxyConfig)>,
    config: RunConfig,
    sampler: DelaySampler,
    token: CancellationToken,
}

impl BatchCoordinator {
    /// Validates config and pairing before any network activity.
    pub fn new(
        keys: Vec<WalletCredential>,
        proxies: Vec<ProxyConfig>,
        config: RunConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let pairs = pair(keys, proxies)?;
        Ok(Self {
            pairs,
            config,
            sampler: uniform_sampler(),
            token: CancellationToken::new(),
        })
    }

    pub fn with_delay_sampler(mut self, sampler: DelaySampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Token for external cancellation (Ctrl-C). Cancelling stops the loop
    /// between wallets or during the inter-wallet pause; a run already in
    /// flight completes first.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn wallet_count(&self) -> usize {
        self.pairs.len()
    }

    /// Runs every wallet strictly in input order. Failures are contained
    /// per wallet; the batch always proceeds to the next pair.
    pub async fn run(self) -> BatchSummary {
        let start = std::time::Instant::now();
        let total = self.pairs.len();
        let mut summary = BatchSummary::default();

        info!("Processing {} wallets sequentially", total);

        for (i, (credential, proxy)) in self.pairs.iter().enumerate() {
            if self.token.is_cancelled() {
                info!("Stopping (cancelled).");
                break;
            }

            info!("Processing wallet {}/{}", i + 1, total);

            match SessionRunner::new(credential, Some(proxy), &self.config) {
                Ok(mut runner) => {
                    let outcome = runner.run().await;
                    match outcome {
                        RunOutcome::Completed {
                            quest_claimed,
                            info_failures,
                        } => {
                            info!(
                                "Wallet {} Success (quest claimed: {}, info failures: {})",
                                runner.address(),
                                quest_claimed,
                                info_failures
                            );
                            summary.success += 1;
                        }
                        RunOutcome::LoginRejected => {
                            error!("Wallet {} Failed: login rejected", runner.address());
                            summary.failed += 1;
                        }
                        RunOutcome::Transport(e) => {
                            error!("Wallet {} Failed: {}", runner.address(), e);
                            summary.failed += 1;
                        }
                    }
                }
                Err(e) => {
                    // Malformed key or client construction failure: fatal to
                    // this wallet only.
                    error!("Skipping wallet {}/{}: {:#}", i + 1, total, e);
                    summary.failed += 1;
                }
            }

            let delay = (self.sampler)(self.config.delay_min, self.config.delay_max);
            info!("Delay before next wallet: {} seconds.", delay);
            tokio::select! {
                _ = self.token.cancelled() => {
                    info!("Stopping (cancelled during sleep).");
                    break;
                }
                _ = sleep(Duration::from_secs(delay)) => {}
            }
        }

        let elapsed = start.elapsed();
        let processed = summary.success + summary.failed;
        let rate = if processed > 0 {
            (summary.success as f64 / processed as f64) * 100.0
        } else {
            0.0
        };
        info!(
            "Batch complete in {:.1}s | Success: {} | Failed: {} | Rate: {:.2}%",
            elapsed.as_secs_f64(),
            summary.success,
            summary.failed,
            rate
        );

        summary
    }
}
