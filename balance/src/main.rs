use anyhow::Result;
use balance::config::BalanceConfig;
use balance::coordinator::BatchCoordinator;
use clap::Parser;
use core_logic::{setup_logger, ProxyManager, WalletManager};
use dotenv::dotenv;
use tokio::signal;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: String,
    #[arg(short, long, default_value = "pkey.txt")]
    keys: String,
    #[arg(short, long, default_value = "proxies.txt")]
    proxies: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = setup_logger();
    // Keep guard alive for file logging
    std::mem::forget(_log_guard);
    dotenv().ok();

    let args = Args::parse();
    info!("Loading config from: {}", args.config);

    let config = BalanceConfig::load(&args.config).map_err(|e| {
        error!("Failed to load config: {}", e);
        e
    })?;
    let run_config = config.to_run_config()?;

    let keys = WalletManager::load_keys(&args.keys)?;
    let proxies = ProxyManager::load_proxies(&args.proxies)?;

    // Fails on proxy shortage before any network activity.
    let coordinator = BatchCoordinator::new(keys, proxies, run_config)?;
    info!("Validated {} wallet/proxy pairs.", coordinator.wallet_count());

    let token = coordinator.cancellation_token();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C. Finishing current wallet, then stopping...");
                token.cancel();
            }
            Err(err) => {
                error!("Unable to listen for shutdown signal: {}", err);
            }
        }
    });

    coordinator.run().await;

    Ok(())
}
