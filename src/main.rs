//! Swap execution CLI
//!
//! Takes an ABI-encoded quote payload, validates it against the router
//! registry and the price oracle, and executes it through the swap engine.
//!
//! Router validation has two modes:
//! - default: on-chain AugustusRegistry lookup
//! - ROUTER_ALLOWLIST_FILE set: offline JSON allowlist, no extra RPC

use alloy::hex;
use alloy::network::EthereumWallet;
use alloy::primitives::{Address, U256};
use alloy::providers::ProviderBuilder;
use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result};
use clap::Parser;
use std::str::FromStr;
use std::sync::Arc;
use swapguard::engine::{PriceOracle, RouterRegistry, SettlementAccount, SwapExecutor};
use swapguard::onchain::{AugustusRegistryClient, OnchainPriceOracle, WalletSettlement};
use swapguard::quote::QuotePayload;
use swapguard::registry::RouterAllowlistFilter;
use swapguard::types::SwapRequest;
use swapguard::{load_config, load_config_from_file};
use tracing::{info, Level};

/// Augustus swap executor with invariant enforcement
#[derive(Parser)]
#[command(name = "swapguard")]
struct Args {
    /// ABI-encoded swap payload, hex (0x prefix optional)
    #[arg(long)]
    payload: String,

    /// Asset being sold
    #[arg(long)]
    source_asset: String,

    /// Asset being bought
    #[arg(long)]
    dest_asset: String,

    /// Override the quoted minimum destination amount (base units)
    #[arg(long)]
    min_dest_amount: Option<String>,

    /// Chain-specific env file (e.g. .env.polygon); defaults to .env
    #[arg(long, env = "ENV_FILE")]
    env_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let args = Args::parse();

    let config = match &args.env_file {
        Some(path) => load_config_from_file(path)?,
        None => load_config()?,
    };
    info!("Configuration loaded (chain_id: {})", config.chain_id);
    info!("RPC URL: {}", &config.rpc_url[..40.min(config.rpc_url.len())]);
    info!("Max slippage: {} bps", config.max_slippage_bps);

    // Wallet-filled provider: every transaction is signed locally.
    let signer = PrivateKeySigner::from_str(config.private_key.trim())
        .context("PRIVATE_KEY is not a valid private key")?;
    let owner = signer.address();
    let wallet = EthereumWallet::from(signer);
    let provider = Arc::new(
        ProviderBuilder::new()
            .wallet(wallet)
            .connect(&config.rpc_url)
            .await
            .context("Failed to connect provider")?,
    );
    info!("Connected. Executing as {}", owner);

    let source_asset = Address::from_str(args.source_asset.trim())
        .context("Invalid --source-asset address")?;
    let dest_asset =
        Address::from_str(args.dest_asset.trim()).context("Invalid --dest-asset address")?;
    let min_dest_amount = args
        .min_dest_amount
        .as_deref()
        .map(|raw| U256::from_str(raw).context("Invalid --min-dest-amount"))
        .transpose()?;

    let payload_bytes =
        hex::decode(args.payload.trim_start_matches("0x")).context("Invalid payload hex")?;
    let payload = QuotePayload::decode(&payload_bytes)?;
    info!(
        "Payload decoded: router={} src_amount={} dest_amount={} patch_offset={:?}",
        payload.router, payload.src_amount, payload.dest_amount, payload.patch_offset
    );
    let request = payload.into_swap_request(source_asset, dest_asset, min_dest_amount)?;

    let oracle = OnchainPriceOracle::new(Arc::clone(&provider), config.price_oracle);
    let account = WalletSettlement::new(Arc::clone(&provider), owner);

    match &config.router_allowlist_file {
        Some(path) => {
            let allowlist = RouterAllowlistFilter::load(path, config.chain_id)?;
            run_swap(allowlist, oracle, account, config.max_slippage_bps, request).await
        }
        None => {
            let registry =
                AugustusRegistryClient::new(Arc::clone(&provider), config.augustus_registry);
            run_swap(registry, oracle, account, config.max_slippage_bps, request).await
        }
    }
}

async fn run_swap<R, O, S>(
    registry: R,
    oracle: O,
    account: S,
    max_slippage_bps: u32,
    request: SwapRequest,
) -> Result<()>
where
    R: RouterRegistry,
    O: PriceOracle,
    S: SettlementAccount,
{
    let executor = SwapExecutor::new(registry, oracle, account, max_slippage_bps);
    let result = executor
        .execute(request)
        .await
        .context("Swap execution failed")?;
    info!("Swap settled: received {}", result.amount_received);
    Ok(())
}
