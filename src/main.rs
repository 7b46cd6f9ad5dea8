//! NFT Minter - one-shot ERC-721 mint submission
//!
//! Loads configuration, encodes the mint call from the compiled contract
//! artifact, then builds, signs, and broadcasts a single transaction through
//! the configured JSON-RPC provider. The outcome is logged; a failed
//! submission does not fail the process.

use anyhow::Result;
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, U256};
use std::path::Path;
use tracing::{debug, error, info, warn};

mod chain;
mod config;
mod contract;
mod error;
mod tx;

use chain::RpcChainClient;
use config::Settings;
use contract::{ContractArtifact, MintEncoder};
use error::{MinterError, MinterResult};
use tx::TransactionSubmitter;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    info!("Starting NFT minter v{}", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load()?;

    let sender: Address = settings
        .wallet
        .address
        .parse()
        .map_err(|e| MinterError::Config(format!("Invalid wallet address: {}", e)))?;
    let contract_address: Address = settings
        .contract
        .address
        .parse()
        .map_err(|e| MinterError::Config(format!("Invalid contract address: {}", e)))?;

    let wallet = load_wallet(&settings)?;
    info!("Minting from {:?} to contract {:?}", sender, contract_address);

    let artifact = ContractArtifact::load(Path::new(&settings.contract.artifact_path))?;
    let encoder = MintEncoder::new(artifact);

    // The minted token goes to the sender account
    let call_data = encoder.encode_mint(sender, &settings.mint.token_uri)?;
    debug!("Encoded mint call: 0x{}", hex::encode(&call_data));

    let client = RpcChainClient::new(&settings.provider.rpc_url, settings.provider.chain_id)?;
    let gas_price = U256::from(settings.mint.gas_price_gwei) * U256::from(1_000_000_000u64);
    let submitter = TransactionSubmitter::new(client, gas_price);

    match submitter
        .submit(
            sender,
            contract_address,
            &wallet,
            call_data,
            settings.mint.gas_limit,
        )
        .await
    {
        Ok(tx_hash) => {
            info!(
                "The hash of your transaction is: {:?}. Check the provider's mempool to view its status",
                tx_hash
            );
        }
        Err(e) => {
            error!("Something went wrong when submitting your transaction: {}", e);
            if e.is_pre_broadcast() {
                warn!("No transaction reached the network; the mint can be retried safely");
            }
        }
    }

    Ok(())
}

/// Load the signing wallet from the configured environment variable
fn load_wallet(settings: &Settings) -> MinterResult<LocalWallet> {
    let env_name = settings.private_key_env();
    let key = std::env::var(env_name).map_err(|_| {
        MinterError::Wallet(format!(
            "No wallet configured. Set {} to the sender's private key",
            env_name
        ))
    })?;

    let wallet = key
        .parse::<LocalWallet>()
        .map_err(|e| MinterError::Wallet(format!("Invalid private key: {}", e)))?;

    Ok(wallet.with_chain_id(settings.provider.chain_id))
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,nft_minter=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
