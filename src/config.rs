//! Configuration management for the NFT minter
//!
//! Loads configuration from TOML files with environment variable substitution.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub provider: ProviderConfig,
    pub wallet: WalletConfig,
    pub contract: ContractConfig,
    pub mint: MintConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub rpc_url: String,
    pub chain_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    /// Sender account address, hex-encoded
    pub address: String,
    /// Name of the environment variable holding the hex private key
    pub private_key_env: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractConfig {
    /// Deployed NFT contract address, hex-encoded
    pub address: String,
    /// Path to the compiled contract artifact (JSON with an `abi` field)
    pub artifact_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MintConfig {
    /// Token metadata URI passed through to the mint call, not interpreted
    pub token_uri: String,
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,
    pub gas_price_gwei: u64,
}

fn default_gas_limit() -> u64 {
    500_000
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = env::var("MINTER_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config/default.toml"));

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        // Substitute environment variables
        let config_str = substitute_env_vars(&config_str);

        let settings: Settings =
            toml::from_str(&config_str).with_context(|| "Failed to parse configuration")?;

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.provider.rpc_url.is_empty() {
            anyhow::bail!("provider.rpc_url is empty - set the provider endpoint URL");
        }
        if self.wallet.address.is_empty() {
            anyhow::bail!("wallet.address is empty - set the sender account address");
        }
        if self.contract.address.is_empty() {
            anyhow::bail!("contract.address is empty - set the deployed NFT contract address");
        }
        if self.contract.artifact_path.is_empty() {
            anyhow::bail!("contract.artifact_path is empty - point it at the compiled artifact");
        }
        if self.mint.token_uri.is_empty() {
            anyhow::bail!("mint.token_uri is empty - set the token metadata URI");
        }
        if self.mint.gas_limit == 0 {
            anyhow::bail!("mint.gas_limit must be greater than zero");
        }

        Ok(())
    }

    /// Name of the environment variable holding the private key
    pub fn private_key_env(&self) -> &str {
        self.wallet.private_key_env.as_deref().unwrap_or("PRIVATE_KEY")
    }
}

/// Substitute environment variables in the format ${VAR_NAME}
fn substitute_env_vars(input: &str) -> String {
    let mut result = input.to_string();
    let re = regex::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        let var_value = env::var(var_name).unwrap_or_default();
        result = result.replace(&cap[0], &var_value);
    }

    result
}
