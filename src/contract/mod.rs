//! Contract artifact loading and mint call encoding
//!
//! The NFT contract interface comes from the compiled build artifact, a JSON
//! file carrying the ABI. Encoding is the only use made of it; the minter
//! never inspects the contract beyond its `mintNFT` entry point.

use crate::error::{MinterError, MinterResult};

use ethers::abi::{Abi, Token};
use ethers::types::{Address, Bytes};
use serde::Deserialize;
use std::path::Path;

/// Compiled contract artifact as emitted by the build pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct ContractArtifact {
    pub abi: Abi,
}

impl ContractArtifact {
    /// Load an artifact from disk
    pub fn load(path: &Path) -> MinterResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MinterError::Contract(format!("Failed to read artifact {:?}: {}", path, e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            MinterError::Contract(format!("Failed to parse artifact {:?}: {}", path, e))
        })
    }
}

/// Encoder for the NFT contract's mint entry point
pub struct MintEncoder {
    abi: Abi,
}

impl MintEncoder {
    pub fn new(artifact: ContractArtifact) -> Self {
        Self { abi: artifact.abi }
    }

    /// Encode a `mintNFT(address recipient, string tokenURI)` call.
    ///
    /// The token URI is passed through opaquely; the contract is what
    /// interprets it.
    pub fn encode_mint(&self, recipient: Address, token_uri: &str) -> MinterResult<Bytes> {
        let function = self
            .abi
            .function("mintNFT")
            .map_err(|e| MinterError::Contract(format!("mintNFT not found in ABI: {}", e)))?;

        let data = function
            .encode_input(&[
                Token::Address(recipient),
                Token::String(token_uri.to_string()),
            ])
            .map_err(|e| MinterError::Contract(format!("Failed to encode mint call: {}", e)))?;

        Ok(Bytes::from(data))
    }
}
