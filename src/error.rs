//! Error types for the NFT minter

use thiserror::Error;

/// Main error type for the minter
#[derive(Error, Debug)]
pub enum MinterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Contract error: {0}")]
    Contract(String),

    #[error("Failed to fetch nonce for {address}: {message}")]
    NonceFetch { address: String, message: String },

    #[error("Failed to sign transaction: {0}")]
    Signing(String),

    #[error("Provider rejected transaction: {0}")]
    Broadcast(String),
}

impl MinterError {
    /// Check if the error occurred before any transaction bytes reached the
    /// network. A pre-broadcast failure cannot have landed on chain, so the
    /// mint can be rerun without risking a duplicate.
    pub fn is_pre_broadcast(&self) -> bool {
        !matches!(self, MinterError::Broadcast(_))
    }
}

/// Result type for minter operations
pub type MinterResult<T> = Result<T, MinterError>;
