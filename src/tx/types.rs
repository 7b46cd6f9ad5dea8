//! Transaction types for the submission pipeline

use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, U256};

/// A fully specified transaction, ready for signing.
///
/// Immutable once constructed; built fresh for every submission with the
/// nonce fetched in that same submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub nonce: u64,
    pub gas_limit: u64,
    pub gas_price: U256,
    pub data: Bytes,
}

impl TransactionRequest {
    /// Convert to the wire representation signed by the wallet.
    ///
    /// The chain id is baked in here so the signature carries EIP-155
    /// replay protection.
    pub fn to_typed(&self, chain_id: u64) -> TypedTransaction {
        ethers::types::TransactionRequest::new()
            .from(self.from)
            .to(self.to)
            .nonce(self.nonce)
            .gas(self.gas_limit)
            .gas_price(self.gas_price)
            .data(self.data.clone())
            .chain_id(chain_id)
            .into()
    }
}

/// RLP-encoded transaction plus signature, ready for broadcast.
///
/// Derived deterministically from a request and a key; used exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub raw: Bytes,
}
