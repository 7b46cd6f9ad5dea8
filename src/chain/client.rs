//! Chain client abstraction over the JSON-RPC provider
//!
//! The submitter only ever talks to the chain through [`ChainClient`], so it
//! can be exercised against a mock without a live provider.

use crate::error::{MinterError, MinterResult};
use crate::tx::{SignedTransaction, TransactionRequest};

use async_trait::async_trait;
use ethers::prelude::*;
use ethers::signers::{LocalWallet, Signer};
use ethers::types::BlockNumber;
use std::time::Duration;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

/// Capability interface for nonce lookup, signing, and broadcast
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Fetch the account's transaction count at the latest block
    async fn get_nonce(&self, address: Address) -> MinterResult<u64>;

    /// Sign a transaction request with the given wallet.
    ///
    /// Purely local; deterministic for the same request and key.
    async fn sign(
        &self,
        request: &TransactionRequest,
        wallet: &LocalWallet,
    ) -> MinterResult<SignedTransaction>;

    /// Broadcast raw signed bytes, returning the transaction hash
    async fn broadcast(&self, tx: &SignedTransaction) -> MinterResult<H256>;
}

/// Production client backed by an HTTP JSON-RPC provider
#[derive(Debug)]
pub struct RpcChainClient {
    provider: Provider<Http>,
    chain_id: u64,
}

impl RpcChainClient {
    /// Create a client for the given provider endpoint
    pub fn new(rpc_url: &str, chain_id: u64) -> MinterResult<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| MinterError::Config(format!("Invalid provider URL: {}", e)))?
            .interval(Duration::from_millis(100));

        Ok(Self { provider, chain_id })
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn get_nonce(&self, address: Address) -> MinterResult<u64> {
        let nonce = self
            .provider
            .get_transaction_count(address, Some(BlockNumber::Latest.into()))
            .await
            .map_err(|e| MinterError::NonceFetch {
                address: format!("{:?}", address),
                message: e.to_string(),
            })?;

        debug!("Fetched nonce {} for {:?}", nonce, address);
        Ok(nonce.as_u64())
    }

    async fn sign(
        &self,
        request: &TransactionRequest,
        wallet: &LocalWallet,
    ) -> MinterResult<SignedTransaction> {
        let typed = request.to_typed(self.chain_id);

        let signature = wallet
            .sign_transaction(&typed)
            .await
            .map_err(|e| MinterError::Signing(e.to_string()))?;

        Ok(SignedTransaction {
            raw: typed.rlp_signed(&signature),
        })
    }

    async fn broadcast(&self, tx: &SignedTransaction) -> MinterResult<H256> {
        let pending = self
            .provider
            .send_raw_transaction(tx.raw.clone())
            .await
            .map_err(|e| MinterError::Broadcast(e.to_string()))?;

        Ok(pending.tx_hash())
    }
}
