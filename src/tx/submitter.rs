//! Single-shot transaction submission
//!
//! The submission sequence is strictly linear: fetch nonce, build the
//! request, sign, broadcast. Exactly one attempt is made per call; any retry
//! policy belongs to the caller. Concurrent submissions for the same sender
//! race on the nonce and are likewise the caller's responsibility.

use crate::chain::ChainClient;
use crate::error::MinterResult;
use crate::tx::TransactionRequest;

use ethers::signers::LocalWallet;
use ethers::types::{Address, Bytes, H256, U256};
use tracing::{debug, info};

/// Builds, signs, and broadcasts one transaction per call
pub struct TransactionSubmitter<C> {
    client: C,
    /// Gas price attached to every request, in wei
    gas_price: U256,
}

impl<C: ChainClient> TransactionSubmitter<C> {
    /// Create a new submitter over the given chain client
    pub fn new(client: C, gas_price: U256) -> Self {
        Self { client, gas_price }
    }

    /// Submit one signed transaction carrying `call_data` to `recipient`.
    ///
    /// The nonce is fetched from the provider immediately before signing, so
    /// it reflects the sender's latest on-chain transaction count. On failure
    /// the error identifies the stage that failed; stages after it were never
    /// entered.
    pub async fn submit(
        &self,
        sender: Address,
        recipient: Address,
        wallet: &LocalWallet,
        call_data: Bytes,
        gas_limit: u64,
    ) -> MinterResult<H256> {
        let nonce = self.client.get_nonce(sender).await?;

        let request = TransactionRequest {
            from: sender,
            to: recipient,
            nonce,
            gas_limit,
            gas_price: self.gas_price,
            data: call_data,
        };
        debug!(
            "Built transaction: to {:?}, nonce {}, gas limit {}",
            recipient, nonce, gas_limit
        );

        let signed = self.client.sign(&request, wallet).await?;

        let tx_hash = self.client.broadcast(&signed).await?;
        info!("Transaction submitted: {:?}", tx_hash);

        Ok(tx_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::client::MockChainClient;
    use crate::error::MinterError;
    use crate::tx::SignedTransaction;
    use mockall::predicate::eq;
    use mockall::Sequence;

    const TEST_KEY: &str = "380eb0f3d505f087e438eca80bc4df9a7faa24f868e69fc0440261a0fc0567dc";

    fn test_wallet() -> LocalWallet {
        TEST_KEY.parse().unwrap()
    }

    fn sender() -> Address {
        Address::from_low_u64_be(0xa)
    }

    fn recipient() -> Address {
        Address::from_low_u64_be(0xb)
    }

    fn call_data() -> Bytes {
        Bytes::from(vec![0xde, 0xad, 0xbe, 0xef])
    }

    fn raw_signed() -> SignedTransaction {
        SignedTransaction {
            raw: Bytes::from(vec![0xf8, 0x6b, 0x05]),
        }
    }

    #[tokio::test]
    async fn happy_path_runs_fetch_sign_broadcast_in_order() {
        let mut client = MockChainClient::new();
        let mut seq = Sequence::new();
        let expected_hash = H256::from_low_u64_be(0x123);

        client
            .expect_get_nonce()
            .with(eq(sender()))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(5));

        // The signed request must carry exactly the fetched nonce and the
        // caller-supplied fields.
        client
            .expect_sign()
            .withf(|request, _wallet| {
                request.from == Address::from_low_u64_be(0xa)
                    && request.to == Address::from_low_u64_be(0xb)
                    && request.nonce == 5
                    && request.gas_limit == 500_000
                    && request.data == Bytes::from(vec![0xde, 0xad, 0xbe, 0xef])
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(raw_signed()));

        client
            .expect_broadcast()
            .withf(|signed| *signed == raw_signed())
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(expected_hash));

        let submitter = TransactionSubmitter::new(client, U256::from(30_000_000_000u64));
        let result = submitter
            .submit(sender(), recipient(), &test_wallet(), call_data(), 500_000)
            .await;

        assert_eq!(result.unwrap(), expected_hash);
    }

    #[tokio::test]
    async fn request_gas_price_comes_from_the_submitter() {
        let mut client = MockChainClient::new();

        client.expect_get_nonce().returning(|_| Ok(0));
        client
            .expect_sign()
            .withf(|request, _| request.gas_price == U256::from(7u64))
            .returning(|_, _| Ok(raw_signed()));
        client
            .expect_broadcast()
            .returning(|_| Ok(H256::zero()));

        let submitter = TransactionSubmitter::new(client, U256::from(7u64));
        submitter
            .submit(sender(), recipient(), &test_wallet(), call_data(), 21_000)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn nonce_fetch_failure_skips_signing_and_broadcast() {
        let mut client = MockChainClient::new();

        client.expect_get_nonce().times(1).returning(|_| {
            Err(MinterError::NonceFetch {
                address: format!("{:?}", Address::from_low_u64_be(0xa)),
                message: "connection refused".to_string(),
            })
        });
        client.expect_sign().never();
        client.expect_broadcast().never();

        let submitter = TransactionSubmitter::new(client, U256::from(1u64));
        let err = submitter
            .submit(sender(), recipient(), &test_wallet(), call_data(), 500_000)
            .await
            .unwrap_err();

        assert!(matches!(err, MinterError::NonceFetch { .. }));
    }

    #[tokio::test]
    async fn signing_failure_skips_broadcast() {
        let mut client = MockChainClient::new();

        client.expect_get_nonce().times(1).returning(|_| Ok(5));
        client
            .expect_sign()
            .times(1)
            .returning(|_, _| Err(MinterError::Signing("malformed request".to_string())));
        client.expect_broadcast().never();

        let submitter = TransactionSubmitter::new(client, U256::from(1u64));
        let err = submitter
            .submit(sender(), recipient(), &test_wallet(), call_data(), 500_000)
            .await
            .unwrap_err();

        assert!(matches!(err, MinterError::Signing(_)));
    }

    #[tokio::test]
    async fn broadcast_error_passes_through_verbatim() {
        let mut client = MockChainClient::new();

        client.expect_get_nonce().times(1).returning(|_| Ok(5));
        client.expect_sign().times(1).returning(|_, _| Ok(raw_signed()));
        client
            .expect_broadcast()
            .times(1)
            .returning(|_| Err(MinterError::Broadcast("insufficient funds".to_string())));

        let submitter = TransactionSubmitter::new(client, U256::from(1u64));
        let err = submitter
            .submit(sender(), recipient(), &test_wallet(), call_data(), 500_000)
            .await
            .unwrap_err();

        match err {
            MinterError::Broadcast(message) => assert_eq!(message, "insufficient funds"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
