//! Live write-call submitter
//!
//! Implements [`TxCollaborator`] against a real chain: replays a
//! [`TokenCall`] through the generated bindings with a wallet-filled
//! provider, then polls for the receipt and the configured confirmation
//! depth. No timeout is enforced here; a stuck Confirming stage persists
//! until the node answers or the user resets.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use alloy::{
    primitives::TxHash,
    providers::{Provider, ProviderBuilder, RootProvider},
    signers::local::PrivateKeySigner,
    transports::http::{Client, Http},
};
use eyre::Result;

use crate::calls::TokenCall;
use crate::evm::client::{parse_signer, read_provider, wallet_for};
use crate::evm::contracts::{BaseToken, CreateTokenParams, TokenFactory};
use crate::tracker::{Inclusion, SubmitError, TxCollaborator};

/// Default depth before a transaction counts as confirmed.
const DEFAULT_CONFIRMATIONS: u64 = 1;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// A receipt counts as inclusion only once it names a block; some nodes
/// briefly serve receipts before the block number is populated, and treating
/// those as block 0 would satisfy any confirmation depth immediately.
fn inclusion_at(hash: TxHash, block_number: Option<u64>, reverted: bool) -> Option<Inclusion> {
    Some(Inclusion {
        hash,
        block_number: block_number?,
        reverted,
    })
}

fn submit_error(e: alloy::contract::Error) -> SubmitError {
    let message = e.to_string();
    let lowered = message.to_lowercase();
    if lowered.contains("rejected") || lowered.contains("denied") {
        SubmitError::Rejected(message)
    } else {
        SubmitError::Rpc(message)
    }
}

/// Signs and submits token calls over HTTP.
pub struct EvmSubmitter {
    rpc_url: String,
    signer: PrivateKeySigner,
    provider: RootProvider<Http<Client>>,
    confirmations: u64,
    poll_interval: Duration,
}

impl EvmSubmitter {
    pub fn new(rpc_url: &str, private_key: &str) -> Result<Self> {
        let signer = parse_signer(private_key)?;
        let provider = read_provider(rpc_url)?;

        info!(signer_address = %signer.address(), "submitter initialized");

        Ok(Self {
            rpc_url: rpc_url.to_string(),
            signer,
            provider,
            confirmations: DEFAULT_CONFIRMATIONS,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations.max(1);
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Address the submitter signs with.
    pub fn signer_address(&self) -> alloy::primitives::Address {
        self.signer.address()
    }
}

#[async_trait]
impl TxCollaborator for EvmSubmitter {
    async fn submit(&self, call: &TokenCall) -> Result<TxHash, SubmitError> {
        let provider = ProviderBuilder::new()
            .wallet(wallet_for(&self.signer))
            .on_http(
                self.rpc_url
                    .parse()
                    .map_err(|_| SubmitError::Rpc("invalid RPC URL".into()))?,
            );

        debug!(
            target_address = %call.target(),
            function = call.function_name(),
            "sending transaction"
        );

        let pending = match call {
            TokenCall::CreateToken {
                factory,
                name,
                symbol,
                initial_supply,
                cap,
                config,
            } => {
                let contract = TokenFactory::new(*factory, &provider);
                contract
                    .createToken(CreateTokenParams {
                        name: name.clone(),
                        symbol: symbol.clone(),
                        initialSupply: *initial_supply,
                        cap: *cap,
                        config: (*config).into(),
                    })
                    .send()
                    .await
            }
            TokenCall::Mint { token, to, amount } => {
                BaseToken::new(*token, &provider)
                    .mint(*to, *amount)
                    .send()
                    .await
            }
            TokenCall::Burn { token, amount } => {
                BaseToken::new(*token, &provider).burn(*amount).send().await
            }
            TokenCall::Transfer { token, to, amount } => {
                BaseToken::new(*token, &provider)
                    .transfer(*to, *amount)
                    .send()
                    .await
            }
            TokenCall::Pause { token } => {
                BaseToken::new(*token, &provider).pause().send().await
            }
            TokenCall::Unpause { token } => {
                BaseToken::new(*token, &provider).unpause().send().await
            }
            TokenCall::TransferOwnership { token, new_owner } => {
                BaseToken::new(*token, &provider)
                    .transferOwnership(*new_owner)
                    .send()
                    .await
            }
        }
        .map_err(submit_error)?;

        let hash = *pending.tx_hash();
        info!(tx_hash = %hash, function = call.function_name(), "transaction sent");
        Ok(hash)
    }

    async fn wait_included(&self, hash: TxHash) -> Result<Inclusion, SubmitError> {
        loop {
            let receipt = self
                .provider
                .get_transaction_receipt(hash)
                .await
                .map_err(|e| SubmitError::Rpc(e.to_string()))?;

            if let Some(receipt) = receipt {
                match inclusion_at(hash, receipt.block_number, !receipt.status()) {
                    Some(inclusion) => return Ok(inclusion),
                    None => debug!(tx_hash = %hash, "receipt has no block number yet"),
                }
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn wait_confirmed(&self, inclusion: &Inclusion) -> Result<(), SubmitError> {
        loop {
            let current = self
                .provider
                .get_block_number()
                .await
                .map_err(|e| SubmitError::Rpc(e.to_string()))?;

            let depth = current.saturating_sub(inclusion.block_number);
            if depth >= self.confirmations.saturating_sub(1) {
                return Ok(());
            }
            debug!(
                tx_hash = %inclusion.hash,
                depth,
                required = self.confirmations,
                "waiting for confirmations"
            );
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_without_block_number_is_not_included() {
        assert_eq!(inclusion_at(TxHash::with_last_byte(1), None, false), None);
    }

    #[test]
    fn test_receipt_with_block_number_is_included() {
        let inclusion = inclusion_at(TxHash::with_last_byte(1), Some(42), true).unwrap();
        assert_eq!(inclusion.block_number, 42);
        assert!(inclusion.reverted);
    }
}
