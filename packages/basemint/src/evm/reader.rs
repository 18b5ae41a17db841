//! Live batched reader
//!
//! Implements [`TokenReads`] over an alloy HTTP provider. Batches fan out as
//! parallel typed calls and come back in request order. Contract-level call
//! failures become `None` outcomes (the aggregator drops those records); a
//! plain wallet address fails every decode and must read as "not a token",
//! not as an error. Only transport failures abort the batch, since those
//! mean the node, not the token, is the problem.

use async_trait::async_trait;
use futures::future::join_all;
use tracing::debug;

use alloy::{
    primitives::{Address, TxHash},
    providers::{Provider, RootProvider},
    transports::http::{Client, Http},
};
use eyre::Result;

use crate::evm::client::read_provider;
use crate::evm::contracts::{BaseToken, TokenFactory};
use crate::reader::{FieldRequest, FieldValue, ReadError, TokenField, TokenReads};

/// Read-only contract-call client for one chain.
pub struct EvmReader {
    provider: RootProvider<Http<Client>>,
}

impl EvmReader {
    pub fn new(rpc_url: &str) -> Result<Self> {
        Ok(Self {
            provider: read_provider(rpc_url)?,
        })
    }

    async fn read_one(&self, request: &FieldRequest) -> Result<FieldValue, alloy::contract::Error> {
        let token = BaseToken::new(request.token, &self.provider);

        let value = match request.field {
            TokenField::Name => FieldValue::Text(token.name().call().await?._0),
            TokenField::Symbol => FieldValue::Text(token.symbol().call().await?._0),
            TokenField::TotalSupply => FieldValue::Amount(token.totalSupply().call().await?._0),
            TokenField::Cap => FieldValue::Amount(token.cap().call().await?._0),
            TokenField::Config => FieldValue::Config(token.getConfig().call().await?._0.into()),
            TokenField::Paused => FieldValue::Flag(token.paused().call().await?._0),
            TokenField::Owner => FieldValue::Account(token.owner().call().await?._0),
            TokenField::Balance => {
                let account = request.account.unwrap_or(Address::ZERO);
                FieldValue::Amount(token.balanceOf(account).call().await?._0)
            }
        };
        Ok(value)
    }

    /// The token address a confirmed createToken transaction deployed, read
    /// from the receipt's TokenCreated event.
    pub async fn created_token(&self, hash: TxHash) -> Result<Option<Address>, ReadError> {
        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| ReadError::Rpc(e.to_string()))?;

        let Some(receipt) = receipt else {
            return Ok(None);
        };
        for log in receipt.inner.logs() {
            if let Ok(event) = log.log_decode::<TokenFactory::TokenCreated>() {
                return Ok(Some(event.inner.data.token));
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl TokenReads for EvmReader {
    async fn tokens_by_owner(
        &self,
        factory: Address,
        owner: Address,
    ) -> Result<Vec<Address>, ReadError> {
        let factory = TokenFactory::new(factory, &self.provider);
        let result = factory
            .getTokensByOwner(owner)
            .call()
            .await
            .map_err(|e| ReadError::Rpc(e.to_string()))?;
        Ok(result.tokens)
    }

    async fn read_fields(
        &self,
        requests: &[FieldRequest],
    ) -> Result<Vec<Option<FieldValue>>, ReadError> {
        let results = join_all(requests.iter().map(|req| self.read_one(req))).await;
        collect_outcomes(results)
    }
}

/// Classify per-call results: transport failures abort the whole batch,
/// anything the contract layer rejects (empty return data from a
/// non-contract address, a decode mismatch) is a `None` outcome for that
/// request only.
fn collect_outcomes(
    results: Vec<Result<FieldValue, alloy::contract::Error>>,
) -> Result<Vec<Option<FieldValue>>, ReadError> {
    results
        .into_iter()
        .map(|result| match result {
            Ok(value) => Ok(Some(value)),
            Err(alloy::contract::Error::TransportError(e)) => Err(ReadError::Rpc(e.to_string())),
            Err(e) => {
                debug!(error = %e, "dropping failed field read");
                Ok(None)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;
    use alloy::transports::TransportErrorKind;

    // What calling a typed getter on a plain wallet address produces: the
    // node answers with empty data and the decode fails.
    fn decode_failure() -> alloy::contract::Error {
        alloy::contract::Error::UnknownFunction("name".to_string())
    }

    #[test]
    fn test_contract_failure_is_a_missing_outcome() {
        let outcomes = collect_outcomes(vec![
            Err(decode_failure()),
            Ok(FieldValue::Amount(U256::from(5u64))),
        ])
        .unwrap();
        assert_eq!(
            outcomes,
            vec![None, Some(FieldValue::Amount(U256::from(5u64)))]
        );
    }

    #[test]
    fn test_every_read_failing_decode_is_still_not_an_error() {
        let outcomes =
            collect_outcomes(vec![Err(decode_failure()), Err(decode_failure())]).unwrap();
        assert_eq!(outcomes, vec![None, None]);
    }

    #[test]
    fn test_transport_failure_aborts_the_batch() {
        let transport = alloy::contract::Error::TransportError(TransportErrorKind::custom_str(
            "connection refused",
        ));
        let err = collect_outcomes(vec![Ok(FieldValue::Flag(true)), Err(transport)]).unwrap_err();
        match err {
            ReadError::Rpc(message) => assert!(message.contains("connection refused")),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
