//! Multi-read aggregation
//!
//! Assembles token records from batched read-only calls. Two patterns:
//! a single-token detail read (8 fields including the viewer's balance) and
//! the owner's token list (one factory call, then 7 fields per token in one
//! order-preserving batch). Field lists are declared once and drive both the
//! request construction and the per-entity decode, so the stride can never
//! silently drift from the field set.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use alloy::primitives::{Address, U256};

use crate::registry::FactoryRegistry;
use crate::types::{TokenConfig, TokenRecord, UNSET_ADDRESS};

/// One readable field of a token contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenField {
    Name,
    Symbol,
    TotalSupply,
    Cap,
    Config,
    Paused,
    Owner,
    /// balanceOf(account); detail reads only.
    Balance,
}

/// Field set for the single-token detail read.
pub const DETAIL_FIELDS: [TokenField; 8] = [
    TokenField::Name,
    TokenField::Symbol,
    TokenField::TotalSupply,
    TokenField::Cap,
    TokenField::Config,
    TokenField::Paused,
    TokenField::Owner,
    TokenField::Balance,
];

/// Field set for the owner-list read (everything except the balance).
pub const LIST_FIELDS: [TokenField; 7] = [
    TokenField::Name,
    TokenField::Symbol,
    TokenField::TotalSupply,
    TokenField::Cap,
    TokenField::Config,
    TokenField::Paused,
    TokenField::Owner,
];

/// One entry in a read batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRequest {
    pub token: Address,
    pub field: TokenField,
    /// Account argument, used only by [`TokenField::Balance`].
    pub account: Option<Address>,
}

/// A decoded read result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Amount(U256),
    Config(TokenConfig),
    Flag(bool),
    Account(Address),
}

/// Read-side failure. `InvalidAddress` is produced before any call is made;
/// `Rpc` carries the underlying error verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("invalid token address `{0}`")]
    InvalidAddress(String),
    #[error("read call failed: {0}")]
    Rpc(String),
}

/// The read-only contract-call collaborator.
///
/// `read_fields` preserves request order; an individual failed read becomes
/// a `None` outcome, while `Err` means the batch as a whole failed (for
/// example, the node is unreachable).
#[async_trait]
pub trait TokenReads: Send + Sync {
    async fn tokens_by_owner(
        &self,
        factory: Address,
        owner: Address,
    ) -> Result<Vec<Address>, ReadError>;

    async fn read_fields(
        &self,
        requests: &[FieldRequest],
    ) -> Result<Vec<Option<FieldValue>>, ReadError>;
}

/// Parse a user-supplied token address, rejecting anything that is not a
/// 20-byte hex address before a read is ever attempted.
pub fn parse_token_address(input: &str) -> Result<Address, ReadError> {
    input
        .trim()
        .parse()
        .map_err(|_| ReadError::InvalidAddress(input.to_string()))
}

/// Decode one token's slice of batch outcomes into a record.
///
/// Returns `None` when name or symbol is missing or empty: an address that
/// cannot produce those is not a deployed token, and partial records are
/// never surfaced. Other missing fields fall back to zero/false, matching
/// what the contract would report for a freshly deployed token.
pub fn decode_record(
    token: Address,
    fields: &[TokenField],
    outcomes: &[Option<FieldValue>],
) -> Option<TokenRecord> {
    assert_eq!(
        fields.len(),
        outcomes.len(),
        "decode stride does not match declared field list"
    );

    let mut name = None;
    let mut symbol = None;
    let mut total_supply = U256::ZERO;
    let mut cap = U256::ZERO;
    let mut config = TokenConfig::default();
    let mut paused = false;
    let mut owner = UNSET_ADDRESS;
    let mut balance = None;
    let mut wants_balance = false;

    for (field, outcome) in fields.iter().zip(outcomes) {
        match (field, outcome) {
            (TokenField::Name, Some(FieldValue::Text(s))) if !s.is_empty() => {
                name = Some(s.clone())
            }
            (TokenField::Symbol, Some(FieldValue::Text(s))) if !s.is_empty() => {
                symbol = Some(s.clone())
            }
            (TokenField::TotalSupply, Some(FieldValue::Amount(v))) => total_supply = *v,
            (TokenField::Cap, Some(FieldValue::Amount(v))) => cap = *v,
            (TokenField::Config, Some(FieldValue::Config(c))) => config = *c,
            (TokenField::Paused, Some(FieldValue::Flag(f))) => paused = *f,
            (TokenField::Owner, Some(FieldValue::Account(a))) => owner = *a,
            (TokenField::Balance, outcome) => {
                wants_balance = true;
                if let Some(FieldValue::Amount(v)) = outcome {
                    balance = Some(*v);
                }
            }
            // Missing or mistyped outcome: keep the default.
            _ => {}
        }
    }

    Some(TokenRecord {
        address: token,
        name: name?,
        symbol: symbol?,
        total_supply,
        cap,
        config,
        paused,
        owner,
        user_balance: if wants_balance {
            Some(balance.unwrap_or(U256::ZERO))
        } else {
            None
        },
    })
}

/// Outcome of the owner-list read. "Factory not deployed" is a distinct,
/// non-error end state; a deployed factory with no tokens yields an empty
/// list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenListing {
    FactoryNotDeployed,
    Tokens(Vec<TokenRecord>),
}

/// Issues batched reads through a [`TokenReads`] collaborator and assembles
/// typed records.
pub struct TokenAggregator<R> {
    reader: R,
    registry: FactoryRegistry,
}

impl<R: TokenReads> TokenAggregator<R> {
    pub fn new(reader: R, registry: FactoryRegistry) -> Self {
        Self { reader, registry }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Fetch one token's full detail, including `user`'s balance. Returns
    /// `Ok(None)` when the address does not answer like a deployed token.
    pub async fn token_detail(
        &self,
        token: Address,
        user: Option<Address>,
    ) -> Result<Option<TokenRecord>, ReadError> {
        let account = user.unwrap_or(UNSET_ADDRESS);
        let requests: Vec<FieldRequest> = DETAIL_FIELDS
            .iter()
            .map(|field| FieldRequest {
                token,
                field: *field,
                account: matches!(field, TokenField::Balance).then_some(account),
            })
            .collect();

        let outcomes = self.reader.read_fields(&requests).await?;
        Ok(decode_record(token, &DETAIL_FIELDS, &outcomes))
    }

    /// Fetch every token the factory deployed for `owner`, in whatever
    /// order the factory returns them (the contract does not guarantee a
    /// stable order between calls; none is imposed here). Addresses that do
    /// not resolve a name and symbol are dropped, not returned as partial
    /// records.
    pub async fn owner_tokens(
        &self,
        chain_id: u64,
        owner: Address,
    ) -> Result<TokenListing, ReadError> {
        let Some(factory) = self.registry.deployed_factory(chain_id) else {
            return Ok(TokenListing::FactoryNotDeployed);
        };

        let addresses = self.reader.tokens_by_owner(factory, owner).await?;
        debug!(owner = %owner, count = addresses.len(), "owned token addresses fetched");
        if addresses.is_empty() {
            return Ok(TokenListing::Tokens(Vec::new()));
        }

        let requests: Vec<FieldRequest> = addresses
            .iter()
            .flat_map(|token| {
                LIST_FIELDS.iter().map(|field| FieldRequest {
                    token: *token,
                    field: *field,
                    account: None,
                })
            })
            .collect();

        let outcomes = self.reader.read_fields(&requests).await?;

        let stride = LIST_FIELDS.len();
        let records = addresses
            .iter()
            .zip(outcomes.chunks(stride))
            .filter_map(|(token, chunk)| decode_record(*token, &LIST_FIELDS, chunk))
            .collect();

        Ok(TokenListing::Tokens(records))
    }
}
