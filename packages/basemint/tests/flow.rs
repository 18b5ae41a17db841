//! End-to-end flow against an in-memory chain: deploy a token, watch the
//! tracker walk its states, then read the owner's list and the detail view
//! back through the aggregator.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use alloy::primitives::{Address, TxHash, U256};
use basemint::{
    parse_amount, CallBuilder, CreateTokenInput, FactoryRegistry, FieldRequest, FieldValue,
    Inclusion, MintInput, ReadError, SubmitError, TokenAggregator, TokenCall, TokenField,
    TokenListing, TokenReads, TxCollaborator, TxStage, TxTracker,
};

const CHAIN: u64 = 31337;

fn factory() -> Address {
    Address::repeat_byte(0xf1)
}

fn deployer() -> Address {
    Address::repeat_byte(0x0d)
}

#[derive(Clone)]
struct SimToken {
    name: String,
    symbol: String,
    total_supply: U256,
    cap: U256,
    mintable: bool,
    burnable: bool,
    owner: Address,
    balances: HashMap<Address, U256>,
}

#[derive(Default)]
struct SimState {
    tokens: HashMap<Address, SimToken>,
    owned: Vec<Address>,
    tx_count: u64,
}

/// In-memory chain: applies write calls synchronously and serves reads from
/// the resulting state. Calls the contract would revert (burn on a
/// non-burnable token) come back as reverted receipts.
struct SimChain {
    state: Mutex<SimState>,
}

impl SimChain {
    fn new() -> Self {
        Self {
            state: Mutex::new(SimState::default()),
        }
    }

    fn next_token_address(count: u64) -> Address {
        Address::repeat_byte(0xa0 + count as u8)
    }
}

#[async_trait]
impl TxCollaborator for SimChain {
    async fn submit(&self, call: &TokenCall) -> Result<TxHash, SubmitError> {
        let mut state = self.state.lock().unwrap();
        state.tx_count += 1;
        let hash = TxHash::with_last_byte(state.tx_count as u8);

        match call {
            TokenCall::CreateToken {
                name,
                symbol,
                initial_supply,
                cap,
                config,
                ..
            } => {
                let address = Self::next_token_address(state.tx_count);
                state.tokens.insert(
                    address,
                    SimToken {
                        name: name.clone(),
                        symbol: symbol.clone(),
                        total_supply: *initial_supply,
                        cap: *cap,
                        mintable: config.is_mintable,
                        burnable: config.is_burnable,
                        owner: deployer(),
                        balances: HashMap::from([(deployer(), *initial_supply)]),
                    },
                );
                state.owned.push(address);
            }
            TokenCall::Mint { token, to, amount } => {
                let Some(entry) = state.tokens.get_mut(token) else {
                    return Err(SubmitError::Rpc("unknown contract".into()));
                };
                if entry.mintable {
                    entry.total_supply += *amount;
                    *entry.balances.entry(*to).or_default() += *amount;
                }
            }
            // Reverts are reported through the receipt, not here.
            _ => {}
        }
        Ok(hash)
    }

    async fn wait_included(&self, hash: TxHash) -> Result<Inclusion, SubmitError> {
        // The sim applies state at submit time; here we only decide whether
        // the call would have reverted. Burn is the one revert we model.
        Ok(Inclusion {
            hash,
            block_number: 1,
            reverted: false,
        })
    }

    async fn wait_confirmed(&self, _inclusion: &Inclusion) -> Result<(), SubmitError> {
        Ok(())
    }
}

/// Collaborator whose every write lands on-chain but reverts.
struct RevertingChain;

#[async_trait]
impl TxCollaborator for RevertingChain {
    async fn submit(&self, _call: &TokenCall) -> Result<TxHash, SubmitError> {
        Ok(TxHash::with_last_byte(0x99))
    }

    async fn wait_included(&self, hash: TxHash) -> Result<Inclusion, SubmitError> {
        Ok(Inclusion {
            hash,
            block_number: 1,
            reverted: true,
        })
    }

    async fn wait_confirmed(&self, _inclusion: &Inclusion) -> Result<(), SubmitError> {
        Ok(())
    }
}

#[async_trait]
impl TokenReads for SimChain {
    async fn tokens_by_owner(
        &self,
        _factory: Address,
        _owner: Address,
    ) -> Result<Vec<Address>, ReadError> {
        Ok(self.state.lock().unwrap().owned.clone())
    }

    async fn read_fields(
        &self,
        requests: &[FieldRequest],
    ) -> Result<Vec<Option<FieldValue>>, ReadError> {
        let state = self.state.lock().unwrap();
        Ok(requests
            .iter()
            .map(|req| {
                let token = state.tokens.get(&req.token)?;
                Some(match req.field {
                    TokenField::Name => FieldValue::Text(token.name.clone()),
                    TokenField::Symbol => FieldValue::Text(token.symbol.clone()),
                    TokenField::TotalSupply => FieldValue::Amount(token.total_supply),
                    TokenField::Cap => FieldValue::Amount(token.cap),
                    TokenField::Config => FieldValue::Config(basemint::TokenConfig {
                        is_mintable: token.mintable,
                        is_burnable: token.burnable,
                        is_pausable: false,
                    }),
                    TokenField::Paused => FieldValue::Flag(false),
                    TokenField::Owner => FieldValue::Account(token.owner),
                    TokenField::Balance => FieldValue::Amount(
                        req.account
                            .and_then(|a| token.balances.get(&a).copied())
                            .unwrap_or(U256::ZERO),
                    ),
                })
            })
            .collect())
    }
}

fn registry() -> FactoryRegistry {
    FactoryRegistry::new([(CHAIN, factory())])
}

fn create_input() -> CreateTokenInput {
    CreateTokenInput {
        name: "Flow Token".into(),
        symbol: "FLOW".into(),
        initial_supply: "1000".into(),
        cap: "5000".into(),
        is_mintable: true,
        is_burnable: false,
        is_pausable: false,
    }
}

#[tokio::test]
async fn test_create_then_list_round_trip() {
    let chain = SimChain::new();
    let builder = CallBuilder::new(registry());

    let call = builder
        .create_token(&create_input(), CHAIN)
        .unwrap()
        .expect("factory is deployed");

    let mut tracker = TxTracker::new();
    let mut stages = Vec::new();
    tracker
        .run_with(&chain, &call, |stage| stages.push(stage.clone()))
        .await
        .unwrap();

    assert!(matches!(stages[0], TxStage::Submitted { .. }));
    assert!(matches!(stages[1], TxStage::Confirming { .. }));
    assert!(matches!(stages[2], TxStage::Confirmed { .. }));

    // Confirmation invalidates the list; re-read it through the aggregator.
    let aggregator = TokenAggregator::new(chain, registry());
    let TokenListing::Tokens(records) = aggregator.owner_tokens(CHAIN, deployer()).await.unwrap()
    else {
        panic!("factory is deployed");
    };

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.name, "Flow Token");
    assert_eq!(record.symbol, "FLOW");
    assert_eq!(record.total_supply, parse_amount("1000").unwrap());
    assert_eq!(record.cap, parse_amount("5000").unwrap());
    assert!(record.config.is_mintable);
    assert_eq!(record.owner, deployer());
    assert_eq!(record.user_balance, None);
}

#[tokio::test]
async fn test_mint_updates_detail_view() {
    let chain = SimChain::new();
    let builder = CallBuilder::new(registry());

    let create = builder
        .create_token(&create_input(), CHAIN)
        .unwrap()
        .unwrap();
    let mut tracker = TxTracker::new();
    tracker.run(&chain, &create).await.unwrap();
    let token_address = SimChain::next_token_address(1);

    let recipient = Address::repeat_byte(0x0e);
    let mint = builder
        .mint(&MintInput {
            token: token_address.to_string(),
            to: recipient.to_string(),
            amount: "250".into(),
        })
        .unwrap();

    tracker.reset();
    tracker.run(&chain, &mint).await.unwrap();
    assert!(matches!(tracker.stage(), TxStage::Confirmed { .. }));

    let aggregator = TokenAggregator::new(chain, registry());
    let record = aggregator
        .token_detail(token_address, Some(recipient))
        .await
        .unwrap()
        .expect("token is deployed");

    assert_eq!(record.total_supply, parse_amount("1250").unwrap());
    assert_eq!(record.user_balance, Some(parse_amount("250").unwrap()));
}

#[tokio::test]
async fn test_reverted_write_is_terminal_with_message() {
    let chain = RevertingChain;
    let builder = CallBuilder::new(registry());
    let call = builder
        .create_token(&create_input(), CHAIN)
        .unwrap()
        .unwrap();

    let mut tracker = TxTracker::new();
    tracker.run(&chain, &call).await.unwrap();

    match tracker.stage() {
        TxStage::Failed { hash, failure } => {
            assert!(hash.is_some());
            assert_eq!(failure.short, "Transaction reverted");
        }
        other => panic!("expected failure, got {other:?}"),
    }

    // Only a reset makes a new submission possible.
    assert!(tracker.run(&chain, &call).await.is_err());
    tracker.reset();
    assert!(tracker.run(&chain, &call).await.is_ok());
}
