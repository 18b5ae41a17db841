//! Basemint: Client Library for the Basemint Token Factory
//!
//! This crate provides the contract-interaction layer shared by the console
//! and any future frontends:
//!
//! - **Registry** - Static chain-id → factory-address mapping with sentinel handling
//! - **Units** - 18-decimal fixed-point conversion between human strings and base units
//! - **Calls** - Per-action builders lowering form input into typed contract calls
//! - **Tracker** - Transaction lifecycle state machine (submit → confirm/fail)
//! - **Reader** - Batched multi-contract read aggregation into token records
//! - **EVM Module** - Live alloy-backed collaborators (provider, submitter, reader)
//!
//! The hard logic (supply caps, access control, pausability) lives in the
//! on-chain contracts; everything here validates input, shapes calls, and
//! reports chain state back faithfully.

pub mod calls;
pub mod evm;
pub mod explorer;
pub mod reader;
pub mod registry;
pub mod tracker;
pub mod types;
pub mod units;
pub mod validate;

// Re-export commonly used items at the crate root
pub use calls::{
    BurnInput, CallBuilder, CallError, CreateTokenInput, MintInput, PauseAction, PauseInput,
    TokenCall, TransferInput, TransferOwnershipInput,
};
pub use explorer::{explorer_base, token_url, tx_url};
pub use reader::{
    decode_record, FieldRequest, FieldValue, ReadError, TokenAggregator, TokenField, TokenListing,
    TokenReads, DETAIL_FIELDS, LIST_FIELDS,
};
pub use registry::{FactoryLookup, FactoryRegistry};
pub use tracker::{Inclusion, SubmitError, TxCollaborator, TxFailure, TxStage, TxTracker};
pub use types::{is_uncapped, is_unset, TokenConfig, TokenRecord, UNCAPPED, UNSET_ADDRESS};
pub use units::{format_amount, parse_amount, UnitsError, TOKEN_DECIMALS};
