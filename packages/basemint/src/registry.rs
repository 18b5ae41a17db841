//! Factory address registry
//!
//! Maps a chain id to the deployed TokenFactory address for that chain. The
//! registry is an explicit value handed to the call builder and aggregator,
//! never ambient global state, so both can be tested with injected fakes.

use std::collections::HashMap;

use alloy::primitives::Address;

use crate::types::is_unset;

/// Base Mainnet chain id.
pub const BASE_MAINNET: u64 = 8453;

/// Base Sepolia chain id.
pub const BASE_SEPOLIA: u64 = 84532;

/// Result of looking a chain up in the registry.
///
/// `Unregistered` (unknown chain) and `NotDeployed` (registered with the
/// zero-address sentinel) both disable the deploy path; callers that only
/// care about usability should go through [`FactoryRegistry::deployed_factory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryLookup {
    /// No entry for this chain id.
    Unregistered,
    /// Entry exists but the factory is not deployed yet (zero address).
    NotDeployed,
    /// Factory is live at this address.
    Deployed(Address),
}

/// Chain id → TokenFactory address.
#[derive(Debug, Clone, Default)]
pub struct FactoryRegistry {
    entries: HashMap<u64, Address>,
}

impl FactoryRegistry {
    /// Build a registry from explicit (chain id, factory address) pairs.
    pub fn new(entries: impl IntoIterator<Item = (u64, Address)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The chains the hosted frontend ships with: Base Mainnet and Base
    /// Sepolia. Both start at the zero address until the factory is deployed;
    /// override with [`FactoryRegistry::register`].
    pub fn base_defaults() -> Self {
        Self::new([
            (BASE_MAINNET, Address::ZERO),
            (BASE_SEPOLIA, Address::ZERO),
        ])
    }

    /// Register or replace the factory address for a chain.
    pub fn register(&mut self, chain_id: u64, factory: Address) {
        self.entries.insert(chain_id, factory);
    }

    /// Full lookup, distinguishing unregistered chains from registered ones
    /// whose factory is not deployed.
    pub fn lookup(&self, chain_id: u64) -> FactoryLookup {
        match self.entries.get(&chain_id) {
            None => FactoryLookup::Unregistered,
            Some(addr) if is_unset(addr) => FactoryLookup::NotDeployed,
            Some(addr) => FactoryLookup::Deployed(*addr),
        }
    }

    /// The usable factory address for a chain, or `None` when the chain is
    /// unknown or the factory is not deployed. Callers branch the same way
    /// on both cases: no deploy path, explanatory message, no error.
    pub fn deployed_factory(&self, chain_id: u64) -> Option<Address> {
        match self.lookup(chain_id) {
            FactoryLookup::Deployed(addr) => Some(addr),
            FactoryLookup::Unregistered | FactoryLookup::NotDeployed => None,
        }
    }

    /// Whether any entry exists for this chain id.
    pub fn is_registered(&self, chain_id: u64) -> bool {
        self.entries.contains_key(&chain_id)
    }
}
