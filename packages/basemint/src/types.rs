//! Shared view-model types and sentinel predicates
//!
//! Token records are assembled from on-chain reads on every fetch and are
//! never persisted; the cap invariant (`cap == 0 || totalSupply <= cap`) is
//! enforced by the contract, and this layer only reports what it reads.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// The all-zero address, used on-chain to mean "unset".
pub const UNSET_ADDRESS: Address = Address::ZERO;

/// The zero cap, used on-chain to mean "no supply cap".
pub const UNCAPPED: U256 = U256::ZERO;

/// True if an address slot holds the "unset" sentinel.
pub fn is_unset(address: &Address) -> bool {
    *address == UNSET_ADDRESS
}

/// True if a cap value means "no supply cap".
pub fn is_uncapped(cap: &U256) -> bool {
    *cap == UNCAPPED
}

/// Immutable feature flags chosen at token creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub is_mintable: bool,
    pub is_burnable: bool,
    pub is_pausable: bool,
}

/// A token as seen by the frontends, derived entirely from on-chain reads.
///
/// `user_balance` is populated only by the single-token detail read; the
/// owner-list read does not fetch balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRecord {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub total_supply: U256,
    /// Maximum total supply; zero means uncapped.
    pub cap: U256,
    pub config: TokenConfig,
    pub paused: bool,
    pub owner: Address,
    pub user_balance: Option<U256>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_address_sentinel() {
        assert!(is_unset(&Address::ZERO));
        let addr: Address = "0xdead000000000000000000000000000000000000"
            .parse()
            .unwrap();
        assert!(!is_unset(&addr));
    }

    #[test]
    fn test_uncapped_sentinel() {
        assert!(is_uncapped(&U256::ZERO));
        assert!(!is_uncapped(&U256::from(1u64)));
    }
}
