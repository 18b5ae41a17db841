//! Contract call builder
//!
//! Lowers validated form input into [`TokenCall`] values: the target
//! address, the function, and fully decoded arguments. Amounts are scaled to
//! base units here; a call with a malformed address or a non-positive
//! scaled amount is never produced. The builder holds an injected
//! [`FactoryRegistry`] so it can be tested against fake address books.

use std::fmt;

use alloy::primitives::{Address, U256};
use thiserror::Error;

use crate::registry::FactoryRegistry;
use crate::types::{TokenConfig, UNCAPPED};
use crate::units::{parse_amount, UnitsError};

/// Form input for deploying a new token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTokenInput {
    pub name: String,
    pub symbol: String,
    /// Human decimal string, e.g. "1000000".
    pub initial_supply: String,
    /// Human decimal string; empty or "0" means uncapped.
    pub cap: String,
    pub is_mintable: bool,
    pub is_burnable: bool,
    pub is_pausable: bool,
}

impl CreateTokenInput {
    pub fn config(&self) -> TokenConfig {
        TokenConfig {
            is_mintable: self.is_mintable,
            is_burnable: self.is_burnable,
            is_pausable: self.is_pausable,
        }
    }
}

/// Form input for minting to an address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MintInput {
    pub token: String,
    pub to: String,
    pub amount: String,
}

/// Form input for burning from the caller's balance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BurnInput {
    pub token: String,
    pub amount: String,
}

/// Form input for a plain transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferInput {
    pub token: String,
    pub to: String,
    pub amount: String,
}

/// Which way to toggle a pausable token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseAction {
    Pause,
    Unpause,
}

impl PauseAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PauseAction::Pause => "pause",
            PauseAction::Unpause => "unpause",
        }
    }
}

impl fmt::Display for PauseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Form input for pausing or unpausing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauseInput {
    pub token: String,
    pub action: PauseAction,
}

/// Form input for handing the token to a new owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferOwnershipInput {
    pub token: String,
    pub new_owner: String,
}

/// A fully decoded write call, ready for a collaborator to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenCall {
    CreateToken {
        factory: Address,
        name: String,
        symbol: String,
        initial_supply: U256,
        /// Zero means uncapped.
        cap: U256,
        config: TokenConfig,
    },
    Mint {
        token: Address,
        to: Address,
        amount: U256,
    },
    Burn {
        token: Address,
        amount: U256,
    },
    Transfer {
        token: Address,
        to: Address,
        amount: U256,
    },
    Pause {
        token: Address,
    },
    Unpause {
        token: Address,
    },
    TransferOwnership {
        token: Address,
        new_owner: Address,
    },
}

impl TokenCall {
    /// The contract the call is addressed to.
    pub fn target(&self) -> Address {
        match self {
            TokenCall::CreateToken { factory, .. } => *factory,
            TokenCall::Mint { token, .. }
            | TokenCall::Burn { token, .. }
            | TokenCall::Transfer { token, .. }
            | TokenCall::Pause { token }
            | TokenCall::Unpause { token }
            | TokenCall::TransferOwnership { token, .. } => *token,
        }
    }

    /// ABI function name, for logging.
    pub fn function_name(&self) -> &'static str {
        match self {
            TokenCall::CreateToken { .. } => "createToken",
            TokenCall::Mint { .. } => "mint",
            TokenCall::Burn { .. } => "burn",
            TokenCall::Transfer { .. } => "transfer",
            TokenCall::Pause { .. } => "pause",
            TokenCall::Unpause { .. } => "unpause",
            TokenCall::TransferOwnership { .. } => "transferOwnership",
        }
    }
}

/// Why an input could not be lowered into a call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("invalid address `{0}`")]
    InvalidAddress(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] UnitsError),
    #[error("amount must be greater than zero")]
    ZeroAmount,
}

fn parse_address(input: &str) -> Result<Address, CallError> {
    input
        .trim()
        .parse()
        .map_err(|_| CallError::InvalidAddress(input.to_string()))
}

fn parse_positive_amount(input: &str) -> Result<U256, CallError> {
    let amount = parse_amount(input)?;
    if amount.is_zero() {
        return Err(CallError::ZeroAmount);
    }
    Ok(amount)
}

/// Builds write calls against an injected factory registry.
#[derive(Debug, Clone)]
pub struct CallBuilder {
    registry: FactoryRegistry,
}

impl CallBuilder {
    pub fn new(registry: FactoryRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FactoryRegistry {
        &self.registry
    }

    /// Build a createToken call. Returns `Ok(None)` when no factory is
    /// deployed on the chain: the deploy path is simply unavailable, which
    /// is not an error.
    pub fn create_token(
        &self,
        input: &CreateTokenInput,
        chain_id: u64,
    ) -> Result<Option<TokenCall>, CallError> {
        let Some(factory) = self.registry.deployed_factory(chain_id) else {
            tracing::debug!(chain_id, "no factory deployed, skipping createToken");
            return Ok(None);
        };

        let initial_supply = parse_positive_amount(&input.initial_supply)?;
        // Empty cap means uncapped, which shares the zero sentinel.
        let cap = if input.cap.trim().is_empty() {
            UNCAPPED
        } else {
            parse_amount(&input.cap)?
        };

        Ok(Some(TokenCall::CreateToken {
            factory,
            name: input.name.trim().to_string(),
            symbol: input.symbol.trim().to_string(),
            initial_supply,
            cap,
            config: input.config(),
        }))
    }

    pub fn mint(&self, input: &MintInput) -> Result<TokenCall, CallError> {
        Ok(TokenCall::Mint {
            token: parse_address(&input.token)?,
            to: parse_address(&input.to)?,
            amount: parse_positive_amount(&input.amount)?,
        })
    }

    pub fn burn(&self, input: &BurnInput) -> Result<TokenCall, CallError> {
        Ok(TokenCall::Burn {
            token: parse_address(&input.token)?,
            amount: parse_positive_amount(&input.amount)?,
        })
    }

    pub fn transfer(&self, input: &TransferInput) -> Result<TokenCall, CallError> {
        Ok(TokenCall::Transfer {
            token: parse_address(&input.token)?,
            to: parse_address(&input.to)?,
            amount: parse_positive_amount(&input.amount)?,
        })
    }

    pub fn toggle_pause(&self, input: &PauseInput) -> Result<TokenCall, CallError> {
        let token = parse_address(&input.token)?;
        Ok(match input.action {
            PauseAction::Pause => TokenCall::Pause { token },
            PauseAction::Unpause => TokenCall::Unpause { token },
        })
    }

    pub fn transfer_ownership(
        &self,
        input: &TransferOwnershipInput,
    ) -> Result<TokenCall, CallError> {
        Ok(TokenCall::TransferOwnership {
            token: parse_address(&input.token)?,
            new_owner: parse_address(&input.new_owner)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::is_uncapped;
    use crate::units::TOKEN_DECIMALS;

    const FACTORY: &str = "0x00000000000000000000000000000000000000f1";
    const TOKEN: &str = "0x00000000000000000000000000000000000000aa";
    const USER: &str = "0x00000000000000000000000000000000000000bb";

    fn builder_with_factory(chain_id: u64) -> CallBuilder {
        CallBuilder::new(FactoryRegistry::new([(chain_id, FACTORY.parse().unwrap())]))
    }

    fn scaled(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(TOKEN_DECIMALS))
    }

    fn create_input() -> CreateTokenInput {
        CreateTokenInput {
            name: "My Token".into(),
            symbol: "MTK".into(),
            initial_supply: "1000000".into(),
            cap: "".into(),
            is_mintable: true,
            is_burnable: false,
            is_pausable: false,
        }
    }

    #[test]
    fn test_create_token_scales_and_defaults_cap() {
        let builder = builder_with_factory(31337);
        let call = builder.create_token(&create_input(), 31337).unwrap().unwrap();
        match call {
            TokenCall::CreateToken {
                factory,
                initial_supply,
                cap,
                config,
                ..
            } => {
                assert_eq!(factory, FACTORY.parse::<Address>().unwrap());
                assert_eq!(initial_supply, scaled(1_000_000));
                assert!(is_uncapped(&cap));
                assert!(config.is_mintable);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn test_create_token_no_factory_is_a_noop() {
        // Registered with the zero address: same outcome as unregistered.
        let builder = CallBuilder::new(FactoryRegistry::base_defaults());
        assert_eq!(builder.create_token(&create_input(), 8453).unwrap(), None);
        assert_eq!(builder.create_token(&create_input(), 1).unwrap(), None);
    }

    #[test]
    fn test_create_token_explicit_zero_cap_is_uncapped() {
        let builder = builder_with_factory(31337);
        let mut input = create_input();
        input.cap = "0".into();
        let Some(TokenCall::CreateToken { cap, .. }) =
            builder.create_token(&input, 31337).unwrap()
        else {
            panic!("expected create call");
        };
        assert!(is_uncapped(&cap));
    }

    #[test]
    fn test_create_token_rejects_zero_supply() {
        let builder = builder_with_factory(31337);
        let mut input = create_input();
        input.initial_supply = "0".into();
        assert_eq!(
            builder.create_token(&input, 31337),
            Err(CallError::ZeroAmount)
        );
    }

    #[test]
    fn test_mint_scales_amount() {
        let builder = builder_with_factory(31337);
        let call = builder
            .mint(&MintInput {
                token: TOKEN.into(),
                to: USER.into(),
                amount: "2.5".into(),
            })
            .unwrap();
        assert_eq!(call.function_name(), "mint");
        match call {
            TokenCall::Mint { amount, .. } => {
                assert_eq!(amount, scaled(25) / U256::from(10u64))
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn test_bad_address_rejected() {
        let builder = builder_with_factory(31337);
        let err = builder
            .burn(&BurnInput {
                token: "not-an-address".into(),
                amount: "1".into(),
            })
            .unwrap_err();
        assert!(matches!(err, CallError::InvalidAddress(_)));
    }

    #[test]
    fn test_bad_amount_rejected() {
        let builder = builder_with_factory(31337);
        let err = builder
            .transfer(&TransferInput {
                token: TOKEN.into(),
                to: USER.into(),
                amount: "12x".into(),
            })
            .unwrap_err();
        assert!(matches!(err, CallError::InvalidAmount(_)));
    }

    #[test]
    fn test_toggle_pause_maps_action() {
        let builder = builder_with_factory(31337);
        let pause = builder
            .toggle_pause(&PauseInput {
                token: TOKEN.into(),
                action: PauseAction::Pause,
            })
            .unwrap();
        let unpause = builder
            .toggle_pause(&PauseInput {
                token: TOKEN.into(),
                action: PauseAction::Unpause,
            })
            .unwrap();
        assert_eq!(pause.function_name(), "pause");
        assert_eq!(unpause.function_name(), "unpause");
        assert_eq!(pause.target(), TOKEN.parse::<Address>().unwrap());
    }
}
