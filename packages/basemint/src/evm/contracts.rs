//! TokenFactory and BaseToken ABI definitions
//!
//! Uses alloy's sol! macro to generate type-safe bindings for the deployed
//! contracts. The ABI is fixed by the on-chain collaborators; this file must
//! match it exactly.

use alloy::sol;

sol! {
    /// Immutable feature flags chosen at creation.
    struct TokenConfig {
        bool isMintable;
        bool isBurnable;
        bool isPausable;
    }

    /// Structured argument for TokenFactory.createToken.
    struct CreateTokenParams {
        string name;
        string symbol;
        uint256 initialSupply;
        uint256 cap;
        TokenConfig config;
    }

    /// Factory that deploys BaseToken contracts and records them per owner.
    #[sol(rpc)]
    contract TokenFactory {
        /// Deploy a new token; initial supply is minted to the caller.
        function createToken(CreateTokenParams calldata params) external returns (address token);

        /// All tokens this factory deployed for an owner, in deployment order
        /// as far as the factory guarantees any order at all.
        function getTokensByOwner(address owner) external view returns (address[] memory tokens);

        /// Emitted once per deployment.
        event TokenCreated(address indexed token, address indexed owner, string name, string symbol);
    }

    /// ERC-20-style token deployed by the factory.
    #[sol(rpc)]
    contract BaseToken {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);

        /// Maximum total supply; zero means uncapped.
        function cap() external view returns (uint256);

        function getConfig() external view returns (TokenConfig memory);
        function paused() external view returns (bool);
        function owner() external view returns (address);
        function balanceOf(address account) external view returns (uint256);

        /// Owner only; reverts unless the token was created mintable.
        function mint(address to, uint256 amount) external;

        /// Burns from the caller; reverts unless the token is burnable.
        function burn(uint256 amount) external;

        /// Owner only; reverts unless the token is pausable.
        function pause() external;
        function unpause() external;

        function transfer(address to, uint256 amount) external returns (bool);
        function transferOwnership(address newOwner) external;

        event Transfer(address indexed from, address indexed to, uint256 value);
        event Paused(address account);
        event Unpaused(address account);
        event OwnershipTransferred(address indexed previousOwner, address indexed newOwner);
    }
}

impl From<TokenConfig> for crate::types::TokenConfig {
    fn from(config: TokenConfig) -> Self {
        Self {
            is_mintable: config.isMintable,
            is_burnable: config.isBurnable,
            is_pausable: config.isPausable,
        }
    }
}

impl From<crate::types::TokenConfig> for TokenConfig {
    fn from(config: crate::types::TokenConfig) -> Self {
        Self {
            isMintable: config.is_mintable,
            isBurnable: config.is_burnable,
            isPausable: config.is_pausable,
        }
    }
}
