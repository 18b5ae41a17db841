//! Provider construction helpers

use alloy::{
    network::EthereumWallet,
    providers::{ProviderBuilder, RootProvider},
    signers::local::PrivateKeySigner,
    transports::http::{Client, Http},
};
use eyre::{eyre, Result};

/// Build a read-only HTTP provider.
pub fn read_provider(rpc_url: &str) -> Result<RootProvider<Http<Client>>> {
    Ok(ProviderBuilder::new().on_http(
        rpc_url
            .parse()
            .map_err(|e| eyre!("Invalid RPC URL: {}", e))?,
    ))
}

/// Parse a hex private key into a signer.
pub fn parse_signer(private_key: &str) -> Result<PrivateKeySigner> {
    private_key
        .parse()
        .map_err(|e| eyre!("Invalid private key: {}", e))
}

/// Wallet wrapper for a signer, for write-capable providers.
pub fn wallet_for(signer: &PrivateKeySigner) -> EthereumWallet {
    EthereumWallet::from(signer.clone())
}
