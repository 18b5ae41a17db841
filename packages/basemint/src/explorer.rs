//! Block-explorer link building
//!
//! Presentation-only: unknown chain ids yield no link, never an error.

use alloy::primitives::{Address, TxHash};

/// Explorer base URLs for the supported chains.
const EXPLORER_URLS: [(u64, &str); 2] = [
    (8453, "https://basescan.org"),
    (84532, "https://sepolia.basescan.org"),
];

/// Explorer base URL for a chain, if one is known.
pub fn explorer_base(chain_id: u64) -> Option<&'static str> {
    EXPLORER_URLS
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, base)| *base)
}

/// Link to a transaction on the chain's explorer.
pub fn tx_url(chain_id: u64, hash: TxHash) -> Option<String> {
    explorer_base(chain_id).map(|base| format!("{}/tx/{}", base, hash))
}

/// Link to a token page on the chain's explorer.
pub fn token_url(chain_id: u64, token: Address) -> Option<String> {
    explorer_base(chain_id).map(|base| format!("{}/token/{}", base, token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_tx_url() {
        let hash: TxHash =
            "0xabc0000000000000000000000000000000000000000000000000000000000000"
                .parse()
                .unwrap();
        assert_eq!(
            tx_url(8453, hash).unwrap(),
            format!("https://basescan.org/tx/{}", hash)
        );
    }

    #[test]
    fn test_sepolia_tx_url() {
        let hash: TxHash =
            "0xabc0000000000000000000000000000000000000000000000000000000000000"
                .parse()
                .unwrap();
        assert_eq!(
            tx_url(84532, hash).unwrap(),
            format!("https://sepolia.basescan.org/tx/{}", hash)
        );
    }

    #[test]
    fn test_unknown_chain_has_no_link() {
        let hash = TxHash::ZERO;
        assert_eq!(explorer_base(1), None);
        assert_eq!(tx_url(1, hash), None);
        assert_eq!(token_url(1, Address::ZERO), None);
    }

    #[test]
    fn test_token_url() {
        let token: Address = "0x00000000000000000000000000000000000000aa".parse().unwrap();
        assert_eq!(
            token_url(8453, token).unwrap(),
            format!("https://basescan.org/token/{}", token)
        );
    }
}
