//! Rendering for token records: a serializable view with human-readable
//! amounts, plus a text layout for the terminal.

use std::fmt;

use serde::Serialize;

use basemint::{format_amount, is_uncapped, TokenRecord};

/// A token record with amounts scaled back to human decimal strings.
#[derive(Debug, Clone, Serialize)]
pub struct TokenView {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub total_supply: String,
    /// `None` when the token is uncapped.
    pub cap: Option<String>,
    pub mintable: bool,
    pub burnable: bool,
    pub pausable: bool,
    pub paused: bool,
    pub owner: String,
    pub balance: Option<String>,
}

impl From<&TokenRecord> for TokenView {
    fn from(record: &TokenRecord) -> Self {
        Self {
            address: record.address.to_string(),
            name: record.name.clone(),
            symbol: record.symbol.clone(),
            total_supply: format_amount(record.total_supply),
            cap: (!is_uncapped(&record.cap)).then(|| format_amount(record.cap)),
            mintable: record.config.is_mintable,
            burnable: record.config.is_burnable,
            pausable: record.config.is_pausable,
            paused: record.paused,
            owner: record.owner.to_string(),
            balance: record.user_balance.map(format_amount),
        }
    }
}

impl fmt::Display for TokenView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.name, self.symbol)?;
        writeln!(f, "  address:      {}", self.address)?;
        writeln!(f, "  total supply: {}", self.total_supply)?;
        match &self.cap {
            Some(cap) => writeln!(f, "  cap:          {cap}")?,
            None => writeln!(f, "  cap:          uncapped")?,
        }
        let mut features = Vec::new();
        if self.mintable {
            features.push("mintable");
        }
        if self.burnable {
            features.push("burnable");
        }
        if self.pausable {
            features.push("pausable");
        }
        if features.is_empty() {
            features.push("fixed");
        }
        writeln!(f, "  features:     {}", features.join(", "))?;
        if self.paused {
            writeln!(f, "  status:       PAUSED")?;
        }
        write!(f, "  owner:        {}", self.owner)?;
        if let Some(balance) = &self.balance {
            write!(f, "\n  your balance: {balance}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};
    use basemint::{parse_amount, TokenConfig};

    fn record() -> TokenRecord {
        TokenRecord {
            address: Address::repeat_byte(0x0a),
            name: "My Token".into(),
            symbol: "MTK".into(),
            total_supply: parse_amount("1000").unwrap(),
            cap: U256::ZERO,
            config: TokenConfig {
                is_mintable: true,
                is_burnable: false,
                is_pausable: false,
            },
            paused: false,
            owner: Address::repeat_byte(0x0b),
            user_balance: None,
        }
    }

    #[test]
    fn test_view_formats_amounts_and_cap() {
        let view = TokenView::from(&record());
        assert_eq!(view.total_supply, "1000");
        assert_eq!(view.cap, None);
        assert_eq!(view.balance, None);
    }

    #[test]
    fn test_display_shows_uncapped_and_features() {
        let rendered = TokenView::from(&record()).to_string();
        assert!(rendered.contains("My Token (MTK)"));
        assert!(rendered.contains("uncapped"));
        assert!(rendered.contains("mintable"));
        assert!(!rendered.contains("PAUSED"));
    }

    #[test]
    fn test_display_balance_when_present() {
        let mut record = record();
        record.user_balance = Some(parse_amount("2.5").unwrap());
        let rendered = TokenView::from(&record).to_string();
        assert!(rendered.contains("your balance: 2.5"));
    }
}
