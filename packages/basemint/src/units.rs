//! Fixed-point amount conversion
//!
//! All token amounts use the 18-decimal convention. Human decimal strings
//! are scaled to base units before submission and base units are rendered
//! back for display. Malformed input is rejected with a typed error; nothing
//! in this module panics on user input.

use alloy::primitives::U256;
use thiserror::Error;

/// Fixed decimal scale shared by every token the factory deploys.
pub const TOKEN_DECIMALS: u32 = 18;

/// Why an amount string could not be scaled to base units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("amount is empty")]
    Empty,
    #[error("amount cannot be negative")]
    Negative,
    #[error("amount `{0}` is not a decimal number")]
    Malformed(String),
    #[error("amount has more than {TOKEN_DECIMALS} decimal places")]
    TooManyDecimals,
    #[error("amount is too large")]
    Overflow,
}

fn pow10(exp: u32) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}

/// Scale a human decimal string (e.g. `"1000.5"`) to 18-decimal base units.
pub fn parse_amount(input: &str) -> Result<U256, UnitsError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UnitsError::Empty);
    }
    if input.starts_with('-') {
        return Err(UnitsError::Negative);
    }

    let (int_part, frac_part) = match input.split_once('.') {
        Some((i, f)) => (i, f),
        None => (input, ""),
    };

    // A lone "." has neither part; "1.2.3" leaves a '.' in the fraction.
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(UnitsError::Malformed(input.to_string()));
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(UnitsError::Malformed(input.to_string()));
    }
    if frac_part.len() as u32 > TOKEN_DECIMALS {
        return Err(UnitsError::TooManyDecimals);
    }

    let int_value = if int_part.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(int_part, 10)
            .map_err(|_| UnitsError::Malformed(input.to_string()))?
    };
    let frac_value = if frac_part.is_empty() {
        U256::ZERO
    } else {
        let raw = U256::from_str_radix(frac_part, 10)
            .map_err(|_| UnitsError::Malformed(input.to_string()))?;
        raw * pow10(TOKEN_DECIMALS - frac_part.len() as u32)
    };

    int_value
        .checked_mul(pow10(TOKEN_DECIMALS))
        .and_then(|scaled| scaled.checked_add(frac_value))
        .ok_or(UnitsError::Overflow)
}

/// Render base units back to a decimal string, trimming trailing zeros.
pub fn format_amount(amount: U256) -> String {
    let scale = pow10(TOKEN_DECIMALS);
    let int_part = amount / scale;
    let frac_part = amount % scale;

    if frac_part.is_zero() {
        return int_part.to_string();
    }

    let mut frac = format!("{:0>width$}", frac_part, width = TOKEN_DECIMALS as usize);
    while frac.ends_with('0') {
        frac.pop();
    }
    format!("{}.{}", int_part, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_amount_scales() {
        assert_eq!(
            parse_amount("1000000").unwrap(),
            U256::from(1_000_000u64) * pow10(18)
        );
    }

    #[test]
    fn test_fractional_amount_scales() {
        let expected = U256::from(15u64) * pow10(17);
        assert_eq!(parse_amount("1.5").unwrap(), expected);
        assert_eq!(parse_amount(".5").unwrap(), U256::from(5u64) * pow10(17));
        assert_eq!(parse_amount("1.").unwrap(), pow10(18));
    }

    #[test]
    fn test_zero_amounts() {
        assert_eq!(parse_amount("0").unwrap(), U256::ZERO);
        assert_eq!(parse_amount("0.0").unwrap(), U256::ZERO);
    }

    #[test]
    fn test_malformed_amounts_rejected() {
        assert_eq!(parse_amount(""), Err(UnitsError::Empty));
        assert_eq!(parse_amount("   "), Err(UnitsError::Empty));
        assert_eq!(parse_amount("-5"), Err(UnitsError::Negative));
        assert!(matches!(parse_amount("."), Err(UnitsError::Malformed(_))));
        assert!(matches!(parse_amount("1.2.3"), Err(UnitsError::Malformed(_))));
        assert!(matches!(parse_amount("12a"), Err(UnitsError::Malformed(_))));
        assert!(matches!(parse_amount("1e18"), Err(UnitsError::Malformed(_))));
    }

    #[test]
    fn test_too_many_decimals_rejected() {
        // 19 fractional digits
        assert_eq!(
            parse_amount("1.0000000000000000001"),
            Err(UnitsError::TooManyDecimals)
        );
        // exactly 18 is fine
        assert_eq!(
            parse_amount("1.000000000000000001").unwrap(),
            pow10(18) + U256::from(1u64)
        );
    }

    #[test]
    fn test_format_trims_trailing_zeros() {
        assert_eq!(format_amount(U256::ZERO), "0");
        assert_eq!(format_amount(pow10(18)), "1");
        assert_eq!(format_amount(U256::from(15u64) * pow10(17)), "1.5");
        assert_eq!(format_amount(U256::from(1u64)), "0.000000000000000001");
    }

    #[test]
    fn test_round_trip_stability() {
        for raw in ["1", "0.5", "1000000", "123.456", "0.000000000000000001"] {
            let scaled = parse_amount(raw).unwrap();
            let reparsed = parse_amount(&format_amount(scaled)).unwrap();
            assert_eq!(scaled, reparsed, "round trip failed for {raw}");
        }
    }
}
