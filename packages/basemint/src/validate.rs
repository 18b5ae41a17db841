//! Client-side form validation
//!
//! Runs before the call builder: every failure is reported per-field and
//! blocks submission, so nothing malformed ever reaches the network. Supply
//! and cap are compared as scaled integers, not floats.

use thiserror::Error;

use crate::calls::{
    BurnInput, CreateTokenInput, MintInput, PauseInput, TransferInput, TransferOwnershipInput,
};
use crate::units::parse_amount;

/// Longest symbol the factory accepts.
pub const MAX_SYMBOL_LEN: usize = 11;

/// Which form field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Symbol,
    InitialSupply,
    Cap,
    Token,
    Recipient,
    Amount,
    NewOwner,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Symbol => "symbol",
            Field::InitialSupply => "initial supply",
            Field::Cap => "cap",
            Field::Token => "token",
            Field::Recipient => "recipient",
            Field::Amount => "amount",
            Field::NewOwner => "new owner",
        }
    }
}

/// A single per-field validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {message}", field.as_str())]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn check_address(field: Field, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "address is required"));
    } else if value.trim().parse::<alloy::primitives::Address>().is_err() {
        errors.push(FieldError::new(field, "not a valid address"));
    }
}

fn check_positive_amount(field: Field, value: &str, errors: &mut Vec<FieldError>) {
    match parse_amount(value) {
        Ok(amount) if amount.is_zero() => {
            errors.push(FieldError::new(field, "must be greater than 0"));
        }
        Ok(_) => {}
        Err(e) => errors.push(FieldError::new(field, e.to_string())),
    }
}

/// Validate a create-token form.
pub fn validate_create(input: &CreateTokenInput) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if input.name.trim().is_empty() {
        errors.push(FieldError::new(Field::Name, "token name is required"));
    }

    let symbol = input.symbol.trim();
    if symbol.is_empty() {
        errors.push(FieldError::new(Field::Symbol, "symbol is required"));
    } else if symbol.len() > MAX_SYMBOL_LEN {
        errors.push(FieldError::new(
            Field::Symbol,
            format!("symbol must be {MAX_SYMBOL_LEN} characters or less"),
        ));
    }

    check_positive_amount(Field::InitialSupply, &input.initial_supply, &mut errors);

    // Cap is optional; zero or empty means uncapped.
    if !input.cap.trim().is_empty() {
        match (parse_amount(&input.cap), parse_amount(&input.initial_supply)) {
            (Ok(cap), Ok(supply)) if !cap.is_zero() && cap < supply => {
                errors.push(FieldError::new(
                    Field::Cap,
                    "cap must be greater than or equal to initial supply",
                ));
            }
            (Err(e), _) => errors.push(FieldError::new(Field::Cap, e.to_string())),
            _ => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a mint form.
pub fn validate_mint(input: &MintInput) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    check_address(Field::Token, &input.token, &mut errors);
    check_address(Field::Recipient, &input.to, &mut errors);
    check_positive_amount(Field::Amount, &input.amount, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a burn form.
pub fn validate_burn(input: &BurnInput) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    check_address(Field::Token, &input.token, &mut errors);
    check_positive_amount(Field::Amount, &input.amount, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a transfer form.
pub fn validate_transfer(input: &TransferInput) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    check_address(Field::Token, &input.token, &mut errors);
    check_address(Field::Recipient, &input.to, &mut errors);
    check_positive_amount(Field::Amount, &input.amount, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a pause/unpause form.
pub fn validate_pause(input: &PauseInput) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    check_address(Field::Token, &input.token, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a transfer-ownership form.
pub fn validate_transfer_ownership(
    input: &TransferOwnershipInput,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    check_address(Field::Token, &input.token, &mut errors);
    check_address(Field::NewOwner, &input.new_owner, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
