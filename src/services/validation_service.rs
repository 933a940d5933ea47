//! Amount validation for deposit and withdrawal dialogs
//!
//! Every dialog variant runs the same rule set, picked by [`TransferDirection`]:
//! the amount must parse, must be strictly positive once rounded to cents, and a
//! withdrawal may not exceed the balance snapshot in [`TransferBounds`].

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::models::{TransferBounds, TransferDirection};

/// Currency precision used for every amount leaving the validator
pub const AMOUNT_SCALE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid amount")]
    NotANumber,
    #[error("Amount must be greater than 0")]
    NotPositive,
    #[error("Withdrawal amount exceeds current balance")]
    ExceedsBalance,
}

/// Validate the raw amount text of a transfer.
///
/// Returns the amount rounded to cents with at least two fractional digits.
pub fn validate(
    amount_text: &str,
    direction: TransferDirection,
    bounds: &TransferBounds,
) -> Result<Decimal, ValidationError> {
    let parsed = parse_amount(amount_text)?;
    let amount = to_cents(parsed)?;

    if amount <= Decimal::ZERO {
        return Err(ValidationError::NotPositive);
    }

    if direction == TransferDirection::Withdrawal {
        if let Some(max_amount) = bounds.max_amount {
            if amount > max_amount {
                return Err(ValidationError::ExceedsBalance);
            }
        }
    }

    Ok(amount)
}

/// Parse decimal text with `.` as the separator.
///
/// Plain and scientific notation are accepted; anything else, including
/// `NaN` and infinities, is rejected.
fn parse_amount(amount_text: &str) -> Result<Decimal, ValidationError> {
    let text = amount_text.trim();
    if text.is_empty() {
        return Err(ValidationError::NotANumber);
    }

    // Decimal's parser tolerates `_` separators, user input should not
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return Err(ValidationError::NotANumber);
    }

    if text.contains(['e', 'E']) {
        parse_scientific(text)
    } else {
        Decimal::from_str(text).map_err(|_| ValidationError::NotANumber)
    }
}

/// Scientific notation, with exponents below `Decimal`'s 28-digit scale
/// shifted digit by digit so tiny values end up as zero like their plain form
fn parse_scientific(text: &str) -> Result<Decimal, ValidationError> {
    if let Ok(value) = Decimal::from_scientific(text) {
        return Ok(value);
    }

    let (mantissa, exponent) = text
        .split_once(['e', 'E'])
        .ok_or(ValidationError::NotANumber)?;
    let mut value = Decimal::from_str(mantissa).map_err(|_| ValidationError::NotANumber)?;
    let exponent: i64 = exponent.parse().map_err(|_| ValidationError::NotANumber)?;

    // Positive exponents only fail on overflow
    if exponent >= 0 && !value.is_zero() {
        return Err(ValidationError::NotANumber);
    }

    for _ in 0..exponent.unsigned_abs() {
        if value.is_zero() {
            break;
        }
        value = value
            .checked_div(Decimal::TEN)
            .ok_or(ValidationError::NotANumber)?;
    }
    Ok(value)
}

/// Round to cents and pad to [`AMOUNT_SCALE`] digits.
///
/// Amounts too large to carry two fractional digits are not valid amounts.
fn to_cents(amount: Decimal) -> Result<Decimal, ValidationError> {
    let mut rounded =
        amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.scale() < AMOUNT_SCALE {
        rounded.rescale(AMOUNT_SCALE);
    }
    if rounded.scale() < AMOUNT_SCALE {
        return Err(ValidationError::NotANumber);
    }
    Ok(rounded)
}
