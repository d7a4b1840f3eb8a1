//! Money helpers
//!
//! Conversions between minor units and the decimal strings exchanged with
//! shipping and payment providers.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors raised while converting decimal amounts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The amount could not be parsed as a decimal number.
    #[error("invalid decimal amount: {0}")]
    Invalid(String),

    /// The amount does not fit in minor units.
    #[error("amount out of range: {0}")]
    OutOfRange(String),
}

/// Parse a decimal string such as `"12.34"` into money of the given currency.
///
/// Amounts with more precision than the currency allows are rounded to the
/// nearest minor unit, midpoint away from zero.
///
/// # Errors
///
/// - [`AmountError::Invalid`]: the string is not a decimal number.
/// - [`AmountError::OutOfRange`]: the amount overflows minor units.
pub fn parse_amount<'a>(
    value: &str,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, AmountError> {
    let amount: Decimal = value
        .trim()
        .parse()
        .map_err(|_parse_error| AmountError::Invalid(value.to_owned()))?;

    let minor = amount
        .checked_mul(Decimal::from(10_i64.pow(currency.exponent)))
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|scaled| scaled.to_i64())
        .ok_or_else(|| AmountError::OutOfRange(value.to_owned()))?;

    Ok(Money::from_minor(minor, currency))
}

/// Format money as a plain decimal string with the currency's precision.
#[must_use]
pub fn format_amount(money: &Money<'_, Currency>) -> String {
    Decimal::new(money.to_minor_units(), money.currency().exponent).to_string()
}

/// Whether the amount is strictly greater than zero.
#[must_use]
pub fn is_positive(money: &Money<'_, Currency>) -> bool {
    money.to_minor_units() > 0
}
