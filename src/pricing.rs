//! Pricing

use std::num::NonZeroU32;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::items::LineItem;

/// Fraction digits of the two-decimal currencies the cart supports.
const FRACTION_DIGITS: u32 = 2;

/// Minor units per major unit.
const MINOR_UNITS: i64 = 100;

/// Errors that can occur while parsing prices or calculating totals.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The price string is not a decimal number.
    #[error("invalid price: {0:?}")]
    Invalid(String),

    /// The price is below zero.
    #[error("negative price: {0}")]
    Negative(String),

    /// The amount does not fit in minor units.
    #[error("price out of range: {0}")]
    OutOfRange(String),
}

/// Parse a decimal price string (e.g. `"150.00"`) into money of the given currency.
///
/// Amounts with more than two fraction digits are rounded to the nearest minor unit.
///
/// # Errors
///
/// - [`PricingError::Invalid`]: the string is not a decimal number.
/// - [`PricingError::Negative`]: the amount is below zero.
/// - [`PricingError::OutOfRange`]: the amount overflows the minor unit representation.
pub fn parse_price(
    s: &str,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError> {
    let trimmed = s.trim();

    let amount = trimmed
        .parse::<Decimal>()
        .map_err(|_err| PricingError::Invalid(s.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PricingError::Negative(trimmed.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::from(MINOR_UNITS))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| PricingError::OutOfRange(trimmed.to_string()))?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Price of `quantity` units at `unit_price`, in full minor-unit precision.
///
/// # Errors
///
/// Returns [`PricingError::OutOfRange`] if the product overflows.
pub fn line_total(
    unit_price: &Money<'static, Currency>,
    quantity: NonZeroU32,
) -> Result<Money<'static, Currency>, PricingError> {
    let minor_units = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity.get()))
        .ok_or_else(|| PricingError::OutOfRange(format!("{unit_price} x {quantity}")))?;

    Ok(Money::from_minor(minor_units, unit_price.currency()))
}

/// Sum of line totals in minor units.
///
/// # Errors
///
/// Returns [`PricingError::OutOfRange`] if a line total or the sum overflows.
pub fn total_minor_units(items: &[LineItem]) -> Result<i64, PricingError> {
    items.iter().try_fold(0_i64, |acc, item| {
        let line = item.subtotal()?.to_minor_units();

        acc.checked_add(line)
            .ok_or_else(|| PricingError::OutOfRange(format!("total {acc} + {line}")))
    })
}

/// Calculates the total price of a list of line items.
///
/// An empty list totals zero in `currency`.
///
/// # Errors
///
/// Returns [`PricingError::OutOfRange`] if a line total or the sum overflows.
pub fn total_price(
    items: &[LineItem],
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError> {
    Ok(Money::from_minor(total_minor_units(items)?, currency))
}

/// Formats an amount with exactly two fraction digits, without the currency label.
pub fn format_amount(money: &Money<'_, Currency>) -> String {
    format!("{:.2}", Decimal::new(money.to_minor_units(), FRACTION_DIGITS))
}
