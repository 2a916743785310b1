//! Checkout guards

use thiserror::Error;

use crate::{cart::Cart, order::OrderError, pricing::PricingError};

/// Reasons an order submission is refused.
///
/// The first three are user-recoverable: fix the condition and submit again. Nothing is
/// retried automatically.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no line items.
    #[error("cart is empty")]
    EmptyCart,

    /// Submitted outside opening hours.
    #[error("restaurant is closed")]
    RestaurantClosed,

    /// The delivery address is blank.
    #[error("delivery address is missing")]
    MissingAddress,

    /// The order totals could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The order link could not be built.
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// Run the submission guards in order, stopping at the first failure.
///
/// `is_open` is only consulted when the cart is non-empty. Returns the trimmed address.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`]: the cart has no line items.
/// - [`CheckoutError::RestaurantClosed`]: `is_open` returned `false`.
/// - [`CheckoutError::MissingAddress`]: the address is blank after trimming.
pub fn check_submission<'a>(
    cart: &Cart,
    address: &'a str,
    is_open: impl FnOnce() -> bool,
) -> Result<&'a str, CheckoutError> {
    if !cart.is_checkout_eligible() {
        return Err(CheckoutError::EmptyCart);
    }

    if !is_open() {
        return Err(CheckoutError::RestaurantClosed);
    }

    let address = address.trim();

    if address.is_empty() {
        return Err(CheckoutError::MissingAddress);
    }

    Ok(address)
}
