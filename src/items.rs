//! Line items

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};

use crate::pricing::{PricingError, line_total};

/// A named entry in the cart with a unit price and a quantity of at least one.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    name: String,
    unit_price: Money<'static, Currency>,
    quantity: NonZeroU32,
}

impl LineItem {
    /// Creates a line item with a quantity of one.
    pub fn new(name: impl Into<String>, unit_price: Money<'static, Currency>) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Returns the name, which identifies the item within a cart.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the price of a single unit.
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.unit_price
    }

    /// Returns the quantity.
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    /// Returns the unit price multiplied by the quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::OutOfRange`] if the line total overflows.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, PricingError> {
        line_total(&self.unit_price, self.quantity)
    }

    /// Quantity after one more unit, or `None` on overflow.
    pub(crate) fn next_quantity(&self) -> Option<NonZeroU32> {
        self.quantity.checked_add(1)
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }

    /// Removes one unit. Returns `false`, leaving the item untouched, when only one unit is left.
    pub(crate) fn decrement(&mut self) -> bool {
        match NonZeroU32::new(self.quantity.get() - 1) {
            Some(quantity) => {
                self.quantity = quantity;
                true
            }
            None => false,
        }
    }
}
