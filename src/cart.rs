//! Cart

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    items::LineItem,
    pricing::{PricingError, line_total, total_minor_units, total_price},
};

/// Errors related to cart mutations.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// An item's currency differs from the cart currency (item name, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// Adding another unit would overflow the item's quantity.
    #[error("Item {0} cannot hold any more units")]
    QuantityOverflow(String),

    /// Adding another unit would overflow the item's line total or the cart total.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Ordered, name-keyed collection of line items priced in a single currency.
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<LineItem>,
    currency: &'static Currency,
}

impl Cart {
    /// Create a new, empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Add one unit of `name`.
    ///
    /// An existing line item with the same name gains one unit and keeps its original
    /// unit price; otherwise a new line item is appended with a quantity of one.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the price currency differs from the cart currency, or if the
    /// quantity, line total or cart total would overflow. The cart is left unchanged on error.
    pub fn add_item(
        &mut self,
        name: &str,
        unit_price: Money<'static, Currency>,
    ) -> Result<(), CartError> {
        let item_currency = unit_price.currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                name.to_string(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let index = self.items.iter().position(|item| item.name() == name);

        let added = index
            .and_then(|index| self.items.get(index))
            .map_or(unit_price.to_minor_units(), |item| {
                item.unit_price().to_minor_units()
            });

        total_minor_units(&self.items)?
            .checked_add(added)
            .ok_or_else(|| PricingError::OutOfRange(format!("cart total with {name}")))?;

        match index.and_then(|index| self.items.get_mut(index)) {
            Some(item) => {
                let quantity = item
                    .next_quantity()
                    .ok_or_else(|| CartError::QuantityOverflow(name.to_string()))?;

                line_total(item.unit_price(), quantity)?;
                item.set_quantity(quantity);
            }
            None => self.items.push(LineItem::new(name, unit_price)),
        }

        Ok(())
    }

    /// Remove one unit of `name`, deleting the line item when its last unit goes.
    ///
    /// Returns `false` if no line item is named `name`.
    pub fn remove_item(&mut self, name: &str) -> bool {
        let Some(index) = self.items.iter().position(|item| item.name() == name) else {
            return false;
        };

        let decremented = self
            .items
            .get_mut(index)
            .is_some_and(LineItem::decrement);

        if !decremented {
            self.items.remove(index);
        }

        true
    }

    /// Calculate the total of the cart.
    ///
    /// # Errors
    ///
    /// Returns a `PricingError` if the total does not fit in minor units.
    pub fn total(&self) -> Result<Money<'static, Currency>, PricingError> {
        total_price(&self.items, self.currency)
    }

    /// Sum of quantities across all line items.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity().get()))
            .sum()
    }

    /// Whether an order may be submitted from this cart.
    #[must_use]
    pub fn is_checkout_eligible(&self) -> bool {
        !self.is_empty()
    }

    /// Get a line item by name.
    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.name() == name)
    }

    /// Iterate over the line items in first-added order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Get the number of distinct line items in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Remove every line item, keeping the currency.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
