//! Cart controller
//!
//! Owns the session's cart and turns UI events into cart mutations, presenter updates and,
//! on a successful checkout, an order sent through the [`OrderChannel`].
//!
//! Every method runs to completion before returning, so mutations never interleave.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    cart::{Cart, CartError},
    catalog::{AddIntent, CatalogError},
    checkout::{CheckoutError, check_submission},
    config::{Messages, StoreConfig},
    hours::Clock,
    order::{Order, OrderChannel},
    presentation::{
        AttentionTarget, CartView, Notification, NotificationLevel, OpenStatus, Presenter,
    },
    pricing::PricingError,
};

/// Errors adding an item from the catalog.
#[derive(Debug, Error, PartialEq)]
pub enum AddError {
    /// The control's attributes are malformed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The cart refused the item.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// An order that passed every guard and was handed to the order channel.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedOrder {
    /// The order as submitted
    pub order: Order,

    /// Rendered order message
    pub message: String,

    /// Deep link the message was sent through
    pub url: Url,
}

/// Mediates between UI events, the cart and the presentation surface.
#[derive(Debug)]
pub struct CartController<P, C, O> {
    cart: Cart,
    config: StoreConfig,
    presenter: P,
    clock: C,
    channel: O,
}

impl<P: Presenter, C: Clock, O: OrderChannel> CartController<P, C, O> {
    /// Start a session with an empty cart.
    pub fn new(config: StoreConfig, presenter: P, clock: C, channel: O) -> Self {
        Self {
            cart: Cart::new(config.currency()),
            config,
            presenter,
            clock,
            channel,
        }
    }

    /// The session's cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The presentation surface.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The presentation surface, mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// The order channel.
    pub fn channel(&self) -> &O {
        &self.channel
    }

    /// Add one unit of `name` at `unit_price` and refresh the presentation.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the cart refuses the item; nothing is re-rendered then.
    pub fn add_item(
        &mut self,
        name: &str,
        unit_price: Money<'static, Currency>,
    ) -> Result<(), CartError> {
        self.cart.add_item(name, unit_price)?;

        debug!(item = name, count = self.cart.item_count(), "added item to cart");
        self.render();

        Ok(())
    }

    /// Handle an add-to-cart intent from the catalog.
    ///
    /// # Errors
    ///
    /// Returns an `AddError` if the intent's attributes are malformed or the cart refuses
    /// the item. The cart is left unchanged and a warning is logged.
    pub fn add_from_catalog(&mut self, intent: &AddIntent) -> Result<(), AddError> {
        let (name, unit_price) = intent
            .parse(self.cart.currency())
            .inspect_err(|err| warn!(%err, ?intent, "rejected add-to-cart intent"))?;

        self.add_item(&name, unit_price)
            .inspect_err(|err| warn!(%err, item = name.as_str(), "cart refused item"))?;

        Ok(())
    }

    /// Remove one unit of `name` and refresh the presentation. Unknown names are ignored.
    pub fn remove_item(&mut self, name: &str) {
        if self.cart.remove_item(name) {
            debug!(item = name, count = self.cart.item_count(), "removed item from cart");
        } else {
            debug!(item = name, "remove ignored, item not in cart");
        }

        self.render();
    }

    /// Current cart total.
    ///
    /// # Errors
    ///
    /// Returns a `PricingError` if the total cannot be computed.
    pub fn total(&self) -> Result<Money<'static, Currency>, PricingError> {
        self.cart.total()
    }

    /// Sum of quantities in the cart.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Whether the checkout control should be enabled.
    pub fn is_checkout_eligible(&self) -> bool {
        self.cart.is_checkout_eligible()
    }

    /// Whether the restaurant is open right now. Reads the clock on every call.
    pub fn is_open(&self) -> bool {
        self.config.opening_hours.is_open(&self.clock)
    }

    /// Evaluate opening hours and update the status indicator.
    pub fn refresh_open_status(&mut self) -> bool {
        let open = self.is_open();

        self.presenter
            .show_open_status(&open_status(&self.config.messages, open));

        open
    }

    /// Show the cart presentation with fresh contents.
    pub fn open_cart(&mut self) {
        self.presenter.set_cart_visible(true);
        self.render();
    }

    /// Hide the cart presentation.
    pub fn close_cart(&mut self) {
        self.presenter.set_cart_visible(false);
    }

    /// React to input in the address field: non-blank content clears the address warning.
    pub fn address_changed(&mut self, value: &str) {
        if !value.trim().is_empty() {
            self.presenter.hide_address_warning();
        }
    }

    /// Submit the cart as an order delivered to `address`.
    ///
    /// Guards run in order: empty cart, opening hours, blank address. The hours guard also
    /// refreshes the status indicator. A refused submission
    /// is surfaced through the presenter and leaves the cart untouched. On success the order
    /// is sent through the order channel, the cart is emptied and the cart presentation is
    /// closed. A failing channel is logged; the submission still counts.
    ///
    /// # Errors
    ///
    /// Returns a `CheckoutError` describing the first guard that failed, or why the order
    /// could not be built.
    pub fn submit_order(&mut self, address: &str) -> Result<SubmittedOrder, CheckoutError> {
        let hours = self.config.opening_hours;
        let clock = &self.clock;
        let messages = &self.config.messages;
        let presenter = &mut self.presenter;

        let is_open = || {
            let open = hours.is_open(clock);
            presenter.show_open_status(&open_status(messages, open));
            open
        };

        let address = match check_submission(&self.cart, address, is_open) {
            Ok(address) => address,
            Err(err) => {
                info!(%err, "order submission refused");
                self.surface_refusal(&err);
                return Err(err);
            }
        };

        self.presenter.hide_address_warning();

        let order = Order::from_cart(&self.cart, address)?;
        let message = order.message(&self.config.order_labels);
        let url = self.config.order_channel.url(&message)?;

        if let Err(err) = self.channel.dispatch(&url) {
            warn!(%err, "order channel failed to open the order link");
        }

        info!(
            items = self.cart.item_count(),
            total = %order.total(),
            "order submitted"
        );

        self.cart.clear();
        self.presenter.set_cart_visible(false);
        self.render();

        Ok(SubmittedOrder {
            order,
            message,
            url,
        })
    }

    fn surface_refusal(&mut self, err: &CheckoutError) {
        let messages = &self.config.messages;
        let timings = self.config.timings;

        match err {
            CheckoutError::EmptyCart => {
                self.presenter.prompt(&messages.empty_cart);
                self.presenter
                    .draw_attention(AttentionTarget::Checkout, timings.attention());
            }
            CheckoutError::RestaurantClosed => {
                self.presenter.notify(&Notification {
                    message: messages.restaurant_closed.clone(),
                    level: NotificationLevel::Error,
                    duration: timings.closed_notification(),
                });
            }
            CheckoutError::MissingAddress => {
                self.presenter.show_address_warning(&messages.missing_address);
                self.presenter
                    .draw_attention(AttentionTarget::AddressField, timings.attention());
            }
            CheckoutError::Pricing(_) | CheckoutError::Order(_) => {}
        }
    }

    fn render(&mut self) {
        match CartView::from_cart(&self.cart) {
            Ok(view) => self.presenter.render(&view),
            Err(err) => warn!(%err, "failed to derive cart view"),
        }
    }
}

fn open_status(messages: &Messages, open: bool) -> OpenStatus {
    let label = if open {
        &messages.open_status
    } else {
        &messages.closed_status
    };

    OpenStatus {
        open,
        label: label.clone(),
    }
}
