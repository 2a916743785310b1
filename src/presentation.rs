//! Presentation
//!
//! The controller never owns a rendering surface. After each mutation it builds a
//! [`CartView`] and hands it, together with any warnings or notifications, to a
//! [`Presenter`].

use std::time::Duration;

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::Cart,
    pricing::{PricingError, format_amount},
};

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineView {
    /// Item name, also the key of the line's remove control
    pub name: String,

    /// Units in the cart
    pub quantity: u32,

    /// Unit price multiplied by quantity
    pub subtotal: Money<'static, Currency>,
}

impl LineView {
    /// Subtotal with two fraction digits and the currency label.
    pub fn subtotal_display(&self) -> String {
        format!(
            "{} {}",
            format_amount(&self.subtotal),
            self.subtotal.currency().iso_alpha_code
        )
    }
}

/// Derived display values of a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartView {
    /// Lines in first-added order
    pub lines: Vec<LineView>,

    /// Cart total
    pub total: Money<'static, Currency>,

    /// Sum of quantities, shown on the cart badge
    pub item_count: u64,

    /// Whether the checkout control is enabled
    pub checkout_enabled: bool,
}

impl CartView {
    /// Derive the view of `cart`.
    ///
    /// # Errors
    ///
    /// Returns a `PricingError` if a line total or the cart total cannot be computed.
    pub fn from_cart(cart: &Cart) -> Result<Self, PricingError> {
        let lines = cart
            .iter()
            .map(|item| {
                Ok(LineView {
                    name: item.name().to_string(),
                    quantity: item.quantity().get(),
                    subtotal: item.subtotal()?,
                })
            })
            .collect::<Result<Vec<_>, PricingError>>()?;

        Ok(Self {
            lines,
            total: cart.total()?,
            item_count: cart.item_count(),
            checkout_enabled: cart.is_checkout_eligible(),
        })
    }

    /// Total with two fraction digits, without the currency label.
    pub fn total_display(&self) -> String {
        format_amount(&self.total)
    }

    /// Currency label shown next to amounts.
    pub fn currency_label(&self) -> &'static str {
        self.total.currency().iso_alpha_code
    }
}

/// Control that receives the attention animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttentionTarget {
    /// The checkout button
    Checkout,

    /// The delivery address field
    AddressField,
}

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Error styling
    Error,
}

/// Transient, auto-dismissing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Text to show
    pub message: String,

    /// Styling
    pub level: NotificationLevel,

    /// Time until it dismisses itself
    pub duration: Duration,
}

/// Restaurant status indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenStatus {
    /// Whether the restaurant is open
    pub open: bool,

    /// Text to show
    pub label: String,
}

/// Rendering surface driven by the cart controller.
///
/// Timers behind transient effects belong to the implementation; the controller never waits
/// on them.
pub trait Presenter {
    /// Refresh the line list, total, item badge and checkout control.
    fn render(&mut self, view: &CartView);

    /// Show or hide the cart presentation.
    fn set_cart_visible(&mut self, visible: bool);

    /// Update the open/closed status indicator.
    fn show_open_status(&mut self, status: &OpenStatus);

    /// Show a blocking prompt.
    fn prompt(&mut self, message: &str);

    /// Run the attention animation on `target`, resetting after `duration`.
    fn draw_attention(&mut self, target: AttentionTarget, duration: Duration);

    /// Show a transient notification.
    fn notify(&mut self, notification: &Notification);

    /// Show the persistent warning next to the address field and mark it invalid.
    fn show_address_warning(&mut self, message: &str);

    /// Hide the address warning and clear the invalid mark.
    fn hide_address_warning(&mut self);
}

/// Everything a [`RecordingPresenter`] was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    /// [`Presenter::render`]
    Render(CartView),

    /// [`Presenter::set_cart_visible`]
    CartVisible(bool),

    /// [`Presenter::show_open_status`]
    OpenStatus(OpenStatus),

    /// [`Presenter::prompt`]
    Prompt(String),

    /// [`Presenter::draw_attention`]
    Attention(AttentionTarget, Duration),

    /// [`Presenter::notify`]
    Notify(Notification),

    /// [`Presenter::show_address_warning`]
    AddressWarning(String),

    /// [`Presenter::hide_address_warning`]
    AddressWarningCleared,
}

/// Headless presenter that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> &[PresenterEvent] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take_events(&mut self) -> Vec<PresenterEvent> {
        std::mem::take(&mut self.events)
    }

    /// The most recently rendered view.
    pub fn last_view(&self) -> Option<&CartView> {
        self.events.iter().rev().find_map(|event| match event {
            PresenterEvent::Render(view) => Some(view),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, view: &CartView) {
        self.events.push(PresenterEvent::Render(view.clone()));
    }

    fn set_cart_visible(&mut self, visible: bool) {
        self.events.push(PresenterEvent::CartVisible(visible));
    }

    fn show_open_status(&mut self, status: &OpenStatus) {
        self.events.push(PresenterEvent::OpenStatus(status.clone()));
    }

    fn prompt(&mut self, message: &str) {
        self.events.push(PresenterEvent::Prompt(message.to_string()));
    }

    fn draw_attention(&mut self, target: AttentionTarget, duration: Duration) {
        self.events.push(PresenterEvent::Attention(target, duration));
    }

    fn notify(&mut self, notification: &Notification) {
        self.events
            .push(PresenterEvent::Notify(notification.clone()));
    }

    fn show_address_warning(&mut self, message: &str) {
        self.events
            .push(PresenterEvent::AddressWarning(message.to_string()));
    }

    fn hide_address_warning(&mut self) {
        self.events.push(PresenterEvent::AddressWarningCleared);
    }
}
