//! Terminal front-end surfaces
//!
//! Text renderings of the presentation surface and order channel, used by the `menu-cart`
//! binary. Write failures on the presentation side are logged and otherwise ignored.

use std::{fmt, io, time::Duration};

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use tracing::warn;
use url::Url;

use crate::{
    order::{OrderChannel, OrderError},
    presentation::{
        AttentionTarget, CartView, Notification, NotificationLevel, OpenStatus, Presenter,
    },
};

/// Renders the cart as text on any writer.
#[derive(Debug)]
pub struct TerminalPresenter<W> {
    out: W,
    cart_visible: bool,
}

impl<W: io::Write> TerminalPresenter<W> {
    /// Render to `out`, starting with the cart hidden.
    pub fn new(out: W) -> Self {
        Self {
            out,
            cart_visible: false,
        }
    }

    /// Whether the cart table is currently shown.
    pub fn is_cart_visible(&self) -> bool {
        self.cart_visible
    }

    /// Consume the presenter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.out, "{args}") {
            warn!(%err, "failed to write to terminal");
        }
    }
}

/// Cart lines as a table.
pub fn cart_table(view: &CartView) -> String {
    let mut builder = Builder::default();

    builder.push_record(["#", "Item", "Qtd", "Subtotal"]);

    for (idx, line) in view.lines.iter().enumerate() {
        builder.push_record([
            format!("{}", idx + 1),
            line.name.clone(),
            line.quantity.to_string(),
            line.subtotal_display(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..4), Alignment::right());

    table.to_string()
}

impl<W: io::Write> Presenter for TerminalPresenter<W> {
    fn render(&mut self, view: &CartView) {
        if self.cart_visible {
            if view.lines.is_empty() {
                self.line(format_args!("(carrinho vazio)"));
            } else {
                let table = cart_table(view);
                self.line(format_args!("{table}"));
            }

            self.line(format_args!(
                "Total: {} {}",
                view.total_display(),
                view.currency_label()
            ));
        }

        let checkout = if view.checkout_enabled {
            "enabled"
        } else {
            "disabled"
        };

        self.line(format_args!(
            "[cart: {} | {} {} | checkout {checkout}]",
            view.item_count,
            view.total_display(),
            view.currency_label(),
        ));
    }

    fn set_cart_visible(&mut self, visible: bool) {
        self.cart_visible = visible;
    }

    fn show_open_status(&mut self, status: &OpenStatus) {
        self.line(format_args!("Status: {}", status.label));
    }

    fn prompt(&mut self, message: &str) {
        self.line(format_args!("! {message}"));
    }

    fn draw_attention(&mut self, target: AttentionTarget, _duration: Duration) {
        let target = match target {
            AttentionTarget::Checkout => "checkout",
            AttentionTarget::AddressField => "address",
        };

        self.line(format_args!("~~ {target} ~~"));
    }

    fn notify(&mut self, notification: &Notification) {
        let marker = match notification.level {
            NotificationLevel::Error => "x",
        };

        self.line(format_args!("[{marker}] {}", notification.message));
    }

    fn show_address_warning(&mut self, message: &str) {
        self.line(format_args!("address: {message}"));
    }

    fn hide_address_warning(&mut self) {}
}

/// Prints order links for the user to open.
#[derive(Debug)]
pub struct TerminalChannel<W> {
    out: W,
}

impl<W: io::Write> TerminalChannel<W> {
    /// Print links to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the channel, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> OrderChannel for TerminalChannel<W> {
    fn dispatch(&mut self, url: &Url) -> Result<(), OrderError> {
        writeln!(self.out, "Open to send the order: {url}")?;
        self.out.flush()?;

        Ok(())
    }
}
