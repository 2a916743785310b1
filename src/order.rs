//! Orders
//!
//! A submitted cart becomes an [`Order`], which renders to the plain-text message sent over
//! the messaging deep link described by [`DeepLink`].

use std::io;

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::{
    cart::Cart,
    pricing::{PricingError, format_amount},
};

/// Errors building or dispatching an order link.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The configured provider does not form a valid URL.
    #[error("invalid order endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The channel failed to open the link.
    #[error("failed to dispatch order: {0}")]
    Dispatch(#[from] io::Error),
}

/// Fixed wording used in the order message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OrderLabels {
    /// First line of the message
    pub header: String,

    /// Label before each item's quantity
    pub quantity: String,

    /// Label before each item's line total
    pub price: String,

    /// Label before the order total
    pub total: String,

    /// Label before the delivery address
    pub address: String,
}

impl Default for OrderLabels {
    fn default() -> Self {
        Self {
            header: "Pedido:".to_string(),
            quantity: "Quantidade".to_string(),
            price: "Preço".to_string(),
            total: "Total".to_string(),
            address: "Endereço de entrega".to_string(),
        }
    }
}

/// One line of a submitted order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    /// Item name
    pub name: String,

    /// Units ordered
    pub quantity: u32,

    /// Unit price multiplied by quantity
    pub line_total: Money<'static, Currency>,
}

/// A finalized order ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    lines: Vec<OrderLine>,
    total: Money<'static, Currency>,
    address: String,
}

impl Order {
    /// Snapshot the cart contents together with the delivery address.
    ///
    /// # Errors
    ///
    /// Returns a `PricingError` if a line total or the cart total cannot be computed.
    pub fn from_cart(cart: &Cart, address: &str) -> Result<Self, PricingError> {
        let lines = cart
            .iter()
            .map(|item| {
                Ok(OrderLine {
                    name: item.name().to_string(),
                    quantity: item.quantity().get(),
                    line_total: item.subtotal()?,
                })
            })
            .collect::<Result<Vec<_>, PricingError>>()?;

        Ok(Self {
            lines,
            total: cart.total()?,
            address: address.trim().to_string(),
        })
    }

    /// Ordered lines.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Order total.
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Delivery address, trimmed.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Render the human-readable message.
    pub fn message(&self, labels: &OrderLabels) -> String {
        let currency = self.total.currency().iso_alpha_code;

        let items = self
            .lines
            .iter()
            .map(|line| {
                format!(
                    "{} - {}: {} - {}: {} {currency}",
                    line.name,
                    labels.quantity,
                    line.quantity,
                    labels.price,
                    format_amount(&line.line_total),
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{}\n{items}\n\n{}: {} {currency}\n\n{}: {}",
            labels.header,
            labels.total,
            format_amount(&self.total),
            labels.address,
            self.address,
        )
    }
}

/// Messaging deep-link endpoint, `https://<provider>/send?phone=<phone>&text=<message>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeepLink {
    /// Host of the messaging provider
    pub provider: String,

    /// Destination phone number
    pub phone: String,
}

impl Default for DeepLink {
    fn default() -> Self {
        Self {
            provider: "api.whatsapp.com".to_string(),
            phone: "842024060".to_string(),
        }
    }
}

impl DeepLink {
    /// Build the link carrying `message`, form-encoded (spaces become `+`).
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidEndpoint`] if the provider is not a valid host.
    pub fn url(&self, message: &str) -> Result<Url, OrderError> {
        let mut url = Url::parse(&format!("https://{}/send", self.provider))?;

        url.query_pairs_mut()
            .append_pair("phone", &self.phone)
            .append_pair("text", message);

        Ok(url)
    }
}

/// Destination for finalized order links.
///
/// Dispatch is fire-and-forget: failures are reported but never retried.
pub trait OrderChannel {
    /// Open `url` in a new browsing context.
    ///
    /// # Errors
    ///
    /// Returns an `OrderError` if the link could not be handed off.
    fn dispatch(&mut self, url: &Url) -> Result<(), OrderError>;
}

/// Collects dispatched links instead of opening them.
impl OrderChannel for Vec<Url> {
    fn dispatch(&mut self, url: &Url) -> Result<(), OrderError> {
        self.push(url.clone());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::MZN;
    use testresult::TestResult;

    use super::*;

    fn burger_and_fries() -> Result<Cart, crate::cart::CartError> {
        let mut cart = Cart::new(MZN);

        cart.add_item("Burger", Money::from_minor(15_000, MZN))?;
        cart.add_item("Fries", Money::from_minor(5_000, MZN))?;
        cart.add_item("Fries", Money::from_minor(5_000, MZN))?;

        Ok(cart)
    }

    #[test]
    fn from_cart_snapshots_lines_and_total() -> TestResult {
        let order = Order::from_cart(&burger_and_fries()?, "  Rua 1  ")?;

        assert_eq!(order.lines().len(), 2);
        assert_eq!(order.total(), Money::from_minor(25_000, MZN));
        assert_eq!(order.address(), "Rua 1");

        Ok(())
    }

    #[test]
    fn message_layout() -> TestResult {
        let order = Order::from_cart(&burger_and_fries()?, "Rua 1")?;

        let message = order.message(&OrderLabels::default());

        assert_eq!(
            message,
            "Pedido:\n\
             Burger - Quantidade: 1 - Preço: 150.00 MZN\n\
             Fries - Quantidade: 2 - Preço: 100.00 MZN\n\
             \n\
             Total: 250.00 MZN\n\
             \n\
             Endereço de entrega: Rua 1"
        );

        Ok(())
    }

    #[test]
    fn deep_link_encodes_message() -> TestResult {
        let url = DeepLink::default().url("Pedido:\nTotal: 1.00 MZN")?;

        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("api.whatsapp.com"));
        assert_eq!(url.path(), "/send");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(
            pairs,
            vec![
                ("phone".to_string(), "842024060".to_string()),
                ("text".to_string(), "Pedido:\nTotal: 1.00 MZN".to_string()),
            ]
        );
        assert!(!url.as_str().contains('\n'), "message must be encoded");

        Ok(())
    }

    #[test]
    fn deep_link_query_is_form_encoded() -> TestResult {
        let url = DeepLink::default().url("Pedido:\nTotal: 1.00 MZN & Preço")?;

        assert_eq!(
            url.query(),
            Some("phone=842024060&text=Pedido%3A%0ATotal%3A+1.00+MZN+%26+Pre%C3%A7o")
        );

        Ok(())
    }

    #[test]
    fn deep_link_rejects_invalid_provider() {
        let link = DeepLink {
            provider: "exa mple.com".to_string(),
            phone: "1".to_string(),
        };

        assert!(matches!(
            link.url("hi"),
            Err(OrderError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn vec_channel_collects_links() -> TestResult {
        let mut channel: Vec<Url> = Vec::new();
        let url = DeepLink::default().url("hi")?;

        channel.dispatch(&url)?;

        assert_eq!(channel, vec![url]);

        Ok(())
    }
}
