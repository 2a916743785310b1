//! Store configuration
//!
//! Everything the original page hard-coded: currency, opening hours, the order endpoint,
//! user-facing texts and the cosmetic timings. Every field has a default, so an empty YAML
//! document yields the stock configuration.

use std::{fs, path::Path, time::Duration};

use rusty_money::iso::{self, Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    hours::{HoursError, OpeningHours},
    order::{DeepLink, OrderError, OrderLabels},
};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid opening hours
    #[error(transparent)]
    Hours(#[from] HoursError),

    /// The order endpoint does not form a valid URL
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The destination phone number is blank
    #[error("order channel phone number is empty")]
    MissingPhone,
}

/// Currency of the cart, deserialized from its ISO code.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct CurrencyCode(&'static Currency);

impl CurrencyCode {
    /// The resolved currency.
    pub fn currency(self) -> &'static Currency {
        self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self(iso::MZN)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = String;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        let currency = match code.trim() {
            "MZN" => iso::MZN,
            "ZAR" => iso::ZAR,
            "USD" => iso::USD,
            "EUR" => iso::EUR,
            "GBP" => iso::GBP,
            other => return Err(format!("Unknown currency code: {other}")),
        };

        Ok(Self(currency))
    }
}

/// User-facing texts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Prompt shown when checking out an empty cart
    pub empty_cart: String,

    /// Notification shown when checking out while closed
    pub restaurant_closed: String,

    /// Warning shown next to a blank address field
    pub missing_address: String,

    /// Status indicator text while open
    pub open_status: String,

    /// Status indicator text while closed
    pub closed_status: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            empty_cart: "Adicione itens ao carrinho antes de finalizar o pedido.".to_string(),
            restaurant_closed: "O restaurante está fechado".to_string(),
            missing_address: "Digite seu endereço completo!".to_string(),
            open_status: "ABERTO".to_string(),
            closed_status: "FECHADO".to_string(),
        }
    }
}

/// Durations of transient presentation effects, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// How long the closed notification stays visible
    pub closed_notification_ms: u64,

    /// How long the attention animation runs
    pub attention_ms: u64,
}

impl Timings {
    /// Closed notification lifetime.
    pub fn closed_notification(&self) -> Duration {
        Duration::from_millis(self.closed_notification_ms)
    }

    /// Attention animation length.
    pub fn attention(&self) -> Duration {
        Duration::from_millis(self.attention_ms)
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            closed_notification_ms: 3_000,
            attention_ms: 500,
        }
    }
}

/// Store configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Cart currency
    pub currency: CurrencyCode,

    /// Daily opening window
    pub opening_hours: OpeningHours,

    /// Messaging endpoint orders are sent to
    pub order_channel: DeepLink,

    /// Wording of the order message
    pub order_labels: OrderLabels,

    /// User-facing texts
    pub messages: Messages,

    /// Durations of transient effects
    pub timings: Timings,
}

impl StoreConfig {
    /// Parse and validate configuration from YAML.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the YAML is invalid or fails validation.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig = serde_norway::from_str(contents)?;
        config.validate()?;

        Ok(config)
    }

    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Check the opening hours and order endpoint.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.opening_hours.validate()?;

        if self.order_channel.phone.trim().is_empty() {
            return Err(ConfigError::MissingPhone);
        }

        self.order_channel.url("")?;

        Ok(())
    }

    /// Cart currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency.currency()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() -> TestResult {
        let config = StoreConfig::from_yaml_str("{}")?;

        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.currency(), iso::MZN);
        assert_eq!(config.opening_hours, OpeningHours::default());
        assert_eq!(config.order_channel.phone, "842024060");
        assert_eq!(config.timings.closed_notification(), Duration::from_secs(3));
        assert_eq!(config.timings.attention(), Duration::from_millis(500));

        Ok(())
    }

    #[test]
    fn partial_overrides_keep_other_defaults() -> TestResult {
        let config = StoreConfig::from_yaml_str(
            r"
currency: ZAR
opening_hours:
  opens: 10
order_channel:
  phone: '258840000000'
messages:
  open_status: OPEN
",
        )?;

        assert_eq!(config.currency(), iso::ZAR);
        assert_eq!(config.opening_hours.opens(), 10);
        assert_eq!(config.opening_hours.closes(), 22);
        assert_eq!(config.order_channel.provider, "api.whatsapp.com");
        assert_eq!(config.order_channel.phone, "258840000000");
        assert_eq!(config.messages.open_status, "OPEN");
        assert_eq!(config.messages.closed_status, "FECHADO");

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() {
        assert!(matches!(
            StoreConfig::from_yaml_str("currency: XYZ"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn inverted_hours_are_rejected() {
        assert!(matches!(
            StoreConfig::from_yaml_str("opening_hours: { opens: 22, closes: 8 }"),
            Err(ConfigError::Hours(HoursError::Inverted { .. }))
        ));
    }

    #[test]
    fn blank_phone_is_rejected() {
        assert!(matches!(
            StoreConfig::from_yaml_str("order_channel: { phone: '  ' }"),
            Err(ConfigError::MissingPhone)
        ));
    }

    #[test]
    fn invalid_provider_is_rejected() {
        assert!(matches!(
            StoreConfig::from_yaml_str("order_channel: { provider: 'not a host' }"),
            Err(ConfigError::Order(OrderError::InvalidEndpoint(_)))
        ));
    }

    #[test]
    fn load_reads_file() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"timings: { attention_ms: 250 }\n")?;

        let config = StoreConfig::load(file.path())?;

        assert_eq!(config.timings.attention(), Duration::from_millis(250));
        assert_eq!(config.timings.closed_notification_ms, 3_000);

        Ok(())
    }
}
