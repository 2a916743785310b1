//! Catalog
//!
//! Add-to-cart intents as emitted by menu controls, and the YAML menu the terminal front-end
//! reads them from.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::pricing::{PricingError, parse_price};

/// Errors for add-to-cart intents with malformed attributes.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// The control carries no item name, or a blank one.
    #[error("add-to-cart control has no item name")]
    MissingName,

    /// The control carries no price.
    #[error("item {0} has no price")]
    MissingPrice(String),

    /// The price attribute could not be parsed.
    #[error("item {name} has an invalid price: {source}")]
    InvalidPrice {
        /// Item name
        name: String,
        /// Parse failure
        source: PricingError,
    },
}

/// The two attributes an add-to-cart control carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddIntent {
    /// Item name attribute
    pub name: Option<String>,

    /// String-encoded decimal price attribute
    pub price: Option<String>,
}

impl AddIntent {
    /// Intent with both attributes present.
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price.into()),
        }
    }

    /// Validate the attributes into an item name and unit price.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the name is missing or blank, or the price is missing,
    /// malformed or negative.
    pub fn parse(
        &self,
        currency: &'static Currency,
    ) -> Result<(String, Money<'static, Currency>), CatalogError> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(CatalogError::MissingName)?;

        let price = self
            .price
            .as_deref()
            .ok_or_else(|| CatalogError::MissingPrice(name.to_string()))?;

        let unit_price =
            parse_price(price, currency).map_err(|source| CatalogError::InvalidPrice {
                name: name.to_string(),
                source,
            })?;

        Ok((name.to_string(), unit_price))
    }
}

/// Errors loading a menu file.
#[derive(Debug, Error)]
pub enum MenuError {
    /// IO error reading the menu file
    #[error("Failed to read menu file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Two entries share a name
    #[error("Duplicate menu item: {0}")]
    DuplicateItem(String),
}

/// A menu entry as written in the menu file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuEntry {
    /// Item name
    pub name: String,

    /// Price as written (e.g. "150.00")
    pub price: String,

    /// Optional description shown in listings
    #[serde(default)]
    pub description: Option<String>,
}

impl MenuEntry {
    /// The add-to-cart intent this entry's control emits.
    pub fn intent(&self) -> AddIntent {
        AddIntent::new(self.name.clone(), self.price.clone())
    }
}

#[derive(Debug, Deserialize)]
struct MenuFile {
    items: Vec<MenuEntry>,
}

/// Ordered menu with lookup by name.
///
/// Prices are kept as written and only validated when an item is added to the cart.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    entries: Vec<MenuEntry>,
    by_name: FxHashMap<String, usize>,
}

impl Menu {
    /// Build a menu from entries.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::DuplicateItem`] if two entries share a name.
    pub fn new(entries: Vec<MenuEntry>) -> Result<Self, MenuError> {
        let mut by_name = FxHashMap::default();

        for (idx, entry) in entries.iter().enumerate() {
            if by_name.insert(entry.name.clone(), idx).is_some() {
                return Err(MenuError::DuplicateItem(entry.name.clone()));
            }
        }

        Ok(Self { entries, by_name })
    }

    /// Parse a menu from YAML.
    ///
    /// # Errors
    ///
    /// Returns a `MenuError` if the YAML is invalid or contains duplicate names.
    pub fn from_yaml_str(contents: &str) -> Result<Self, MenuError> {
        let file: MenuFile = serde_norway::from_str(contents)?;

        Self::new(file.items)
    }

    /// Load a menu from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a `MenuError` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MenuError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Find an entry by exact name.
    pub fn get(&self, name: &str) -> Option<&MenuEntry> {
        self.by_name
            .get(name)
            .and_then(|&idx| self.entries.get(idx))
    }

    /// Find an entry by its 1-based position in the listing.
    pub fn get_position(&self, position: usize) -> Option<&MenuEntry> {
        position
            .checked_sub(1)
            .and_then(|idx| self.entries.get(idx))
    }

    /// Iterate over entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = &MenuEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the menu has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rusty_money::iso::MZN;
    use testresult::TestResult;

    use super::*;

    const MENU: &str = r#"
items:
  - name: Burger
    price: "150.00"
    description: Pão, carne e queijo
  - name: Fries
    price: "50.00"
"#;

    #[test]
    fn parse_valid_intent() -> TestResult {
        let (name, price) = AddIntent::new("Burger", "150.00").parse(MZN)?;

        assert_eq!(name, "Burger");
        assert_eq!(price, Money::from_minor(15_000, MZN));

        Ok(())
    }

    #[test]
    fn parse_trims_name() -> TestResult {
        let (name, _) = AddIntent::new("  Burger ", "1").parse(MZN)?;

        assert_eq!(name, "Burger");

        Ok(())
    }

    #[test]
    fn missing_or_blank_name_is_rejected() {
        let missing = AddIntent {
            name: None,
            price: Some("1.00".to_string()),
        };

        assert_eq!(missing.parse(MZN), Err(CatalogError::MissingName));
        assert_eq!(
            AddIntent::new("   ", "1.00").parse(MZN),
            Err(CatalogError::MissingName)
        );
    }

    #[test]
    fn missing_price_is_rejected() {
        let intent = AddIntent {
            name: Some("Burger".to_string()),
            price: None,
        };

        assert_eq!(
            intent.parse(MZN),
            Err(CatalogError::MissingPrice("Burger".to_string()))
        );
    }

    #[test]
    fn malformed_price_is_rejected() {
        assert_eq!(
            AddIntent::new("Burger", "cento e cinquenta").parse(MZN),
            Err(CatalogError::InvalidPrice {
                name: "Burger".to_string(),
                source: PricingError::Invalid("cento e cinquenta".to_string()),
            })
        );
    }

    #[test]
    fn negative_price_is_rejected() {
        assert!(matches!(
            AddIntent::new("Burger", "-1").parse(MZN),
            Err(CatalogError::InvalidPrice {
                source: PricingError::Negative(_),
                ..
            })
        ));
    }

    #[test]
    fn menu_from_yaml() -> TestResult {
        let menu = Menu::from_yaml_str(MENU)?;

        assert_eq!(menu.len(), 2);
        assert_eq!(
            menu.get("Fries").map(|entry| entry.price.as_str()),
            Some("50.00")
        );
        assert_eq!(
            menu.get_position(1).map(|entry| entry.name.as_str()),
            Some("Burger")
        );
        assert!(menu.get_position(0).is_none());
        assert!(menu.get_position(3).is_none());
        assert!(menu.get("Pizza").is_none());

        Ok(())
    }

    #[test]
    fn menu_entry_emits_intent() -> TestResult {
        let menu = Menu::from_yaml_str(MENU)?;
        let intent = menu.get("Burger").map(MenuEntry::intent);

        assert_eq!(intent, Some(AddIntent::new("Burger", "150.00")));

        Ok(())
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = Menu::from_yaml_str(
            "items:\n  - { name: Burger, price: \"1\" }\n  - { name: Burger, price: \"2\" }\n",
        );

        assert!(matches!(result, Err(MenuError::DuplicateItem(name)) if name == "Burger"));
    }

    #[test]
    fn load_reads_file() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(MENU.as_bytes())?;

        let menu = Menu::load(file.path())?;

        assert_eq!(menu.iter().count(), 2);

        Ok(())
    }

    #[test]
    fn load_missing_file_is_io_error() {
        assert!(matches!(
            Menu::load("/definitely/not/here.yml"),
            Err(MenuError::Io(_))
        ));
    }
}
