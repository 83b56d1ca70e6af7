//! Cart line items and their identity.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Money, Quantity};

/// Errors that can occur when parsing an [`ItemName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemNameError {
    /// The input is empty or only whitespace.
    #[error("item name cannot be empty")]
    Empty,
}

/// Display name of a product, e.g. `"Falcons Hoodie"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    /// Parse an `ItemName`, rejecting blank input.
    ///
    /// # Errors
    ///
    /// Returns [`ItemNameError::Empty`] if the input has no visible characters.
    pub fn parse(s: &str) -> Result<Self, ItemNameError> {
        if s.trim().is_empty() {
            return Err(ItemNameError::Empty);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemName {
    type Error = ItemNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(ItemNameError::Empty);
        }
        Ok(Self(value))
    }
}

impl From<ItemName> for String {
    fn from(name: ItemName) -> Self {
        name.0
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Garment size chosen for a line (`"S"`, `"M"`, `"XL"`, ...).
///
/// Items without sizes (mugs, stickers) use an empty size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Size(String);

impl Size {
    /// Create a size from any string.
    #[must_use]
    pub fn new(size: impl Into<String>) -> Self {
        Self(size.into())
    }

    /// A size for items that are not sized.
    #[must_use]
    pub const fn none() -> Self {
        Self(String::new())
    }

    /// Returns the size as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The size to show next to the item, if any.
    ///
    /// Older saved carts wrote the literal `"undefined"` for unsized items.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self.0.as_str() {
            "" | "undefined" => None,
            size => Some(size),
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a cart line: two additions with the same key merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey<'a> {
    /// Product name.
    pub name: &'a str,
    /// Selected size.
    pub size: &'a str,
}

/// One product/size combination in the cart.
///
/// Field names on the wire match the storefront's saved cart layout
/// (`name`, `price`, `image`, `quantity`, `size`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name.
    pub name: ItemName,
    /// Price of a single unit.
    #[serde(rename = "price")]
    pub unit_price: Money,
    /// Opaque display reference (emoji, URL or asset key).
    pub image: String,
    /// Number of units.
    pub quantity: Quantity,
    /// Selected size.
    pub size: Size,
}

impl LineItem {
    /// Create a new line item.
    #[must_use]
    pub fn new(
        name: ItemName,
        unit_price: Money,
        image: impl Into<String>,
        size: Size,
        quantity: Quantity,
    ) -> Self {
        Self {
            name,
            unit_price,
            image: image.into(),
            quantity,
            size,
        }
    }

    /// The `(name, size)` identity of this line.
    #[must_use]
    pub fn key(&self) -> LineKey<'_> {
        LineKey {
            name: self.name.as_str(),
            size: self.size.as_str(),
        }
    }

    /// Price of all units on this line.
    #[must_use]
    pub const fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity.get())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn hoodie(size: &str, quantity: u32) -> LineItem {
        LineItem::new(
            ItemName::parse("Falcons Hoodie").unwrap(),
            Money::from_cents(3500),
            "hoodie.png",
            Size::new(size),
            Quantity::new(quantity).unwrap(),
        )
    }

    #[test]
    fn test_item_name_rejects_blank() {
        assert_eq!(ItemName::parse(""), Err(ItemNameError::Empty));
        assert_eq!(ItemName::parse("   "), Err(ItemNameError::Empty));
        assert_eq!(ItemName::parse("Mug").unwrap().as_str(), "Mug");
    }

    #[test]
    fn test_item_name_deserialize_rejects_blank() {
        assert!(serde_json::from_str::<ItemName>("\"\"").is_err());
    }

    #[test]
    fn test_size_label() {
        assert_eq!(Size::new("M").label(), Some("M"));
        assert_eq!(Size::none().label(), None);
        assert_eq!(Size::new("undefined").label(), None);
    }

    #[test]
    fn test_key_distinguishes_sizes() {
        let medium = hoodie("M", 1);
        let large = hoodie("L", 1);
        assert_ne!(medium.key(), large.key());
        assert_eq!(medium.key(), hoodie("M", 4).key());
    }

    #[test]
    fn test_line_total() {
        assert_eq!(hoodie("M", 3).line_total().cents(), 10_500);
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(hoodie("S", 2)).unwrap();
        assert_eq!(json["name"], "Falcons Hoodie");
        assert_eq!(json["price"], 35.0);
        assert_eq!(json["image"], "hoodie.png");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["size"], "S");
    }
}
