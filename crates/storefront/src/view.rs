//! Render-ready cart data.
//!
//! The cart page, the mini cart and the CLI all draw from the same projection.
//! Nothing here renders; values are pre-formatted strings so templates stay
//! dumb.

use falcons_nest_core::LineItem;
use serde::Serialize;

use crate::cart::{CartStore, Totals};

/// One row of the cart table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartRowView {
    /// Position used by quantity and remove controls.
    pub index: usize,
    pub name: String,
    /// Size line, hidden for unsized items.
    pub size_label: Option<String>,
    pub image: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Cart summary for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub rows: Vec<CartRowView>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    /// Badge count.
    pub item_count: u32,
    pub is_empty: bool,
}

impl CartSummary {
    /// Summary of an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_parts(&[], Totals::default(), 0)
    }

    fn from_parts(items: &[LineItem], totals: Totals, item_count: u32) -> Self {
        Self {
            rows: items
                .iter()
                .enumerate()
                .map(|(index, item)| CartRowView::from_item(index, item))
                .collect(),
            subtotal: totals.subtotal.to_string(),
            tax: totals.tax.to_string(),
            total: totals.total.to_string(),
            item_count,
            is_empty: items.is_empty(),
        }
    }
}

impl CartRowView {
    fn from_item(index: usize, item: &LineItem) -> Self {
        Self {
            index,
            name: item.name.to_string(),
            size_label: item.size.label().map(str::to_owned),
            image: item.image.clone(),
            unit_price: item.unit_price.to_string(),
            quantity: item.quantity.get(),
            line_total: item.line_total().to_string(),
        }
    }
}

impl From<&CartStore> for CartSummary {
    fn from(cart: &CartStore) -> Self {
        Self::from_parts(cart.items(), cart.compute_totals(), cart.total_item_count())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use falcons_nest_core::{ItemName, Money, Quantity, Size};

    use super::*;

    #[test]
    fn test_empty_summary() {
        let summary = CartSummary::empty();
        assert!(summary.is_empty);
        assert!(summary.rows.is_empty());
        assert_eq!(summary.total, "$0.00");
        assert_eq!(summary, CartSummary::from(&CartStore::new()));
    }

    #[test]
    fn test_summary_rows_and_totals() {
        let mut cart = CartStore::new();
        cart.add_item_with_quantity(
            ItemName::parse("Falcons Tee").unwrap(),
            Money::from_cents(2000),
            "tee.png",
            Size::new("L"),
            Quantity::new(2).unwrap(),
        );
        cart.add_item_with_quantity(
            ItemName::parse("Sticker Pack").unwrap(),
            Money::from_cents(500),
            "stickers.png",
            Size::none(),
            Quantity::new(3).unwrap(),
        );

        let summary = CartSummary::from(&cart);
        assert!(!summary.is_empty);
        assert_eq!(summary.item_count, 5);
        assert_eq!(summary.subtotal, "$55.00");
        assert_eq!(summary.tax, "$1.65");
        assert_eq!(summary.total, "$56.65");

        let tee = summary.rows.first().unwrap();
        assert_eq!(tee.index, 0);
        assert_eq!(tee.size_label.as_deref(), Some("L"));
        assert_eq!(tee.unit_price, "$20.00");
        assert_eq!(tee.line_total, "$40.00");

        let stickers = summary.rows.get(1).unwrap();
        assert_eq!(stickers.index, 1);
        assert_eq!(stickers.size_label, None);
        assert_eq!(stickers.quantity, 3);
    }
}
