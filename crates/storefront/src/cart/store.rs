//! In-memory cart store.
//!
//! Lines are kept in insertion order. Adding a product that is already in the
//! cart with the same size merges into the existing line instead of appending.

use falcons_nest_core::{ItemName, LineItem, LineKey, Money, Quantity, Size};
use tracing::debug;

use crate::error::CartError;

/// Ordered collection of cart lines with unique `(name, size)` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartStore {
    items: Vec<LineItem>,
    revision: u64,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            revision: 0,
        }
    }

    /// Build a cart from existing lines, merging any duplicate keys.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = LineItem>, revision: u64) -> Self {
        let mut store = Self::new();
        for item in items {
            store.merge_or_push(item);
        }
        store.revision = revision;
        store
    }

    /// The lines in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Mutation counter, incremented by every change.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Position of the line with the given key.
    #[must_use]
    pub fn position(&self, key: LineKey<'_>) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }

    /// Add one unit of a product.
    ///
    /// Returns the index of the line that now holds the product.
    pub fn add_item(
        &mut self,
        name: ItemName,
        unit_price: Money,
        image: impl Into<String>,
        size: Size,
    ) -> usize {
        self.add_item_with_quantity(name, unit_price, image, size, Quantity::ONE)
    }

    /// Add `quantity` units of a product.
    ///
    /// If a line with the same name and size exists its quantity grows by
    /// `quantity`, capped at [`Quantity::MAX`]. The existing line keeps its
    /// price and image.
    ///
    /// Returns the index of the line that now holds the product.
    pub fn add_item_with_quantity(
        &mut self,
        name: ItemName,
        unit_price: Money,
        image: impl Into<String>,
        size: Size,
        quantity: Quantity,
    ) -> usize {
        let index = self.merge_or_push(LineItem::new(name, unit_price, image, size, quantity));
        self.bump();
        index
    }

    /// Replace the quantity of the line at `index`.
    ///
    /// Values below one become one and values above the maximum are capped.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no line at `index`.
    pub fn set_quantity(&mut self, index: usize, new_quantity: i64) -> Result<Quantity, CartError> {
        let line = self.line_mut(index)?;
        line.quantity = Quantity::clamped(new_quantity);
        let quantity = line.quantity;
        debug!(index, requested = new_quantity, %quantity, "Set cart line quantity");
        self.bump();
        Ok(quantity)
    }

    /// Replace the quantity of the line at `index` from raw field text.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no line at `index`.
    pub fn set_quantity_from_input(
        &mut self,
        index: usize,
        raw: &str,
    ) -> Result<Quantity, CartError> {
        let line = self.line_mut(index)?;
        line.quantity = Quantity::parse_input(raw);
        let quantity = line.quantity;
        debug!(index, raw, %quantity, "Set cart line quantity from input");
        self.bump();
        Ok(quantity)
    }

    /// Add `delta` to the quantity of the line at `index`, never going below one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no line at `index`.
    pub fn adjust_quantity(&mut self, index: usize, delta: i64) -> Result<Quantity, CartError> {
        let line = self.line_mut(index)?;
        line.quantity = line.quantity.saturating_add(delta);
        let quantity = line.quantity;
        debug!(index, delta, %quantity, "Adjusted cart line quantity");
        self.bump();
        Ok(quantity)
    }

    /// Remove the line at `index`, shifting later lines down by one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no line at `index`.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, CartError> {
        if index >= self.items.len() {
            return Err(CartError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let removed = self.items.remove(index);
        debug!(index, name = %removed.name, size = %removed.size, "Removed cart line");
        self.bump();
        Ok(removed)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
        debug!("Cleared cart");
        self.bump();
    }

    /// Total units across all lines (the cart badge count).
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.items
            .iter()
            .map(|item| item.quantity.get())
            .fold(0, u32::saturating_add)
    }

    fn merge_or_push(&mut self, item: LineItem) -> usize {
        if let Some(index) = self.position(item.key()) {
            if let Some(existing) = self.items.get_mut(index) {
                let requested = i64::from(existing.quantity.get()) + i64::from(item.quantity.get());
                existing.quantity = Quantity::clamped(requested);
                debug!(
                    index,
                    name = %existing.name,
                    size = %existing.size,
                    quantity = %existing.quantity,
                    capped = requested > i64::from(Quantity::MAX),
                    "Merged into existing cart line"
                );
            }
            return index;
        }

        debug!(
            index = self.items.len(),
            name = %item.name,
            size = %item.size,
            quantity = %item.quantity,
            "Appended cart line"
        );
        self.items.push(item);
        self.items.len() - 1
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut LineItem, CartError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(CartError::IndexOutOfRange { index, len })
    }

    const fn bump(&mut self) {
        self.revision = self.revision.saturating_add(1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn name(s: &str) -> ItemName {
        ItemName::parse(s).unwrap()
    }

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    fn sample_cart() -> CartStore {
        let mut cart = CartStore::new();
        cart.add_item(name("Hoodie"), Money::from_cents(3500), "h.png", Size::new("M"));
        cart.add_item(name("Cap"), Money::from_cents(1500), "c.png", Size::none());
        cart.add_item(name("Tee"), Money::from_cents(2000), "t.png", Size::new("L"));
        cart
    }

    #[test]
    fn test_add_same_key_merges() {
        let mut cart = CartStore::new();
        let first = cart.add_item_with_quantity(
            name("Hoodie"),
            Money::from_cents(3500),
            "h.png",
            Size::new("M"),
            qty(2),
        );
        let second = cart.add_item_with_quantity(
            name("Hoodie"),
            Money::from_cents(3500),
            "h.png",
            Size::new("M"),
            qty(3),
        );

        assert_eq!(first, second);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0).unwrap().quantity.get(), 5);
    }

    #[test]
    fn test_add_same_name_different_size_appends() {
        let mut cart = CartStore::new();
        cart.add_item(name("Hoodie"), Money::from_cents(3500), "h.png", Size::new("M"));
        cart.add_item(name("Hoodie"), Money::from_cents(3500), "h.png", Size::new("L"));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(0).unwrap().size.as_str(), "M");
        assert_eq!(cart.get(1).unwrap().size.as_str(), "L");
    }

    #[test]
    fn test_merge_caps_at_max() {
        let mut cart = CartStore::new();
        for _ in 0..3 {
            cart.add_item_with_quantity(
                name("Hoodie"),
                Money::from_cents(3500),
                "h.png",
                Size::new("M"),
                qty(4),
            );
        }
        assert_eq!(cart.get(0).unwrap().quantity.get(), Quantity::MAX);
    }

    #[test]
    fn test_merge_keeps_first_price() {
        let mut cart = CartStore::new();
        cart.add_item(name("Hoodie"), Money::from_cents(3500), "h.png", Size::new("M"));
        cart.add_item(name("Hoodie"), Money::from_cents(9900), "other.png", Size::new("M"));

        let line = cart.get(0).unwrap();
        assert_eq!(line.unit_price.cents(), 3500);
        assert_eq!(line.image, "h.png");
    }

    #[test]
    fn test_set_quantity_coerces_non_positive() {
        let mut cart = sample_cart();
        assert_eq!(cart.set_quantity(1, 0).unwrap().get(), 1);
        assert_eq!(cart.set_quantity(1, -4).unwrap().get(), 1);
        assert_eq!(cart.set_quantity(1, 6).unwrap().get(), 6);
        assert_eq!(cart.set_quantity(1, 50).unwrap().get(), 10);
    }

    #[test]
    fn test_set_quantity_from_input() {
        let mut cart = sample_cart();
        assert_eq!(cart.set_quantity_from_input(0, "7").unwrap().get(), 7);
        assert_eq!(cart.set_quantity_from_input(0, "seven").unwrap().get(), 1);
    }

    #[test]
    fn test_set_quantity_out_of_range() {
        let mut cart = sample_cart();
        let before = cart.clone();
        let err = cart.set_quantity(3, 2).unwrap_err();
        assert_eq!(err, CartError::IndexOutOfRange { index: 3, len: 3 });
        assert_eq!(cart, before);
    }

    #[test]
    fn test_adjust_quantity_floors_at_one() {
        let mut cart = sample_cart();
        assert_eq!(cart.adjust_quantity(0, 1).unwrap().get(), 2);
        assert_eq!(cart.adjust_quantity(0, -100).unwrap().get(), 1);
    }

    #[test]
    fn test_adjust_quantity_out_of_range() {
        let mut cart = CartStore::new();
        assert!(matches!(
            cart.adjust_quantity(0, 1),
            Err(CartError::IndexOutOfRange { index: 0, len: 0 })
        ));
        assert_eq!(cart.revision(), 0);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut cart = sample_cart();
        let removed = cart.remove_item(1).unwrap();

        assert_eq!(removed.name.as_str(), "Cap");
        assert_eq!(cart.len(), 2);
        let names: Vec<&str> = cart.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Hoodie", "Tee"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut cart = sample_cart();
        assert!(matches!(
            cart.remove_item(9),
            Err(CartError::IndexOutOfRange { index: 9, len: 3 })
        ));
        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn test_clear_and_count() {
        let mut cart = sample_cart();
        cart.adjust_quantity(2, 3).unwrap();
        assert_eq!(cart.total_item_count(), 6);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn test_revision_increments_per_mutation() {
        let mut cart = sample_cart();
        assert_eq!(cart.revision(), 3);
        cart.adjust_quantity(0, 1).unwrap();
        cart.remove_item(0).unwrap();
        cart.clear();
        assert_eq!(cart.revision(), 6);
    }

    #[test]
    fn test_from_items_merges_duplicates() {
        let line = |size: &str, n: u32| {
            LineItem::new(name("Tee"), Money::from_cents(2000), "t.png", Size::new(size), qty(n))
        };
        let cart = CartStore::from_items([line("S", 2), line("M", 1), line("S", 9)], 12);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(0).unwrap().quantity.get(), 10);
        assert_eq!(cart.revision(), 12);
    }
}
