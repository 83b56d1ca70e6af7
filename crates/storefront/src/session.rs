//! Cart session: the object the view layer talks to.
//!
//! A session owns the cart, the persistence slot and the checkout phase.
//! Every mutation is applied in memory first, then saved before the method
//! returns, so saves land in mutation order. A failed save does not undo the
//! mutation; it is logged and reported as [`SaveStatus::Unsaved`].

use falcons_nest_core::{ItemName, LineItem, Money, OrderConfirmation, OrderInput, Quantity, Size};
use tracing::{info, instrument, warn};

use crate::cart::{CartStore, Totals};
use crate::checkout::{self, CheckoutPhase};
use crate::error::{CartError, CheckoutError};
use crate::persistence::{CartPersistence, KeyValueStore, StorageError};
use crate::view::CartSummary;

/// Outcome of writing the cart after a mutation.
#[must_use = "a failed save should be surfaced to the buyer as a warning"]
#[derive(Debug)]
pub enum SaveStatus {
    /// The cart was written to storage.
    Saved,
    /// The change applies in memory but was not written.
    Unsaved(StorageError),
}

impl SaveStatus {
    /// Returns `true` if the cart was written.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }

    /// The storage error, if the save failed.
    #[must_use]
    pub const fn warning(&self) -> Option<&StorageError> {
        match self {
            Self::Saved => None,
            Self::Unsaved(e) => Some(e),
        }
    }
}

/// A successfully placed order.
#[derive(Debug)]
pub struct PlacedOrder {
    pub confirmation: OrderConfirmation,
    /// Whether the emptied cart was written.
    pub save_status: SaveStatus,
}

/// A shopper's cart bound to its persistence slot.
#[derive(Debug)]
pub struct CartSession<S> {
    cart: CartStore,
    persistence: CartPersistence<S>,
    phase: CheckoutPhase,
}

impl<S: KeyValueStore> CartSession<S> {
    /// Restore the saved cart and start a session.
    pub async fn open(persistence: CartPersistence<S>) -> Self {
        let cart = persistence.load().await;
        info!(
            key = persistence.key(),
            lines = cart.len(),
            items = cart.total_item_count(),
            "Cart session opened"
        );
        Self {
            cart,
            persistence,
            phase: CheckoutPhase::Editing,
        }
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The cart lines in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Where the current order is in checkout.
    #[must_use]
    pub const fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    /// The persistence slot backing this session.
    #[must_use]
    pub const fn persistence(&self) -> &CartPersistence<S> {
        &self.persistence
    }

    /// Add one unit of a product and save.
    #[instrument(skip_all, fields(name = %name, size = %size))]
    pub async fn add_item(
        &mut self,
        name: ItemName,
        unit_price: Money,
        image: impl Into<String> + Send,
        size: Size,
    ) -> SaveStatus {
        self.add_item_with_quantity(name, unit_price, image, size, Quantity::ONE)
            .await
    }

    /// Add `quantity` units of a product and save.
    #[instrument(skip_all, fields(name = %name, size = %size, quantity = %quantity))]
    pub async fn add_item_with_quantity(
        &mut self,
        name: ItemName,
        unit_price: Money,
        image: impl Into<String> + Send,
        size: Size,
        quantity: Quantity,
    ) -> SaveStatus {
        self.begin_editing();
        self.cart.add_item_with_quantity(name, unit_price, image, size, quantity);
        self.persist().await
    }

    /// Set the quantity of the line at `index` and save.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no line at `index`;
    /// nothing is changed or saved in that case.
    #[instrument(skip(self))]
    pub async fn set_quantity(
        &mut self,
        index: usize,
        new_quantity: i64,
    ) -> Result<SaveStatus, CartError> {
        self.cart.set_quantity(index, new_quantity)?;
        self.begin_editing();
        Ok(self.persist().await)
    }

    /// Set the quantity of the line at `index` from raw field text and save.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no line at `index`.
    #[instrument(skip(self))]
    pub async fn set_quantity_from_input(
        &mut self,
        index: usize,
        raw: &str,
    ) -> Result<SaveStatus, CartError> {
        self.cart.set_quantity_from_input(index, raw)?;
        self.begin_editing();
        Ok(self.persist().await)
    }

    /// Step the quantity of the line at `index` by `delta` and save.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no line at `index`.
    #[instrument(skip(self))]
    pub async fn adjust_quantity(
        &mut self,
        index: usize,
        delta: i64,
    ) -> Result<SaveStatus, CartError> {
        self.cart.adjust_quantity(index, delta)?;
        self.begin_editing();
        Ok(self.persist().await)
    }

    /// Remove the line at `index` and save.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] if there is no line at `index`.
    #[instrument(skip(self))]
    pub async fn remove_item(&mut self, index: usize) -> Result<SaveStatus, CartError> {
        self.cart.remove_item(index)?;
        self.begin_editing();
        Ok(self.persist().await)
    }

    /// Empty the cart and save.
    #[instrument(skip(self))]
    pub async fn clear(&mut self) -> SaveStatus {
        self.cart.clear();
        self.begin_editing();
        self.persist().await
    }

    /// Total units in the cart (badge count).
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.cart.total_item_count()
    }

    /// Subtotal, tax and total of the current cart.
    #[must_use]
    pub fn compute_totals(&self) -> Totals {
        self.cart.compute_totals()
    }

    /// Render-ready summary of the current cart.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::from(&self.cart)
    }

    /// Submit the checkout form.
    ///
    /// On success the cart is emptied and saved, and the phase becomes
    /// [`CheckoutPhase::OrderPlaced`]. On a validation failure the cart is
    /// untouched and the phase becomes [`CheckoutPhase::Rejected`].
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Rejected`] if the form fails validation. The form is
    ///   checked first, so an incomplete form is rejected even on an empty cart.
    /// - [`CheckoutError::EmptyCart`] if the form is valid but there is nothing
    ///   to order.
    #[instrument(skip_all, fields(lines = self.cart.len()))]
    pub async fn place_order(&mut self, input: &OrderInput) -> Result<PlacedOrder, CheckoutError> {
        let payment_method = match checkout::validate(input) {
            Ok(method) => method,
            Err(reason) => {
                info!(%reason, "Checkout rejected");
                self.phase = CheckoutPhase::Rejected(reason);
                return Err(reason.into());
            }
        };

        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let totals = self.cart.compute_totals();
        let confirmation =
            OrderConfirmation::new(self.cart.total_item_count(), totals.total, payment_method);

        self.cart.clear();
        let save_status = self.persist().await;
        self.phase = CheckoutPhase::OrderPlaced(confirmation.clone());

        info!(
            order_id = %confirmation.order_id,
            total = %confirmation.total,
            items = confirmation.item_count,
            payment_method = %payment_method,
            "Order placed"
        );

        Ok(PlacedOrder {
            confirmation,
            save_status,
        })
    }

    fn begin_editing(&mut self) {
        if !matches!(self.phase, CheckoutPhase::Editing) {
            self.phase = CheckoutPhase::Editing;
        }
    }

    async fn persist(&self) -> SaveStatus {
        match self.persistence.save(&self.cart).await {
            Ok(()) => SaveStatus::Saved,
            Err(e) => {
                warn!(error = %e, "Cart change not saved; keeping in-memory cart");
                SaveStatus::Unsaved(e)
            }
        }
    }
}
