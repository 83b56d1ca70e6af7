//! Command implementations.

pub mod cart;
pub mod checkout;

use falcons_nest_core::{ItemNameError, MoneyError, QuantityError};
use falcons_nest_storefront::{
    CartError, CartPersistence, CartSession, CheckoutError, FileStore, SaveStatus, StoreConfig,
};
use thiserror::Error;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Product name was blank.
    #[error("Invalid product name: {0}")]
    InvalidName(#[from] ItemNameError),

    /// Price could not be read.
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] MoneyError),

    /// Quantity outside the allowed range.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),

    /// No cart line at the given position.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Order could not be placed.
    #[error("Checkout failed: {0}")]
    Checkout(#[from] CheckoutError),

    /// Summary could not be encoded.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Open the saved cart described by `config`.
pub async fn open_session(config: &StoreConfig) -> CartSession<FileStore> {
    tracing::debug!(dir = %config.data_dir.display(), key = %config.cart_key, "Opening cart");
    let persistence = CartPersistence::with_key(config.file_store(), config.cart_key.clone());
    CartSession::open(persistence).await
}

/// Surface a failed save; the change still applies for this run.
fn report_save(status: &SaveStatus) {
    if let Some(e) = status.warning() {
        tracing::warn!("Cart updated but not saved: {e}");
    }
}
