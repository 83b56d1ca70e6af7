//! Falcons Nest Storefront - cart engine for the spirit-wear shop.
//!
//! This crate holds the shopping cart behind the storefront page: the cart
//! store, its totals, its saved state and the checkout form rules. It knows
//! nothing about rendering; view layers drive a [`CartSession`] and draw from
//! [`view::CartSummary`].
//!
//! # Flow
//!
//! UI event → [`CartSession`] mutation → [`persistence`] save → totals →
//! [`view`] projection. On startup [`CartSession::open`] restores the saved
//! cart before any interaction.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod persistence;
pub mod session;
pub mod telemetry;
pub mod view;

pub use cart::{CartStore, Totals};
pub use checkout::{CheckoutPhase, ValidationError, validate};
pub use config::StoreConfig;
pub use error::{CartError, CheckoutError};
pub use persistence::{CartPersistence, FileStore, KeyValueStore, MemoryStore, StorageError};
pub use session::{CartSession, PlacedOrder, SaveStatus};
pub use view::{CartRowView, CartSummary};
