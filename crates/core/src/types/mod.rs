//! Core types for Falcons Nest.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod item;
pub mod money;
pub mod order;
pub mod quantity;

pub use item::{ItemName, ItemNameError, LineItem, LineKey, Size};
pub use money::{Money, MoneyError};
pub use order::{OrderConfirmation, OrderInput, PaymentMethod, PaymentMethodError};
pub use quantity::{Quantity, QuantityError};
