//! Falcons Nest Core - Shared cart and checkout types.
//!
//! This crate provides the domain types used across all Falcons Nest components:
//! - `storefront` - Cart store, pricing, persistence and checkout
//! - `cli` - Command-line front end for the cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure validation - no I/O, no storage
//! access, no async runtime. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtypes for money, quantities, line items, order input and
//!   order confirmations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
