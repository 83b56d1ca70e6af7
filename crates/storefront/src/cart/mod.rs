//! Cart state and derived totals.

pub mod pricing;
pub mod store;

pub use pricing::{TAX_RATE_BASIS_POINTS, Totals, compute_totals};
pub use store::CartStore;
