//! Cart totals.
//!
//! Totals are derived on demand from the current lines and never cached.
//! All arithmetic is in whole cents; tax is rounded to the cent before it is
//! added to the subtotal so the three displayed figures always add up.

use falcons_nest_core::{LineItem, Money};
use serde::Serialize;

use super::CartStore;

/// Flat sales tax applied to every order, in basis points (3%).
pub const TAX_RATE_BASIS_POINTS: u32 = 300;

/// Subtotal, tax and grand total of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    /// Sum of every line's price times quantity.
    pub subtotal: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Subtotal plus tax.
    pub total: Money,
}

/// Compute totals for a list of lines.
#[must_use]
pub fn compute_totals(items: &[LineItem]) -> Totals {
    let subtotal: Money = items.iter().map(LineItem::line_total).sum();
    let tax = subtotal.basis_points(TAX_RATE_BASIS_POINTS);

    Totals {
        subtotal,
        tax,
        total: subtotal.saturating_add(tax),
    }
}

impl CartStore {
    /// Compute totals for the current lines.
    #[must_use]
    pub fn compute_totals(&self) -> Totals {
        compute_totals(self.items())
    }
}
