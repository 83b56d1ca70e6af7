//! Line item quantity bounded to the range the storefront sells.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`] strictly.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is outside `[Quantity::MIN, Quantity::MAX]`.
    #[error("quantity must be between {min} and {max} (got {value})")]
    OutOfRange {
        /// Rejected value.
        value: i64,
        /// Smallest allowed quantity.
        min: u32,
        /// Largest allowed quantity.
        max: u32,
    },
}

/// How many units of one line item are in the cart.
///
/// Always within `1..=10`. The lenient constructors ([`Quantity::clamped`],
/// [`Quantity::saturating_add`], [`Quantity::parse_input`]) correct
/// out-of-range input instead of failing, which is what cart mutations use.
///
/// ```
/// use falcons_nest_core::Quantity;
///
/// assert_eq!(Quantity::clamped(0).get(), 1);
/// assert_eq!(Quantity::clamped(42).get(), 10);
/// assert_eq!(Quantity::parse_input("abc").get(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Smallest quantity a line can hold.
    pub const MIN: u32 = 1;
    /// Largest quantity a line can hold.
    pub const MAX: u32 = 10;
    /// A single unit.
    pub const ONE: Self = Self(1);

    /// Create a quantity, rejecting values outside the allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::OutOfRange`] if `value` is not in `1..=10`.
    pub const fn new(value: u32) -> Result<Self, QuantityError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(QuantityError::OutOfRange {
                value: value as i64,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// Create a quantity, clamping any value into the allowed range.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(u32::try_from(bounded).unwrap_or(Self::MIN))
    }

    /// Add a (possibly negative) delta, clamping the result.
    #[must_use]
    pub fn saturating_add(self, delta: i64) -> Self {
        Self::clamped(i64::from(self.0).saturating_add(delta))
    }

    /// Interpret free-form text from a quantity field.
    ///
    /// Anything that is not a positive integer becomes one; large values are
    /// clamped to the maximum.
    #[must_use]
    pub fn parse_input(raw: &str) -> Self {
        raw.trim().parse::<i64>().map_or(Self::ONE, Self::clamped)
    }

    /// The underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
