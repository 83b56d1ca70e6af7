//! Type-safe money representation using integer minor units.
//!
//! Amounts are held as whole cents so that repeated add/remove cycles never
//! drift. [`Decimal`] is only used at the edges: parsing user input, reading
//! and writing JSON numbers, and formatting for display.
//!
//! ```
//! use falcons_nest_core::Money;
//!
//! let price: Money = "19.99".parse().unwrap();
//! assert_eq!(price.cents(), 1999);
//! assert_eq!(price.times(3).to_string(), "$59.97");
//! ```

use core::fmt;
use core::iter::Sum;
use core::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Money`] amount.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount is below zero.
    #[error("amount cannot be negative")]
    Negative,
    /// The amount is NaN or infinite.
    #[error("amount must be a finite number")]
    NotFinite,
    /// The amount does not fit in the supported range.
    #[error("amount is too large")]
    Overflow,
    /// The input is not a decimal number.
    #[error("invalid amount: {0}")]
    Invalid(String),
}

/// A non-negative amount of money in the store currency (USD).
///
/// Amounts never exceed [`Money::MAX`]; arithmetic saturates there. The cap
/// keeps every amount exactly representable as a JSON number of dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: u64,
}

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self { cents: 0 };

    /// Largest supported amount, $9,999,999,999.99.
    pub const MAX: Self = Self {
        cents: 999_999_999_999,
    };

    /// Create an amount from a number of cents, capped at [`Money::MAX`].
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self::capped(cents)
    }

    /// Create an amount from a number of cents.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if `cents` is above [`Money::MAX`].
    pub const fn try_from_cents(cents: u64) -> Result<Self, MoneyError> {
        if cents > Self::MAX.cents {
            Err(MoneyError::Overflow)
        } else {
            Ok(Self { cents })
        }
    }

    const fn capped(cents: u64) -> Self {
        if cents > Self::MAX.cents {
            Self::MAX
        } else {
            Self { cents }
        }
    }

    /// The amount in cents.
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.cents
    }

    /// Create an amount from a decimal number of dollars.
    ///
    /// Fractions of a cent are rounded half away from zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative or above [`Money::MAX`].
    pub fn from_decimal(amount: Decimal) -> Result<Self, MoneyError> {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            return Ok(Self::ZERO);
        }
        if rounded.is_sign_negative() {
            return Err(MoneyError::Negative);
        }

        let cents = rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|c| c.to_u64())
            .ok_or(MoneyError::Overflow)?;

        Self::try_from_cents(cents)
    }

    /// Create an amount from a floating point number of dollars.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not finite, negative, or too large.
    pub fn from_f64(value: f64) -> Result<Self, MoneyError> {
        if !value.is_finite() {
            return Err(MoneyError::NotFinite);
        }
        let amount = Decimal::from_f64(value).ok_or(MoneyError::Overflow)?;
        Self::from_decimal(amount)
    }

    /// The amount as a decimal number of dollars with two decimal places.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.cents), 2)
    }

    /// Multiply by a whole quantity, saturating at [`Money::MAX`].
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self::capped(self.cents.saturating_mul(quantity as u64))
    }

    /// Add two amounts, saturating at [`Money::MAX`].
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self::capped(self.cents.saturating_add(other.cents))
    }

    /// Take a fraction of this amount expressed in basis points (1/100 of a
    /// percent), rounded half up to the nearest cent.
    #[must_use]
    pub fn basis_points(self, bps: u32) -> Self {
        let scaled = (u128::from(self.cents) * u128::from(bps) + 5_000) / 10_000;
        Self::capped(u64::try_from(scaled).unwrap_or(u64::MAX))
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.cents == 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.to_decimal())
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Parse `"19.99"` or `"$19.99"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let amount =
            Decimal::from_str(digits).map_err(|_| MoneyError::Invalid(trimmed.to_owned()))?;
        Self::from_decimal(amount)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

// Stored as a plain JSON number of dollars (e.g. `19.99`). Below `MAX` the
// nearest f64 is within a tenth of a cent, so reading it back is exact.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[allow(clippy::cast_precision_loss)]
        let dollars = self.cents as f64 / 100.0;
        serializer.serialize_f64(dollars)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::from_f64(value).map_err(serde::de::Error::custom)
    }
}
