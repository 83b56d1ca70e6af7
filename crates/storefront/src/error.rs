//! Errors returned by cart and checkout operations.
//!
//! Storage failures are not part of these types: a failed save never rejects a
//! mutation and is reported through [`crate::session::SaveStatus`] instead.

use thiserror::Error;

use crate::checkout::ValidationError;

/// A cart mutation that could not be applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The mutation named a line position that does not exist.
    #[error("no cart line at index {index} (cart has {len} lines)")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of lines in the cart.
        len: usize,
    },
}

/// An order that could not be placed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing in the cart to order.
    #[error("cannot place an order with an empty cart")]
    EmptyCart,

    /// The checkout form failed validation.
    #[error(transparent)]
    Rejected(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "no cart line at index 4 (cart has 2 lines)");
    }

    #[test]
    fn test_checkout_error_shows_validation_message() {
        let err = CheckoutError::from(ValidationError::MissingStudentId);
        assert_eq!(err.to_string(), "Please enter your Student ID number.");
        assert_eq!(
            CheckoutError::EmptyCart.to_string(),
            "cannot place an order with an empty cart"
        );
    }
}
