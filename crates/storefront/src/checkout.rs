//! Checkout form validation and the checkout state machine.
//!
//! ```text
//! Editing ──submit──▶ Validating ──▶ Rejected(reason) ──edit/resubmit──▶ ...
//!                                └─▶ Accepted ──▶ OrderPlaced (cart cleared)
//! ```
//!
//! `Validating` and `Accepted` are instantaneous inside
//! [`crate::CartSession::place_order`] and are never observed from outside.
//! `OrderPlaced` is terminal for that order; the next cart change starts a new
//! order in `Editing`.

use falcons_nest_core::{OrderConfirmation, OrderInput, PaymentMethod};
use secrecy::ExposeSecret;
use thiserror::Error;

/// Why a checkout form was rejected.
///
/// Messages are meant to be shown to the buyer as-is.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationError {
    #[error("Please complete all required fields.")]
    MissingContactInfo,
    #[error("Please select a payment method.")]
    NoPaymentMethodSelected,
    #[error("Please enter your Student ID number.")]
    MissingStudentId,
    #[error("Please complete all credit card fields.")]
    MissingCardFields,
}

/// Check a checkout form. The first failing rule wins.
///
/// 1. First name, last name and email are filled in.
/// 2. A payment method is selected.
/// 3. Student-ID payment has a student ID.
/// 4. Card payment has card number, expiry date and CVV.
///
/// Fields holding only whitespace count as empty. Card details are checked
/// for presence only.
///
/// # Errors
///
/// Returns the [`ValidationError`] for the first rule that fails.
pub fn validate(input: &OrderInput) -> Result<PaymentMethod, ValidationError> {
    if [&input.first_name, &input.last_name, &input.email]
        .into_iter()
        .any(|field| is_blank(field))
    {
        return Err(ValidationError::MissingContactInfo);
    }

    let method = input
        .payment_method
        .ok_or(ValidationError::NoPaymentMethodSelected)?;

    match method {
        PaymentMethod::StudentId if is_blank(&input.student_id) => {
            Err(ValidationError::MissingStudentId)
        }
        PaymentMethod::CreditCard
            if is_blank(input.card_number.expose_secret())
                || is_blank(&input.expiry_date)
                || is_blank(input.cvv.expose_secret()) =>
        {
            Err(ValidationError::MissingCardFields)
        }
        _ => Ok(method),
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Where the current order is in checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutPhase {
    /// The buyer is building the cart.
    #[default]
    Editing,
    /// The last submission failed; the buyer keeps editing.
    Rejected(ValidationError),
    /// The order went through and the cart was emptied.
    OrderPlaced(OrderConfirmation),
}

impl CheckoutPhase {
    /// Returns `true` while the order can still be changed and submitted.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self, Self::Editing | Self::Rejected(_))
    }

    /// The reason the last submission was rejected, if it was.
    #[must_use]
    pub const fn rejection(&self) -> Option<ValidationError> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }

    /// The confirmation of the placed order, if any.
    #[must_use]
    pub const fn confirmation(&self) -> Option<&OrderConfirmation> {
        match self {
            Self::OrderPlaced(confirmation) => Some(confirmation),
            _ => None,
        }
    }
}
