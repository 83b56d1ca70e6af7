//! Checkout form input and order confirmation.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Money;

/// Errors that can occur when parsing a [`PaymentMethod`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethodError {
    /// The input does not name a known payment method.
    #[error("unknown payment method: {0} (expected student-id, credit-card or other)")]
    Unknown(String),
}

/// How the buyer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Charge to the student account.
    StudentId,
    /// Pay by card.
    CreditCard,
    /// Cash or pay at pickup.
    Other,
}

impl PaymentMethod {
    /// The form value for this method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StudentId => "student-id",
            Self::CreditCard => "credit-card",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student-id" => Ok(Self::StudentId),
            "credit-card" => Ok(Self::CreditCard),
            "other" => Ok(Self::Other),
            _ => Err(PaymentMethodError::Unknown(s.to_owned())),
        }
    }
}

/// The checkout form as submitted.
///
/// Fields are raw form values; nothing is validated on construction. Card
/// number and CVV are kept as secrets so they never end up in logs.
#[derive(Debug, Clone)]
pub struct OrderInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// `None` when no payment option is selected.
    pub payment_method: Option<PaymentMethod>,
    pub student_id: String,
    pub card_number: SecretString,
    pub expiry_date: String,
    pub cvv: SecretString,
}

impl OrderInput {
    /// Create input with contact details and no payment method selected.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            payment_method: None,
            student_id: String::new(),
            card_number: SecretString::from(""),
            expiry_date: String::new(),
            cvv: SecretString::from(""),
        }
    }

    /// Select a payment method.
    #[must_use]
    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    /// Select student-ID payment with the given ID number.
    #[must_use]
    pub fn with_student_id(mut self, student_id: impl Into<String>) -> Self {
        self.payment_method = Some(PaymentMethod::StudentId);
        self.student_id = student_id.into();
        self
    }

    /// Select card payment with the given card details.
    #[must_use]
    pub fn with_card(
        mut self,
        card_number: impl Into<String>,
        expiry_date: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        self.payment_method = Some(PaymentMethod::CreditCard);
        self.card_number = SecretString::from(card_number.into());
        self.expiry_date = expiry_date.into();
        self.cvv = SecretString::from(cvv.into());
        self
    }
}

/// Receipt for a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Order reference shown to the buyer.
    pub order_id: Uuid,
    /// When the order was accepted.
    pub placed_at: DateTime<Utc>,
    /// Number of units ordered.
    pub item_count: u32,
    /// Grand total including tax.
    pub total: Money,
    /// Payment method used.
    pub payment_method: PaymentMethod,
}

impl OrderConfirmation {
    /// Create a confirmation with a fresh order ID stamped now.
    #[must_use]
    pub fn new(item_count: u32, total: Money, payment_method: PaymentMethod) -> Self {
        Self {
            order_id: Uuid::new_v4(),
            placed_at: Utc::now(),
            item_count,
            total,
            payment_method,
        }
    }
}
