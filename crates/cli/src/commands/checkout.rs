//! Checkout command.
//!
//! Card details are accepted on the command line for parity with the
//! storefront form; they are held as secrets and never logged.

use falcons_nest_core::{OrderInput, PaymentMethod};
use falcons_nest_storefront::{CartSession, KeyValueStore};

use super::{CommandError, report_save};

/// Checkout form fields as given on the command line.
#[derive(Default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub payment: Option<PaymentMethod>,
    pub student_id: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl From<CheckoutForm> for OrderInput {
    fn from(form: CheckoutForm) -> Self {
        let mut input = Self::new(form.first_name, form.last_name, form.email);
        match form.payment {
            Some(PaymentMethod::StudentId) => input = input.with_student_id(form.student_id),
            Some(PaymentMethod::CreditCard) => {
                input = input.with_card(form.card_number, form.expiry_date, form.cvv);
            }
            Some(method) => input = input.with_payment_method(method),
            None => {}
        }
        input
    }
}

/// Validate the form and place the order.
#[allow(clippy::print_stdout)]
pub async fn place_order<S: KeyValueStore>(
    session: &mut CartSession<S>,
    form: CheckoutForm,
) -> Result<(), CommandError> {
    let input = OrderInput::from(form);
    let placed = session.place_order(&input).await?;
    report_save(&placed.save_status);

    let confirmation = &placed.confirmation;
    println!("Thank you for your order!");
    println!("Order:   {}", confirmation.order_id);
    println!("Items:   {}", confirmation.item_count);
    println!("Total:   {}", confirmation.total);
    println!("Payment: {}", confirmation.payment_method);
    Ok(())
}
