//! Integration tests for the shopping and checkout flow.
//!
//! Run with: cargo test -p falcons-nest-integration-tests

#![allow(clippy::unwrap_used)]

use falcons_nest_core::{OrderInput, PaymentMethod, Size};
use falcons_nest_integration_tests::{TestContext, dollars, name};
use falcons_nest_storefront::{CheckoutError, CheckoutPhase, ValidationError};

fn contact() -> OrderInput {
    OrderInput::new("Ada", "Lovelace", "ada@example.com")
}

// ============================================================================
// Cart Editing
// ============================================================================

#[tokio::test]
async fn test_adding_same_product_merges_lines() {
    let ctx = TestContext::new();
    let mut session = ctx.open_session().await;

    for _ in 0..3 {
        let _ = session.add_item(name("Hoodie"), dollars(35), "", Size::new("M")).await;
    }
    let _ = session.add_item(name("Hoodie"), dollars(35), "", Size::new("L")).await;

    assert_eq!(session.items().len(), 2);
    assert_eq!(session.total_item_count(), 4);

    let summary = session.summary();
    assert_eq!(summary.rows.first().unwrap().line_total, "$105.00");
    assert_eq!(summary.item_count, 4);
}

#[tokio::test]
async fn test_quantity_controls_stay_in_range() {
    let ctx = TestContext::new();
    let mut session = ctx.open_session().await;
    let _ = session.add_item(name("Mug"), dollars(10), "", Size::none()).await;

    let _ = session.adjust_quantity(0, -1).await.unwrap();
    assert_eq!(session.total_item_count(), 1);

    let _ = session.set_quantity_from_input(0, "99").await.unwrap();
    assert_eq!(session.total_item_count(), 10);

    let _ = session.adjust_quantity(0, 1).await.unwrap();
    assert_eq!(session.total_item_count(), 10);

    let _ = session.set_quantity_from_input(0, "").await.unwrap();
    assert_eq!(session.total_item_count(), 1);

    assert!(session.set_quantity(3, 2).await.is_err());
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn test_full_checkout_with_student_id() {
    let ctx = TestContext::new();
    let mut session = ctx.open_session().await;
    let _ = session.add_item(name("Hoodie"), dollars(35), "", Size::new("M")).await;
    let _ = session.add_item(name("Mug"), dollars(10), "", Size::none()).await;
    let _ = session.adjust_quantity(1, 1).await.unwrap();

    // Nothing selected yet.
    let err = session.place_order(&contact()).await.unwrap_err();
    assert_eq!(
        err,
        CheckoutError::Rejected(ValidationError::NoPaymentMethodSelected)
    );
    assert_eq!(
        session.phase().rejection(),
        Some(ValidationError::NoPaymentMethodSelected)
    );
    assert_eq!(session.total_item_count(), 3);

    let placed = session
        .place_order(&contact().with_student_id("123456"))
        .await
        .unwrap();
    assert!(placed.save_status.is_saved());
    assert_eq!(placed.confirmation.total.to_string(), "$56.65");
    assert_eq!(placed.confirmation.item_count, 3);
    assert_eq!(placed.confirmation.payment_method, PaymentMethod::StudentId);
    assert!(matches!(session.phase(), CheckoutPhase::OrderPlaced(_)));

    // Reload after purchase: cart is gone.
    let reopened = ctx.open_session().await;
    assert!(reopened.cart().is_empty());
    assert!(reopened.summary().is_empty);
}

#[tokio::test]
async fn test_card_checkout_requires_every_field() {
    let ctx = TestContext::new();
    let mut session = ctx.open_session().await;
    let _ = session.add_item(name("Tee"), dollars(15), "", Size::new("S")).await;

    let err = session
        .place_order(&contact().with_card("4111111111111111", "12/30", ""))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Please complete all credit card fields.");

    let placed = session
        .place_order(&contact().with_card("4111111111111111", "12/30", "123"))
        .await
        .unwrap();
    assert_eq!(placed.confirmation.payment_method, PaymentMethod::CreditCard);
}

#[tokio::test]
async fn test_missing_contact_checked_first() {
    let ctx = TestContext::new();
    let mut session = ctx.open_session().await;
    let _ = session.add_item(name("Tee"), dollars(15), "", Size::new("S")).await;

    let input = OrderInput::new("Ada", "  ", "ada@example.com");
    let err = session.place_order(&input).await.unwrap_err();
    assert_eq!(err.to_string(), "Please complete all required fields.");

    // A rejected order survives a reload.
    assert_eq!(ctx.open_session().await.total_item_count(), 1);
}

#[tokio::test]
async fn test_empty_cart_cannot_check_out() {
    let ctx = TestContext::new();
    let mut session = ctx.open_session().await;

    let err = session
        .place_order(&contact().with_student_id("123456"))
        .await
        .unwrap_err();
    assert_eq!(err, CheckoutError::EmptyCart);
    assert!(session.phase().is_editing());
}

#[tokio::test]
async fn test_shopping_again_after_order() {
    let ctx = TestContext::new();
    let mut session = ctx.open_session().await;
    let _ = session.add_item(name("Tee"), dollars(15), "", Size::new("S")).await;
    let _ = session
        .place_order(&contact().with_payment_method(PaymentMethod::Other))
        .await
        .unwrap();

    let _ = session.add_item(name("Mug"), dollars(10), "", Size::none()).await;
    assert!(session.phase().is_editing());
    assert_eq!(ctx.open_session().await.total_item_count(), 1);
}
