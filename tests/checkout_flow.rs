//! End-to-end checkout through the cart controller with a recording presenter.
//!
//! Burger (150.00) once and Fries (50.00) twice:
//!
//! - Total: 250.00 MZN, item count 3
//! - A blank address is refused and leaves the cart as it was
//! - Address "Rua 1" sends the order and empties the cart

use rusty_money::{Money, iso::MZN};
use testresult::TestResult;
use url::Url;

use menu_cart::prelude::*;

fn controller_at(hour: u32) -> CartController<RecordingPresenter, FixedClock, Vec<Url>> {
    CartController::new(
        StoreConfig::default(),
        RecordingPresenter::new(),
        FixedClock(hour),
        Vec::new(),
    )
}

#[test]
fn burger_and_fries_order() -> TestResult {
    let mut controller = controller_at(12);

    controller.add_from_catalog(&AddIntent::new("Burger", "150.00"))?;
    controller.add_from_catalog(&AddIntent::new("Fries", "50.00"))?;
    controller.add_from_catalog(&AddIntent::new("Fries", "50.00"))?;

    assert_eq!(controller.total()?, Money::from_minor(25_000, MZN));
    assert_eq!(controller.item_count(), 3);
    assert_eq!(
        controller
            .presenter()
            .last_view()
            .map(CartView::total_display),
        Some("250.00".to_string())
    );

    let refused = controller.submit_order("");

    assert!(matches!(refused, Err(CheckoutError::MissingAddress)));
    assert_eq!(controller.item_count(), 3);
    assert_eq!(controller.total()?, Money::from_minor(25_000, MZN));
    assert!(controller.channel().is_empty());

    let submitted = controller.submit_order("Rua 1")?;

    assert!(
        submitted
            .message
            .contains("Burger - Quantidade: 1 - Preço: 150.00 MZN")
    );
    assert!(
        submitted
            .message
            .contains("Fries - Quantidade: 2 - Preço: 100.00 MZN")
    );
    assert!(submitted.message.contains("Total: 250.00 MZN"));
    assert!(submitted.message.contains("Endereço de entrega: Rua 1"));

    assert_eq!(controller.channel().len(), 1);
    assert!(controller.cart().is_empty());
    assert!(!controller.is_checkout_eligible());

    Ok(())
}

#[test]
fn dispatched_link_targets_configured_number() -> TestResult {
    let mut controller = controller_at(12);

    controller.add_from_catalog(&AddIntent::new("Burger", "150.00"))?;
    controller.submit_order("Rua 1")?;

    let url = controller.channel().first().ok_or("no link dispatched")?;
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    assert_eq!(url.host_str(), Some("api.whatsapp.com"));
    assert_eq!(url.path(), "/send");
    assert_eq!(
        pairs.first(),
        Some(&("phone".to_string(), "842024060".to_string()))
    );
    assert!(
        pairs
            .get(1)
            .is_some_and(|(key, text)| key == "text" && text.starts_with("Pedido:\n"))
    );

    Ok(())
}

#[test]
fn closed_then_open_retry_succeeds() -> TestResult {
    let config = StoreConfig::from_yaml_str("opening_hours: { opens: 8, closes: 22 }")?;

    let mut closed = CartController::new(
        config,
        RecordingPresenter::new(),
        FixedClock(23),
        Vec::new(),
    );

    closed.add_item("Burger", Money::from_minor(15_000, MZN))?;

    assert!(matches!(
        closed.submit_order("Rua 1"),
        Err(CheckoutError::RestaurantClosed)
    ));
    assert_eq!(closed.item_count(), 1);

    let mut open = controller_at(8);

    open.add_item("Burger", Money::from_minor(15_000, MZN))?;
    open.submit_order("Rua 1")?;

    assert!(open.cart().is_empty());

    Ok(())
}

#[test]
fn empty_cart_checked_before_hours_and_address() {
    let mut controller = controller_at(3);

    assert!(matches!(
        controller.submit_order(""),
        Err(CheckoutError::EmptyCart)
    ));
}

#[test]
fn rejected_catalog_intents_leave_cart_untouched() -> TestResult {
    let mut controller = controller_at(12);

    controller.add_from_catalog(&AddIntent::new("Burger", "150.00"))?;

    let bad = [
        AddIntent::new("Fries", "NaN"),
        AddIntent::new("Fries", ""),
        AddIntent::new("Fries", "-50"),
        AddIntent::new("", "50.00"),
        AddIntent {
            name: Some("Fries".to_string()),
            price: None,
        },
    ];

    for intent in &bad {
        assert!(
            controller.add_from_catalog(intent).is_err(),
            "{intent:?} should be rejected"
        );
    }

    assert_eq!(controller.item_count(), 1);
    assert_eq!(controller.total()?, Money::from_minor(15_000, MZN));

    Ok(())
}
