//! Creation, validation and query-view tests

use super::*;
use crate::utils::AppError;
use shared::models::{ItemStatus, OrderStatus, PaymentStatus};

#[test]
fn create_order_computes_totals() {
    let env = test_env();
    seed_menu(&env);

    let order = env
        .ledger
        .create_order(order_create(OrderType::DineIn, standard_cart()))
        .unwrap();

    // 2 × 10.00 + 1 × 15.50 = 35.50; 8% tax = 2.84; total 38.34
    assert_eq!(order.subtotal, 3550);
    assert_eq!(order.tax, 284);
    assert_eq!(order.discount, 0);
    assert_eq!(order.tip, 0);
    assert_eq!(order.total, 3834);
    assert_eq!(order.total, order.subtotal + order.tax - order.discount + order.tip);

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::Pending);
    assert!(order.completed_at.is_none());
    assert_eq!(order.items.len(), 2);
    assert!(order.items.iter().all(|i| i.status == ItemStatus::Pending));
}

#[test]
fn order_numbers_are_sequential_and_padded() {
    let env = test_env();
    seed_menu(&env);

    for expected in ["ORD-0001", "ORD-0002", "ORD-0003"] {
        let order = env
            .ledger
            .create_order(order_create(OrderType::Takeaway, standard_cart()))
            .unwrap();
        assert_eq!(order.order_number, expected);
    }
}

#[test]
fn empty_cart_is_rejected() {
    let env = test_env();
    seed_menu(&env);

    let err = env
        .ledger
        .create_order(order_create(OrderType::Takeaway, vec![]))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(env.storage.all_orders().unwrap().len(), 0);
}

#[test]
fn non_positive_quantity_is_rejected() {
    let env = test_env();
    seed_menu(&env);

    let err = env
        .ledger
        .create_order(order_create(
            OrderType::Takeaway,
            vec![cart_line("item-burger", 0)],
        ))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn unknown_menu_item_fails_and_persists_nothing() {
    let env = test_env();
    seed_menu(&env);

    let err = env
        .ledger
        .create_order(order_create(
            OrderType::Takeaway,
            vec![cart_line("item-burger", 1), cart_line("item-ghost", 1)],
        ))
        .unwrap_err();

    match err {
        AppError::NotFound(msg) => assert!(msg.contains("item-ghost"), "{msg}"),
        other => panic!("expected NotFound, got {other:?}"),
    }

    // the aborted transaction left no partial rows and burned no number
    assert_eq!(env.storage.all_orders().unwrap().len(), 0);
    assert_eq!(env.storage.order_count().unwrap(), 0);
    let next = env
        .ledger
        .create_order(order_create(OrderType::Takeaway, standard_cart()))
        .unwrap();
    assert_eq!(next.order_number, "ORD-0001");
}

#[test]
fn unavailable_menu_item_is_rejected() {
    let env = test_env();
    let (mut burger, _) = seed_menu(&env);
    burger.is_available = false;
    env.storage.put_menu_item(&burger).unwrap();

    let err = env
        .ledger
        .create_order(order_create(OrderType::Takeaway, vec![cart_line("item-burger", 1)]))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn unknown_table_is_rejected() {
    let env = test_env();
    seed_menu(&env);

    let mut input = order_create(OrderType::DineIn, standard_cart());
    input.table_id = Some("table-404".to_string());
    let err = env.ledger.create_order(input).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(env.storage.all_orders().unwrap().len(), 0);
}

#[test]
fn find_one_returns_none_for_missing() {
    let env = test_env();
    assert!(env.ledger.find_one("no-such-order").unwrap().is_none());
}

#[test]
fn unit_price_is_a_snapshot() {
    let env = test_env();
    let (mut burger, _) = seed_menu(&env);

    let order = env
        .ledger
        .create_order(order_create(OrderType::Takeaway, vec![cart_line("item-burger", 1)]))
        .unwrap();

    // menu price changes after checkout
    burger.price = 9_999;
    env.storage.put_menu_item(&burger).unwrap();

    let reloaded = env.ledger.find_one(&order.id).unwrap().unwrap();
    assert_eq!(reloaded.items[0].unit_price, 1000);
    assert_eq!(reloaded.subtotal, 1000);
}

#[test]
fn kitchen_queue_is_fifo_and_filtered() {
    let env = test_env();
    seed_menu(&env);

    let first = env
        .ledger
        .create_order(order_create(OrderType::DineIn, standard_cart()))
        .unwrap();
    let second = env
        .ledger
        .create_order(order_create(OrderType::Takeaway, standard_cart()))
        .unwrap();
    let third = env
        .ledger
        .create_order(order_create(OrderType::Delivery, standard_cart()))
        .unwrap();

    // READY and terminal orders leave the kitchen queue
    env.ledger.update_status(&second.id, OrderStatus::Ready).unwrap();
    env.ledger.update_status(&third.id, OrderStatus::Preparing).unwrap();

    let queue = env.ledger.kitchen_orders().unwrap();
    let numbers: Vec<&str> = queue.iter().map(|o| o.order_number.as_str()).collect();
    assert_eq!(numbers, vec![first.order_number.as_str(), third.order_number.as_str()]);

    // oldest first
    assert!(queue.windows(2).all(|w| {
        (w[0].created_at, w[0].order_number.as_str())
            <= (w[1].created_at, w[1].order_number.as_str())
    }));
}

#[test]
fn find_all_is_newest_first_with_filters() {
    let env = test_env();
    seed_menu(&env);

    let mut input = order_create(OrderType::Takeaway, standard_cart());
    input.customer_id = Some("customer-1".to_string());
    env.ledger.create_order(input).unwrap();

    let dine_in = env
        .ledger
        .create_order(order_create(OrderType::DineIn, standard_cart()))
        .unwrap();

    let all = env.ledger.find_all(&OrderFilter::default()).unwrap();
    assert_eq!(all.len(), 2);
    // newest first
    assert!(all.windows(2).all(|w| {
        (w[0].created_at, w[0].order_number.as_str())
            >= (w[1].created_at, w[1].order_number.as_str())
    }));
    assert_eq!(all[0].id, dine_in.id);

    let filtered = env
        .ledger
        .find_all(&OrderFilter {
            order_type: Some(OrderType::DineIn),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, dine_in.id);

    let mine = env.ledger.orders_for_customer("customer-1").unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].customer_id.as_deref(), Some("customer-1"));
}

#[test]
fn status_filter_matches_enum() {
    let env = test_env();
    seed_menu(&env);

    let order = env
        .ledger
        .create_order(order_create(OrderType::Takeaway, standard_cart()))
        .unwrap();
    env.ledger.update_status(&order.id, OrderStatus::Preparing).unwrap();

    let preparing = env
        .ledger
        .find_all(&OrderFilter {
            status: Some(OrderStatus::Preparing),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(preparing.len(), 1);

    let pending = env
        .ledger
        .find_all(&OrderFilter {
            status: Some(OrderStatus::Pending),
            ..Default::default()
        })
        .unwrap();
    assert!(pending.is_empty());
}
