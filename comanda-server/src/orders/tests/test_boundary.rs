//! Boundary and abuse-input tests

use super::*;
use crate::orders::money;
use crate::utils::AppError;
use shared::models::{PaymentStatus, PaymentUpdate};

#[test]
fn quantity_above_max_is_rejected() {
    let env = test_env();
    seed_menu(&env);

    let err = env
        .ledger
        .create_order(order_create(
            OrderType::Takeaway,
            vec![cart_line("item-burger", money::MAX_QUANTITY + 1)],
        ))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn max_quantity_is_accepted() {
    let env = test_env();
    seed_menu(&env);

    let order = env
        .ledger
        .create_order(order_create(
            OrderType::Takeaway,
            vec![cart_line("item-burger", money::MAX_QUANTITY)],
        ))
        .unwrap();
    assert_eq!(order.subtotal, 1000 * money::MAX_QUANTITY as i64);
}

#[test]
fn negative_tip_is_rejected() {
    let env = test_env();
    seed_menu(&env);
    let order = env
        .ledger
        .create_order(order_create(OrderType::Takeaway, standard_cart()))
        .unwrap();

    let err = env
        .ledger
        .update_payment(
            &order.id,
            PaymentUpdate {
                payment_status: PaymentStatus::Paid,
                payment_method: None,
                tip: Some(-100),
                amount_received: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn oversized_tip_is_rejected() {
    let env = test_env();
    seed_menu(&env);
    let order = env
        .ledger
        .create_order(order_create(OrderType::Takeaway, standard_cart()))
        .unwrap();

    let err = env
        .ledger
        .update_payment(
            &order.id,
            PaymentUpdate {
                payment_status: PaymentStatus::Paid,
                payment_method: None,
                tip: Some(money::MAX_PAYMENT_AMOUNT + 1),
                amount_received: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn zero_tip_leaves_total_unchanged() {
    let env = test_env();
    seed_menu(&env);
    let order = env
        .ledger
        .create_order(order_create(OrderType::Takeaway, standard_cart()))
        .unwrap();

    let paid = env
        .ledger
        .update_payment(
            &order.id,
            PaymentUpdate {
                payment_status: PaymentStatus::Paid,
                payment_method: None,
                tip: Some(0),
                amount_received: None,
            },
        )
        .unwrap();
    assert_eq!(paid.tip, 0);
    assert_eq!(paid.total, 3834);
}

#[test]
fn takeaway_order_ignores_table_occupancy_release() {
    let env = test_env();
    seed_menu(&env);
    let table = seed_table(&env, 9);

    // takeaway referencing a table keeps the registry untouched
    let mut input = order_create(OrderType::Takeaway, standard_cart());
    input.table_id = Some(table.id.clone());
    let order = env.ledger.create_order(input).unwrap();
    assert_eq!(order.table_number, Some(9));
    assert_eq!(
        env.storage.get_table(&table.id).unwrap().unwrap().status,
        shared::models::TableStatus::Available
    );
}

#[test]
fn duplicate_menu_lines_accumulate() {
    let env = test_env();
    seed_menu(&env);

    let order = env
        .ledger
        .create_order(order_create(
            OrderType::Takeaway,
            vec![cart_line("item-burger", 1), cart_line("item-burger", 2)],
        ))
        .unwrap();
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.subtotal, 3000);
}
