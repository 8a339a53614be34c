//! 并发下单测试
//!
//! 订单号分配在与插入相同的写事务中完成，因此并发创建必须产生
//! 全局唯一的订单号 —— 这里用 100 个并发创建验证。

use std::collections::HashSet;
use std::sync::Arc;

use comanda_server::{Config, ServerState};
use rand::Rng;
use shared::models::{CartItemInput, MenuItem, OrderCreate, OrderType};

const ORDER_COUNT: usize = 100;

fn seed_menu(state: &ServerState) -> Vec<MenuItem> {
    const PRODUCTS: &[(&str, i64)] = &[
        ("Classic Burger", 1299),
        ("Margherita Pizza", 1450),
        ("Caesar Salad", 950),
        ("Grilled Salmon", 2200),
        ("Lemonade", 400),
        ("Espresso", 250),
    ];

    PRODUCTS
        .iter()
        .enumerate()
        .map(|(idx, (name, price))| {
            let item = MenuItem {
                id: format!("item-{idx}"),
                name: name.to_string(),
                description: None,
                price: *price,
                category: "Mains".to_string(),
                is_available: true,
                preparation_minutes: None,
                sort_order: idx as i32,
            };
            state.storage.put_menu_item(&item).unwrap();
            item
        })
        .collect()
}

fn random_cart(menu: &[MenuItem]) -> Vec<CartItemInput> {
    let mut rng = rand::thread_rng();
    let count = rng.gen_range(1..=4);
    (0..count)
        .map(|_| CartItemInput {
            menu_item_id: menu[rng.gen_range(0..menu.len())].id.clone(),
            quantity: rng.gen_range(1..=3),
            customizations: None,
            special_instructions: None,
        })
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_creations_mint_distinct_order_numbers() {
    let config = Config::with_overrides("unused", 0);
    let state = Arc::new(ServerState::initialize_in_memory(&config).unwrap());
    let menu = Arc::new(seed_menu(&state));

    let mut handles = Vec::with_capacity(ORDER_COUNT);
    for i in 0..ORDER_COUNT {
        let state = state.clone();
        let menu = menu.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            state.ledger().create_order(OrderCreate {
                order_type: OrderType::Takeaway,
                table_id: None,
                customer_id: Some(format!("customer-{}", i % 10)),
                customer_name: None,
                customer_phone: None,
                items: random_cart(&menu),
                special_instructions: None,
            })
        }));
    }

    let mut numbers = HashSet::new();
    for handle in handles {
        let order = handle.await.unwrap().expect("order creation failed");
        assert!(
            numbers.insert(order.order_number.clone()),
            "duplicate order number {}",
            order.order_number
        );
        assert!(order.order_number.starts_with("ORD-"));
        // the money invariant holds for every concurrently-created order
        assert_eq!(
            order.total,
            order.subtotal + order.tax - order.discount + order.tip
        );
    }

    assert_eq!(numbers.len(), ORDER_COUNT);
    assert_eq!(state.storage.order_count().unwrap(), ORDER_COUNT as u64);

    // the allocator never skipped: ORD-0001..=ORD-0100 are all present
    for n in 1..=ORDER_COUNT {
        assert!(numbers.contains(&format!("ORD-{n:04}")), "missing ORD-{n:04}");
    }
}
