//! Ledger scenario tests
//!
//! Everything runs against in-memory storage and a private bus per test.

use std::sync::Arc;

use crate::db::Storage;
use crate::message::MessageBus;
use crate::orders::{OrderFilter, OrderLedger};
use shared::models::{
    CartItemInput, DiningTable, MenuItem, OrderCreate, OrderType, TableStatus,
};

mod test_boundary;
mod test_core;

const TAX_RATE_PERCENT: u32 = 8;

pub(crate) struct TestEnv {
    pub storage: Storage,
    pub bus: Arc<MessageBus>,
    pub ledger: OrderLedger,
}

pub(crate) fn test_env() -> TestEnv {
    let storage = Storage::open_in_memory().expect("in-memory storage");
    let bus = Arc::new(MessageBus::new());
    let ledger = OrderLedger::new(storage.clone(), bus.clone(), TAX_RATE_PERCENT);
    TestEnv {
        storage,
        bus,
        ledger,
    }
}

fn menu_item(id: &str, name: &str, price: i64) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        price,
        category: "Mains".to_string(),
        is_available: true,
        preparation_minutes: None,
        sort_order: 0,
    }
}

/// Seed the catalog with a 10.00 burger and a 15.50 salmon
pub(crate) fn seed_menu(env: &TestEnv) -> (MenuItem, MenuItem) {
    let burger = menu_item("item-burger", "Classic Burger", 1000);
    let salmon = menu_item("item-salmon", "Grilled Salmon", 1550);
    env.storage.put_menu_item(&burger).unwrap();
    env.storage.put_menu_item(&salmon).unwrap();
    (burger, salmon)
}

pub(crate) fn seed_table(env: &TestEnv, table_number: i32) -> DiningTable {
    let table = DiningTable {
        id: format!("table-{table_number}"),
        table_number,
        capacity: 4,
        status: TableStatus::Available,
        floor_section: None,
    };
    env.storage.put_table(&table).unwrap();
    table
}

pub(crate) fn cart_line(menu_item_id: &str, quantity: i32) -> CartItemInput {
    CartItemInput {
        menu_item_id: menu_item_id.to_string(),
        quantity,
        customizations: None,
        special_instructions: None,
    }
}

/// 2 × burger + 1 × salmon — the canonical 35.50 cart
pub(crate) fn standard_cart() -> Vec<CartItemInput> {
    vec![cart_line("item-burger", 2), cart_line("item-salmon", 1)]
}

pub(crate) fn order_create(order_type: OrderType, items: Vec<CartItemInput>) -> OrderCreate {
    OrderCreate {
        order_type,
        table_id: None,
        customer_id: None,
        customer_name: None,
        customer_phone: None,
        items,
        special_instructions: None,
    }
}
