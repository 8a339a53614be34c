//! Domain models
//!
//! All monetary amounts are integer minor units (cents). Timestamps are unix
//! epoch milliseconds (UTC).

pub mod dining_table;
pub mod menu_item;
pub mod order;

pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate, TableQrInfo, TableStatus};
pub use menu_item::{MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{
    CartItemInput, InvalidTransition, ItemStatus, Order, OrderCreate, OrderItem, OrderStatus,
    OrderType, PaymentMethod, PaymentStatus, PaymentUpdate,
};
