//! Order Ledger — creation, lifecycle mutations and query views
//!
//! # Mutation Flow
//!
//! ```text
//! create / update
//!     ├─ 1. Validate input
//!     ├─ 2. Begin write transaction
//!     ├─ 3. Resolve catalog / registry references (same transaction)
//!     ├─ 4. Apply state machine + money rules
//!     ├─ 5. Persist order (+ table status) atomically
//!     ├─ 6. Commit
//!     └─ 7. Publish event (best-effort, after the durable write)
//! ```
//!
//! Every mutation is all-or-nothing: an early validation failure aborts the
//! transaction and nothing is persisted. Notification failures never fail a
//! mutation — clients reconcile by re-fetching.

use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::db::{Storage, StorageError};
use crate::message::MessageBus;
use crate::orders::money;
use crate::utils::{AppError, AppResult, now_millis};
use shared::message::{BusMessage, ItemUpdatedPayload, OrderUpdatedPayload};
use shared::models::{
    ItemStatus, Order, OrderCreate, OrderItem, OrderStatus, OrderType, PaymentMethod,
    PaymentStatus, PaymentUpdate, TableStatus,
};

/// Order list filters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub order_type: Option<OrderType>,
    pub customer_id: Option<String>,
}

/// Order lifecycle engine
///
/// Owns order records and their monetary invariants; drives the status and
/// payment state machines; publishes a lifecycle event after every committed
/// mutation. The broadcaster is injected, not a process-wide singleton.
pub struct OrderLedger {
    storage: Storage,
    bus: Arc<MessageBus>,
    tax_rate_percent: u32,
}

impl OrderLedger {
    pub fn new(storage: Storage, bus: Arc<MessageBus>, tax_rate_percent: u32) -> Self {
        Self {
            storage,
            bus,
            tax_rate_percent,
        }
    }

    // ========== Creation ==========

    /// Create an order from cart contents.
    ///
    /// Prices are resolved against the catalog and snapshotted per line; the
    /// order number comes from the storage-owned counter in the same write
    /// transaction as the insert, so concurrent creations can never mint the
    /// same number.
    pub fn create_order(&self, input: OrderCreate) -> AppResult<Order> {
        if input.items.is_empty() {
            return Err(AppError::validation("order must contain at least one item"));
        }
        for line in &input.items {
            money::validate_cart_item(line)?;
        }

        let txn = self.storage.begin_write()?;

        // Resolve every line against the catalog, snapshotting unit prices
        let mut items = Vec::with_capacity(input.items.len());
        let mut subtotal: i64 = 0;
        for line in &input.items {
            let menu_item = self
                .storage
                .get_menu_item_txn(&txn, &line.menu_item_id)?
                .ok_or_else(|| {
                    AppError::not_found(format!("Menu item {} not found", line.menu_item_id))
                })?;
            if !menu_item.is_available {
                return Err(AppError::validation(format!(
                    "Menu item {} is not available",
                    menu_item.name
                )));
            }

            let line_total = money::line_total(menu_item.price, line.quantity)?;
            subtotal = money::accumulate(subtotal, line_total)?;
            items.push(OrderItem {
                id: Uuid::new_v4().to_string(),
                menu_item_id: menu_item.id,
                name: menu_item.name,
                unit_price: menu_item.price,
                quantity: line.quantity,
                customizations: line.customizations.clone(),
                special_instructions: line.special_instructions.clone(),
                status: ItemStatus::Pending,
            });
        }

        // Dine-in context: attach the table and mark it occupied
        let mut table_number = None;
        if let Some(table_id) = &input.table_id {
            let mut table = self
                .storage
                .get_table_txn(&txn, table_id)?
                .ok_or_else(|| AppError::not_found(format!("Table {table_id} not found")))?;
            table_number = Some(table.table_number);
            if input.order_type == OrderType::DineIn && table.status != TableStatus::Occupied {
                table.status = TableStatus::Occupied;
                self.storage.put_table_txn(&txn, &table)?;
            }
        }

        let tax = money::tax_for_subtotal(subtotal, self.tax_rate_percent)?;
        let total = money::order_total(subtotal, tax, 0, 0);

        let count = self.storage.next_order_count(&txn)?;
        let order = Order {
            id: Uuid::new_v4().to_string(),
            order_number: format!("ORD-{count:04}"),
            order_type: input.order_type,
            table_id: input.table_id,
            table_number,
            customer_id: input.customer_id,
            customer_name: input.customer_name,
            customer_phone: input.customer_phone,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            subtotal,
            tax,
            discount: 0,
            tip: 0,
            total,
            special_instructions: input.special_instructions,
            items,
            created_at: now_millis(),
            completed_at: None,
        };

        self.storage.insert_order(&txn, &order)?;
        commit(txn)?;

        tracing::info!(
            order_id = %order.id,
            order_number = %order.order_number,
            total = %money::format_cents(order.total),
            "Order created"
        );
        self.notify(BusMessage::new_order(&order));
        Ok(order)
    }

    // ========== Query Views ==========

    /// All orders, newest first (management dashboards)
    pub fn find_all(&self, filter: &OrderFilter) -> AppResult<Vec<Order>> {
        let mut orders = self.storage.all_orders()?;
        if let Some(status) = filter.status {
            orders.retain(|o| o.status == status);
        }
        if let Some(order_type) = filter.order_type {
            orders.retain(|o| o.order_type == order_type);
        }
        if let Some(customer_id) = &filter.customer_id {
            orders.retain(|o| o.customer_id.as_deref() == Some(customer_id.as_str()));
        }
        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.order_number.cmp(&a.order_number))
        });
        Ok(orders)
    }

    /// Single order; absence is a `None`, not an error
    pub fn find_one(&self, id: &str) -> AppResult<Option<Order>> {
        Ok(self.storage.get_order(id)?)
    }

    /// Kitchen queue: PENDING/CONFIRMED/PREPARING, oldest first.
    ///
    /// FIFO is deliberate — the kitchen serves orders in arrival order.
    pub fn kitchen_orders(&self) -> AppResult<Vec<Order>> {
        let mut orders = self.storage.all_orders()?;
        orders.retain(|o| o.status.is_kitchen_visible());
        orders.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.order_number.cmp(&b.order_number))
        });
        Ok(orders)
    }

    /// A customer's own orders, newest first
    pub fn orders_for_customer(&self, customer_id: &str) -> AppResult<Vec<Order>> {
        self.find_all(&OrderFilter {
            customer_id: Some(customer_id.to_string()),
            ..Default::default()
        })
    }

    // ========== State Machine Mutations ==========

    /// Transition an order's status.
    ///
    /// First entry into COMPLETED stamps `completed_at`; re-applying the same
    /// status is idempotent and never re-stamps. Reaching a terminal state
    /// releases the dine-in table.
    pub fn update_status(&self, id: &str, new_status: OrderStatus) -> AppResult<Order> {
        let txn = self.storage.begin_write()?;
        let mut order = self
            .storage
            .get_order_txn(&txn, id)?
            .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;

        order.status = order.status.transition(new_status)?;
        if order.status == OrderStatus::Completed && order.completed_at.is_none() {
            order.completed_at = Some(now_millis());
        }
        if order.status.is_terminal() {
            self.release_table(&txn, &order)?;
        }

        self.storage.update_order(&txn, &order)?;
        commit(txn)?;

        self.notify(BusMessage::order_updated(&OrderUpdatedPayload {
            order_id: order.id.clone(),
            status: order.status,
            timestamp: now_millis(),
        }));
        Ok(order)
    }

    /// Transition a single item's preparation status, independent of the
    /// order-level status.
    pub fn update_item_status(
        &self,
        order_id: &str,
        item_id: &str,
        status: ItemStatus,
    ) -> AppResult<OrderItem> {
        let txn = self.storage.begin_write()?;
        let mut order = self
            .storage
            .get_order_txn(&txn, order_id)?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;

        let updated = {
            let item = order
                .items
                .iter_mut()
                .find(|i| i.id == item_id)
                .ok_or_else(|| {
                    AppError::not_found(format!("Item {item_id} not found in order {order_id}"))
                })?;
            item.status = status;
            item.clone()
        };

        self.storage.update_order(&txn, &order)?;
        commit(txn)?;

        self.notify(BusMessage::item_updated(&ItemUpdatedPayload {
            order_id: order.id.clone(),
            item_id: updated.id.clone(),
            status: updated.status,
            timestamp: now_millis(),
        }));
        Ok(updated)
    }

    /// Transition the payment sub-state, optionally recording method, tip
    /// and (for cash) the amount received.
    ///
    /// A tip re-derives `total = subtotal + tax - discount + tip` from the
    /// source fields — the stored total is never incremented in place, so a
    /// retried request cannot double-count.
    pub fn update_payment(&self, id: &str, update: PaymentUpdate) -> AppResult<Order> {
        if let Some(tip) = update.tip {
            if !(0..=money::MAX_PAYMENT_AMOUNT).contains(&tip) {
                return Err(AppError::validation(format!("tip out of range: {tip}")));
            }
        }
        if let Some(received) = update.amount_received {
            if !(0..=money::MAX_PAYMENT_AMOUNT).contains(&received) {
                return Err(AppError::validation(format!(
                    "amount received out of range: {received}"
                )));
            }
        }

        let txn = self.storage.begin_write()?;
        let mut order = self
            .storage
            .get_order_txn(&txn, id)?
            .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;

        order.payment_status = order.payment_status.transition(update.payment_status)?;
        if let Some(method) = update.payment_method {
            order.payment_method = Some(method);
        }
        if let Some(tip) = update.tip {
            if tip > 0 {
                order.tip = tip;
            }
        }
        order.total = money::order_total(order.subtotal, order.tax, order.discount, order.tip);

        if order.payment_status == PaymentStatus::Paid {
            if order.payment_method == Some(PaymentMethod::Cash) {
                if let Some(received) = update.amount_received {
                    if received < order.total {
                        return Err(AppError::InsufficientPayment {
                            due: order.total,
                            received,
                        });
                    }
                }
            }
            if order.completed_at.is_none() {
                order.completed_at = Some(now_millis());
            }
        }

        self.storage.update_order(&txn, &order)?;
        commit(txn)?;

        tracing::info!(
            order_id = %order.id,
            payment_status = %order.payment_status,
            total = %money::format_cents(order.total),
            "Payment updated"
        );
        self.notify(BusMessage::order_updated(&OrderUpdatedPayload {
            order_id: order.id.clone(),
            status: order.status,
            timestamp: now_millis(),
        }));
        Ok(order)
    }

    // ========== Internals ==========

    /// Release the dine-in table once its order reaches a terminal state
    fn release_table(&self, txn: &redb::WriteTransaction, order: &Order) -> AppResult<()> {
        if order.order_type != OrderType::DineIn {
            return Ok(());
        }
        let Some(table_id) = &order.table_id else {
            return Ok(());
        };
        if let Some(mut table) = self.storage.get_table_txn(txn, table_id)? {
            if table.status == TableStatus::Occupied {
                table.status = TableStatus::Available;
                self.storage.put_table_txn(txn, &table)?;
            }
        }
        Ok(())
    }

    /// Durable write first, best-effort notify after: a mutation that
    /// committed but reached no subscriber is still a successful mutation.
    fn notify(&self, msg: BusMessage) {
        let receivers = self.bus.publish(msg);
        tracing::trace!(receivers, "Lifecycle event published");
    }
}

fn commit(txn: redb::WriteTransaction) -> AppResult<()> {
    txn.commit().map_err(StorageError::from)?;
    Ok(())
}
