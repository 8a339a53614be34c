//! redb-based storage layer
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `order_id` | `Order` (JSON) | Order + items, one atomic record |
//! | `order_numbers` | `order_number` | `order_id` | Uniqueness index for order numbers |
//! | `menu_items` | `item_id` | `MenuItem` (JSON) | Menu catalog |
//! | `dining_tables` | `table_id` | `DiningTable` (JSON) | Table registry |
//! | `counters` | name | `u64` | Order number allocator |
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate` by default: a commit is
//! persistent as soon as `commit()` returns, and the database file is always
//! in a consistent state (copy-on-write with atomic pointer swap). A counter
//! is incremented inside the same write transaction as the insert that uses
//! it, so an order number can never be allocated twice — the
//! read-count-then-insert pattern is not available here by construction.

pub mod repository;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::models::{DiningTable, MenuItem, Order};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::utils::AppError;

/// Orders: key = order_id, value = JSON-serialized Order (with items)
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Order number uniqueness index: key = order_number, value = order_id
const ORDER_NUMBERS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("order_numbers");

/// Menu catalog: key = item_id, value = JSON-serialized MenuItem
const MENU_ITEMS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("menu_items");

/// Table registry: key = table_id, value = JSON-serialized DiningTable
const DINING_TABLES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("dining_tables");

/// Counters: key = counter name, value = u64
const COUNTERS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("counters");

const ORDER_COUNT_KEY: &str = "order_count";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Order number already exists: {0}")]
    DuplicateOrderNumber(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::DuplicateOrderNumber(n) => {
                AppError::conflict(format!("Order number {n} already exists"))
            }
            StorageError::Serialization(e) => AppError::internal(e.to_string()),
            other => AppError::database(other.to_string()),
        }
    }
}

/// Embedded storage backed by redb
#[derive(Clone)]
pub struct Storage {
    db: Arc<Database>,
}

impl Storage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init_tables(&db)?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (tests and demos)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init_tables(&db)?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Create all tables so later read transactions never hit a missing table
    fn init_tables(db: &Database) -> StorageResult<()> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(ORDER_NUMBERS_TABLE)?;
            let _ = write_txn.open_table(MENU_ITEMS_TABLE)?;
            let _ = write_txn.open_table(DINING_TABLES_TABLE)?;

            let mut counters = write_txn.open_table(COUNTERS_TABLE)?;
            if counters.get(ORDER_COUNT_KEY)?.is_none() {
                counters.insert(ORDER_COUNT_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Order Counter ==========

    /// Increment and return the order count (within transaction)
    ///
    /// The new count commits together with the caller's insert, so two
    /// concurrent creations can never observe the same value.
    pub fn next_order_count(&self, txn: &WriteTransaction) -> StorageResult<u64> {
        let mut table = txn.open_table(COUNTERS_TABLE)?;
        let current = table.get(ORDER_COUNT_KEY)?.map(|g| g.value()).unwrap_or(0);
        let next = current + 1;
        table.insert(ORDER_COUNT_KEY, next)?;
        Ok(next)
    }

    /// Current order count (read-only)
    pub fn order_count(&self) -> StorageResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COUNTERS_TABLE)?;
        Ok(table.get(ORDER_COUNT_KEY)?.map(|g| g.value()).unwrap_or(0))
    }

    // ========== Order Operations ==========

    /// Insert a new order and claim its order number (within transaction)
    ///
    /// Fails with [`StorageError::DuplicateOrderNumber`] if the number is
    /// already taken — a collision aborts the transaction instead of
    /// overwriting an existing order.
    pub fn insert_order(&self, txn: &WriteTransaction, order: &Order) -> StorageResult<()> {
        {
            let mut numbers = txn.open_table(ORDER_NUMBERS_TABLE)?;
            let taken = numbers.get(order.order_number.as_str())?.is_some();
            if taken {
                return Err(StorageError::DuplicateOrderNumber(order.order_number.clone()));
            }
            numbers.insert(order.order_number.as_str(), order.id.as_str())?;
        }
        let mut orders = txn.open_table(ORDERS_TABLE)?;
        let bytes = serde_json::to_vec(order)?;
        orders.insert(order.id.as_str(), bytes.as_slice())?;
        Ok(())
    }

    /// Overwrite an existing order (within transaction)
    pub fn update_order(&self, txn: &WriteTransaction, order: &Order) -> StorageResult<()> {
        let mut orders = txn.open_table(ORDERS_TABLE)?;
        let bytes = serde_json::to_vec(order)?;
        orders.insert(order.id.as_str(), bytes.as_slice())?;
        Ok(())
    }

    /// Get an order by id (within transaction)
    pub fn get_order_txn(&self, txn: &WriteTransaction, id: &str) -> StorageResult<Option<Order>> {
        let orders = txn.open_table(ORDERS_TABLE)?;
        match orders.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Get an order by id (read-only)
    pub fn get_order(&self, id: &str) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let orders = read_txn.open_table(ORDERS_TABLE)?;
        match orders.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// All orders, unsorted
    pub fn all_orders(&self) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let orders = read_txn.open_table(ORDERS_TABLE)?;
        let mut result = Vec::new();
        for entry in orders.iter()? {
            let (_, value) = entry?;
            result.push(serde_json::from_slice(value.value())?);
        }
        Ok(result)
    }

    // ========== Menu Catalog ==========

    /// Insert or overwrite a menu item
    pub fn put_menu_item(&self, item: &MenuItem) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(MENU_ITEMS_TABLE)?;
            let bytes = serde_json::to_vec(item)?;
            table.insert(item.id.as_str(), bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Get a menu item by id (read-only)
    pub fn get_menu_item(&self, id: &str) -> StorageResult<Option<MenuItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_ITEMS_TABLE)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Get a menu item by id (within transaction)
    ///
    /// Used by order creation so the price snapshot and the insert commit
    /// against the same view of the catalog.
    pub fn get_menu_item_txn(
        &self,
        txn: &WriteTransaction,
        id: &str,
    ) -> StorageResult<Option<MenuItem>> {
        let table = txn.open_table(MENU_ITEMS_TABLE)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// All menu items, unsorted
    pub fn all_menu_items(&self) -> StorageResult<Vec<MenuItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_ITEMS_TABLE)?;
        let mut result = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            result.push(serde_json::from_slice(value.value())?);
        }
        Ok(result)
    }

    /// Delete a menu item, returns whether it existed
    pub fn delete_menu_item(&self, id: &str) -> StorageResult<bool> {
        let txn = self.db.begin_write()?;
        let existed = {
            let mut table = txn.open_table(MENU_ITEMS_TABLE)?;
            table.remove(id)?.is_some()
        };
        txn.commit()?;
        Ok(existed)
    }

    // ========== Table Registry ==========

    /// Insert or overwrite a dining table
    pub fn put_table(&self, table: &DiningTable) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut t = txn.open_table(DINING_TABLES_TABLE)?;
            let bytes = serde_json::to_vec(table)?;
            t.insert(table.id.as_str(), bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Insert or overwrite a dining table (within transaction)
    pub fn put_table_txn(&self, txn: &WriteTransaction, table: &DiningTable) -> StorageResult<()> {
        let mut t = txn.open_table(DINING_TABLES_TABLE)?;
        let bytes = serde_json::to_vec(table)?;
        t.insert(table.id.as_str(), bytes.as_slice())?;
        Ok(())
    }

    /// Get a dining table by id (read-only)
    pub fn get_table(&self, id: &str) -> StorageResult<Option<DiningTable>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DINING_TABLES_TABLE)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Get a dining table by id (within transaction)
    pub fn get_table_txn(
        &self,
        txn: &WriteTransaction,
        id: &str,
    ) -> StorageResult<Option<DiningTable>> {
        let table = txn.open_table(DINING_TABLES_TABLE)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// All dining tables, unsorted
    pub fn all_tables(&self) -> StorageResult<Vec<DiningTable>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DINING_TABLES_TABLE)?;
        let mut result = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            result.push(serde_json::from_slice(value.value())?);
        }
        Ok(result)
    }

    /// Delete a dining table, returns whether it existed
    pub fn delete_table(&self, id: &str) -> StorageResult<bool> {
        let txn = self.db.begin_write()?;
        let existed = {
            let mut table = txn.open_table(DINING_TABLES_TABLE)?;
            table.remove(id)?.is_some()
        };
        txn.commit()?;
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{OrderStatus, OrderType, PaymentStatus};

    fn sample_order(id: &str, number: &str) -> Order {
        Order {
            id: id.to_string(),
            order_number: number.to_string(),
            order_type: OrderType::Takeaway,
            table_id: None,
            table_number: None,
            customer_id: None,
            customer_name: None,
            customer_phone: None,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            subtotal: 1000,
            tax: 80,
            discount: 0,
            tip: 0,
            total: 1080,
            special_instructions: None,
            items: vec![],
            created_at: 0,
            completed_at: None,
        }
    }

    #[test]
    fn counter_increments_within_transaction() {
        let storage = Storage::open_in_memory().unwrap();

        let txn = storage.begin_write().unwrap();
        assert_eq!(storage.next_order_count(&txn).unwrap(), 1);
        assert_eq!(storage.next_order_count(&txn).unwrap(), 2);
        txn.commit().unwrap();

        assert_eq!(storage.order_count().unwrap(), 2);
    }

    #[test]
    fn uncommitted_counter_rolls_back() {
        let storage = Storage::open_in_memory().unwrap();

        let txn = storage.begin_write().unwrap();
        let _ = storage.next_order_count(&txn).unwrap();
        drop(txn); // abort

        assert_eq!(storage.order_count().unwrap(), 0);
    }

    #[test]
    fn order_roundtrip() {
        let storage = Storage::open_in_memory().unwrap();
        let order = sample_order("order-1", "ORD-0001");

        let txn = storage.begin_write().unwrap();
        storage.insert_order(&txn, &order).unwrap();
        txn.commit().unwrap();

        let loaded = storage.get_order("order-1").unwrap().unwrap();
        assert_eq!(loaded.order_number, "ORD-0001");
        assert_eq!(loaded.total, 1080);
        assert!(storage.get_order("order-2").unwrap().is_none());
    }

    #[test]
    fn duplicate_order_number_is_rejected() {
        let storage = Storage::open_in_memory().unwrap();

        let txn = storage.begin_write().unwrap();
        storage
            .insert_order(&txn, &sample_order("order-1", "ORD-0001"))
            .unwrap();
        txn.commit().unwrap();

        let txn = storage.begin_write().unwrap();
        let err = storage
            .insert_order(&txn, &sample_order("order-2", "ORD-0001"))
            .unwrap_err();
        assert!(matches!(err, StorageError::DuplicateOrderNumber(_)));
    }

    #[test]
    fn open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path().join("comanda.db")).unwrap();
        assert_eq!(storage.order_count().unwrap(), 0);
    }
}
