//! Dining Table Repository

use super::{RepoError, RepoResult};
use crate::db::Storage;
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus};
use uuid::Uuid;

#[derive(Clone)]
pub struct DiningTableRepository {
    storage: Storage,
}

impl DiningTableRepository {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// All tables, sorted by table number
    pub fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let mut tables = self.storage.all_tables()?;
        tables.sort_by_key(|t| t.table_number);
        Ok(tables)
    }

    pub fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        Ok(self.storage.get_table(id)?)
    }

    pub fn create(&self, payload: DiningTableCreate) -> RepoResult<DiningTable> {
        if payload.capacity <= 0 {
            return Err(RepoError::Validation(format!(
                "capacity must be positive, got {}",
                payload.capacity
            )));
        }
        let duplicate = self
            .storage
            .all_tables()?
            .iter()
            .any(|t| t.table_number == payload.table_number);
        if duplicate {
            return Err(RepoError::Validation(format!(
                "table number {} already exists",
                payload.table_number
            )));
        }

        let table = DiningTable {
            id: Uuid::new_v4().to_string(),
            table_number: payload.table_number,
            capacity: payload.capacity,
            status: payload.status.unwrap_or_default(),
            floor_section: payload.floor_section,
        };
        self.storage.put_table(&table)?;
        Ok(table)
    }

    pub fn update(&self, id: &str, payload: DiningTableUpdate) -> RepoResult<DiningTable> {
        let mut table = self
            .storage
            .get_table(id)?
            .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))?;

        if let Some(table_number) = payload.table_number {
            table.table_number = table_number;
        }
        if let Some(capacity) = payload.capacity {
            if capacity <= 0 {
                return Err(RepoError::Validation(format!(
                    "capacity must be positive, got {capacity}"
                )));
            }
            table.capacity = capacity;
        }
        if let Some(status) = payload.status {
            table.status = status;
        }
        if let Some(floor_section) = payload.floor_section {
            table.floor_section = Some(floor_section);
        }

        self.storage.put_table(&table)?;
        Ok(table)
    }

    pub fn update_status(&self, id: &str, status: TableStatus) -> RepoResult<DiningTable> {
        let mut table = self
            .storage
            .get_table(id)?
            .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))?;
        table.status = status;
        self.storage.put_table(&table)?;
        Ok(table)
    }

    pub fn delete(&self, id: &str) -> RepoResult<bool> {
        Ok(self.storage.delete_table(id)?)
    }
}
