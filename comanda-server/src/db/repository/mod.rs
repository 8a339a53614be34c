//! Repository layer
//!
//! Thin typed access over [`Storage`](crate::db::Storage). Repositories are
//! cheap to construct — handlers create one per request.

pub mod dining_table;
pub mod menu_item;

pub use dining_table::DiningTableRepository;
pub use menu_item::MenuItemRepository;

use crate::db::StorageError;
use crate::utils::AppError;
use thiserror::Error;

/// Repository errors
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Storage(e) => e.into(),
        }
    }
}
