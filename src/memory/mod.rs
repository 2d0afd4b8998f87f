//! Memory records: types, list-view summaries, and the SQLite store.

pub mod store;
pub mod summary;
pub mod types;

use thiserror::Error;

/// Errors raised by the store functions.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("memory not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored row could not be turned back into a [`types::Memory`].
    #[error("corrupt memory row {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

pub type StoreResult<T> = Result<T, StoreError>;
