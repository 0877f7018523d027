use thiserror::Error;

use crate::types::TodoId;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("todo {0} not found")]
    NotFound(TodoId),
    #[error("persistence error: {0}")]
    Persistence(#[from] rusqlite::Error),
}
