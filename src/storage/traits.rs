use crate::types::{Todo, TodoFields, TodoId};

use super::StorageError;

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence contract for todo items. Every call touches at most one row.
pub trait Storage {
    /// Insert a new row and return it with its freshly assigned id.
    fn create(&self, fields: &TodoFields) -> StorageResult<Todo>;
    fn get_by_id(&self, id: TodoId) -> StorageResult<Todo>;
    /// Overwrite every mutable field of an existing row.
    fn update_by_id(&self, id: TodoId, fields: &TodoFields) -> StorageResult<Todo>;
    fn delete_by_id(&self, id: TodoId) -> StorageResult<()>;
    /// All rows, ordered by id.
    fn list(&self) -> StorageResult<Vec<Todo>>;
}
