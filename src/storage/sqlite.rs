use anyhow::Result;
use rusqlite::{params, types::Type, Connection, OptionalExtension};
use std::path::Path;

use super::{
    traits::{Storage, StorageResult},
    StorageError,
};
use crate::types::{Todo, TodoFields, TodoId};

const DB_SCHEMA_VERSION: i64 = 1;

const TODO_COLUMNS: &str = "id, title, description, priority, completed";

#[derive(Clone, Debug)]
pub struct SqliteStorage {
    pub path: String,
}

fn map_todo_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Todo> {
    let id: i64 = row.get(0)?;
    let title: String = row.get(1)?;
    let description: Option<String> = row.get(2)?;
    let priority_int: Option<i64> = row.get(3)?;
    let priority = priority_int
        .map(u8::try_from)
        .transpose()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, Box::new(err)))?;
    let completed_int: i64 = row.get(4)?;
    Ok(Todo {
        id,
        title,
        description,
        priority,
        completed: completed_int != 0,
    })
}

fn db_insert_todo(conn: &Connection, fields: &TodoFields) -> rusqlite::Result<Todo> {
    conn.query_row(
        &format!(
            "INSERT INTO todos (title, description, priority, completed) VALUES (?1, ?2, ?3, ?4) RETURNING {TODO_COLUMNS}"
        ),
        params![
            fields.title,
            fields.description,
            fields.priority,
            fields.completed
        ],
        map_todo_row,
    )
}

fn db_load_todo(conn: &Connection, id: TodoId) -> rusqlite::Result<Option<Todo>> {
    conn.query_row(
        &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"),
        params![id],
        map_todo_row,
    )
    .optional()
}

fn db_update_todo(
    conn: &Connection,
    id: TodoId,
    fields: &TodoFields,
) -> rusqlite::Result<Option<Todo>> {
    conn.query_row(
        &format!(
            r#"
            UPDATE todos
            SET title = ?1, description = ?2, priority = ?3, completed = ?4
            WHERE id = ?5
            RETURNING {TODO_COLUMNS}
            "#
        ),
        params![
            fields.title,
            fields.description,
            fields.priority,
            fields.completed,
            id
        ],
        map_todo_row,
    )
    .optional()
}

fn db_delete_todo(conn: &Connection, id: TodoId) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM todos WHERE id = ?1", params![id])
}

fn db_list_todos(conn: &Connection) -> rusqlite::Result<Vec<Todo>> {
    let mut stmt = conn.prepare(&format!("SELECT {TODO_COLUMNS} FROM todos ORDER BY id"))?;
    let todos = stmt
        .query_map([], map_todo_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(todos)
}

impl Storage for SqliteStorage {
    fn create(&self, fields: &TodoFields) -> StorageResult<Todo> {
        Ok(self.with_conn(|conn| db_insert_todo(conn, fields))?)
    }

    fn get_by_id(&self, id: TodoId) -> StorageResult<Todo> {
        self.with_conn(|conn| db_load_todo(conn, id))?
            .ok_or(StorageError::NotFound(id))
    }

    fn update_by_id(&self, id: TodoId, fields: &TodoFields) -> StorageResult<Todo> {
        self.with_conn(|conn| db_update_todo(conn, id, fields))?
            .ok_or(StorageError::NotFound(id))
    }

    fn delete_by_id(&self, id: TodoId) -> StorageResult<()> {
        match self.with_conn(|conn| db_delete_todo(conn, id))? {
            0 => Err(StorageError::NotFound(id)),
            _ => Ok(()),
        }
    }

    fn list(&self) -> StorageResult<Vec<Todo>> {
        Ok(self.with_conn(db_list_todos)?)
    }
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    /// Remove the backing database file to force a clean start.
    pub fn reset_all(&self) -> Result<()> {
        if !Path::new(&self.path).exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path)?;
        Ok(())
    }

    pub fn init(&self) -> Result<()> {
        self.with_conn(|_conn| Ok(()))?;
        Ok(())
    }

    /// Open a connection scoped to `f`. It is dropped on every return path.
    fn with_conn<F, T>(&self, f: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;

        Self::migrate(&conn)?;
        f(&conn)
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        if version == 0 {
            log::info!(
                "SQLite schema migration: {} -> {}",
                version,
                DB_SCHEMA_VERSION
            );
            conn.execute_batch(
                r#"
            CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL CHECK (length(title) > 0),
                description TEXT,
                priority INTEGER CHECK (priority IS NULL OR priority BETWEEN 1 AND 5),
                completed INTEGER NOT NULL DEFAULT 0 CHECK (completed IN (0, 1))
            );
            "#,
            )?;
            conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
            return Ok(());
        }

        Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::ErrorCode::SchemaChanged as i32),
            Some("database schema version mismatch; please run with --reset option".to_string()),
        ))
    }
}
