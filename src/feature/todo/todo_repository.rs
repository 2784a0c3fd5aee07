//! Types and functions for storing and loading todos from the database.
//!
//! The store classifies outcomes and returns them. It never logs, and it
//! never retries.

use crate::infra::database::{Db, DbPool};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::QueryBuilder;
use tracing::instrument;
use utoipa::ToSchema;

/// An existing todo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Todo {
    /// The todo's id. Ids grow with insertion order and are never reused.
    pub id: i64,
    /// What to do.
    #[schema(example = "buy milk")]
    pub subject: String,
    /// Any details.
    #[schema(example = "2 liters, low fat")]
    pub description: String,
    /// When the todo was created.
    pub created_at: DateTime<Utc>,
    /// When the todo was last changed.
    pub updated_at: DateTime<Utc>,
}

/// Errors from the todo store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No row matched the given id(s).
    #[error("todo not found: {0:?}")]
    NotFound(Vec<i64>),
    /// The database failed, including a row vanishing right after a write.
    #[error("backend error: {0}")]
    Backend(#[from] sqlx::Error),
}

/// The result of calling store functions.
pub type StoreResult<T> = Result<T, StoreError>;

/// Anything that can store todos.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TodoRepository: Send + Sync {
    /// Creates a todo and returns it as persisted.
    async fn create_todo(&self, subject: &str, description: &str) -> StoreResult<Todo>;

    /// Reads a page of todos with ids below `cursor_id`, newest first.
    /// A cursor of 0 starts from the newest todo.
    async fn read_todos(&self, cursor_id: i64, page_size: i64) -> StoreResult<Vec<Todo>>;

    /// Updates a todo and returns it as persisted.
    async fn update_todo(&self, id: i64, subject: &str, description: &str) -> StoreResult<Todo>;

    /// Deletes todos, succeeding if at least one of them existed.
    async fn delete_todos(&self, ids: &[i64]) -> StoreResult<()>;
}

const INSERT: &str = r#"
    INSERT INTO todos (subject, description)
    VALUES (?, ?)
"#;

const FETCH: &str = r#"
    SELECT id, subject, description, created_at, updated_at
    FROM todos
    WHERE id = ?
"#;

const READ: &str = r#"
    SELECT id, subject, description, created_at, updated_at
    FROM todos
    ORDER BY id DESC
    LIMIT ?
"#;

const READ_BEFORE: &str = r#"
    SELECT id, subject, description, created_at, updated_at
    FROM todos
    WHERE id < ?
    ORDER BY id DESC
    LIMIT ?
"#;

// Timestamps have millisecond precision, so an update within the same
// millisecond as the previous write is pushed one millisecond past it.
const UPDATE: &str = r#"
    UPDATE todos
    SET subject = ?,
        description = ?,
        updated_at = max(
            strftime('%Y-%m-%dT%H:%M:%fZ', 'now'),
            strftime('%Y-%m-%dT%H:%M:%fZ', julianday(updated_at) + 0.001 / 86400.0)
        )
    WHERE id = ?
"#;

/// Builds `DELETE FROM todos WHERE id IN (?, ?, ...)` with one bound parameter per id.
pub fn bulk_delete_query(ids: &[i64]) -> QueryBuilder<'static, Db> {
    let mut builder = QueryBuilder::new("DELETE FROM todos WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
    builder
}

/// A todo store backed by a shared connection pool.
#[derive(Clone, Debug)]
pub struct TodoStore {
    db: DbPool,
}

impl TodoStore {
    /// Creates a new store.
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Reads back a row right after writing it.
    /// A missing row surfaces as a backend error.
    async fn fetch_todo(&self, id: i64) -> StoreResult<Todo> {
        let todo = sqlx::query_as::<_, Todo>(FETCH)
            .bind(id)
            .fetch_one(&self.db)
            .await?;
        Ok(todo)
    }
}

#[async_trait::async_trait]
impl TodoRepository for TodoStore {
    #[instrument(skip(self))]
    async fn create_todo(&self, subject: &str, description: &str) -> StoreResult<Todo> {
        let id = sqlx::query(INSERT)
            .bind(subject)
            .bind(description)
            .execute(&self.db)
            .await?
            .last_insert_rowid();
        self.fetch_todo(id).await
    }

    #[instrument(skip(self))]
    async fn read_todos(&self, cursor_id: i64, page_size: i64) -> StoreResult<Vec<Todo>> {
        let query = if cursor_id == 0 {
            sqlx::query_as::<_, Todo>(READ).bind(page_size)
        } else {
            sqlx::query_as::<_, Todo>(READ_BEFORE)
                .bind(cursor_id)
                .bind(page_size)
        };
        let todos = query.fetch_all(&self.db).await?;
        Ok(todos)
    }

    #[instrument(skip(self))]
    async fn update_todo(&self, id: i64, subject: &str, description: &str) -> StoreResult<Todo> {
        let rows = sqlx::query(UPDATE)
            .bind(subject)
            .bind(description)
            .bind(id)
            .execute(&self.db)
            .await?;
        if rows.rows_affected() == 0 {
            return Err(StoreError::NotFound(vec![id]));
        }
        self.fetch_todo(id).await
    }

    #[instrument(skip(self))]
    async fn delete_todos(&self, ids: &[i64]) -> StoreResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let rows = bulk_delete_query(ids).build().execute(&self.db).await?;
        // Partial matches count as success.
        if rows.rows_affected() == 0 {
            return Err(StoreError::NotFound(ids.to_vec()));
        }
        Ok(())
    }
}
