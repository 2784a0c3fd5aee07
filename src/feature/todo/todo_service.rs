//! A service for interacting with todos.

use super::todo_repository::{Todo, TodoRepository};
use crate::infra::{error::ApiResult, pagination::CursorParams};
use tracing::instrument;

/// Creates a new todo.
#[instrument(skip(repository))]
pub async fn create_todo<R: TodoRepository + ?Sized>(
    repository: &R,
    subject: &str,
    description: &str,
) -> ApiResult<Todo> {
    let todo = repository.create_todo(subject, description).await?;
    tracing::info!("Created todo {}", todo.id);
    Ok(todo)
}

/// Reads a page of todos, newest first.
#[instrument(skip(repository))]
pub async fn read_todos<R: TodoRepository + ?Sized>(
    repository: &R,
    params: &CursorParams,
) -> ApiResult<Vec<Todo>> {
    let todos = repository
        .read_todos(params.cursor(), params.page_size())
        .await?;
    tracing::info!("Read {} todos", todos.len());
    Ok(todos)
}

/// Updates a todo.
#[instrument(skip(repository))]
pub async fn update_todo<R: TodoRepository + ?Sized>(
    repository: &R,
    id: i64,
    subject: &str,
    description: &str,
) -> ApiResult<Todo> {
    let todo = repository.update_todo(id, subject, description).await?;
    tracing::info!("Updated todo {}", todo.id);
    Ok(todo)
}

/// Deletes todos.
#[instrument(skip(repository))]
pub async fn delete_todos<R: TodoRepository + ?Sized>(
    repository: &R,
    ids: &[i64],
) -> ApiResult<()> {
    repository.delete_todos(ids).await?;
    tracing::info!("Deleted todos {:?}", ids);
    Ok(())
}
