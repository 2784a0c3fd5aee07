//! The todo API implementation.

use crate::{
    feature::todo::{
        todo_repository::{Todo, TodoStore},
        todo_service,
    },
    infra::{
        error::{ApiResult, ClientError, ErrorBody},
        extract::{Json, Query},
        pagination::CursorParams,
        state::AppState,
        validation::Valid,
    },
};
use axum::{extract::State, Router};
use axum_extra::routing::{RouterExt, TypedPath};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

/// The todo API endpoints.
pub fn routes() -> Router<AppState> {
    Router::new()
        .typed_post(create_todo)
        .typed_get(read_todos)
        .typed_put(update_todo)
        .typed_delete(delete_todos)
}

/// The todo collection.
#[derive(Debug, Deserialize, TypedPath)]
#[typed_path("/todos", rejection(ClientError))]
pub struct Todos;

/// A new todo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewTodo {
    /// What to do.
    #[schema(example = "buy milk")]
    #[validate(length(min = 1))]
    pub subject: String,
    /// Any details.
    #[schema(example = "2 liters, low fat")]
    #[serde(default)]
    pub description: String,
}

/// New contents for an existing todo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateTodo {
    /// The todo to update.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub id: i64,
    /// What to do instead.
    #[schema(example = "walk dog")]
    #[validate(length(min = 1))]
    pub subject: String,
    /// Replaces the old details. Absent means empty.
    #[serde(default)]
    pub description: String,
}

/// Todos to delete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
pub struct DeleteTodos {
    /// The ids to delete. At least one of them must exist.
    #[validate(length(min = 1))]
    pub ids: Vec<i64>,
}

/// A single todo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoResponse {
    pub todo: Todo,
}

/// A page of todos.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodosResponse {
    pub todos: Vec<Todo>,
}

/// Deletion succeeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {}

/// Creates a new todo.
#[utoipa::path(
    post,
    path = "/todos",
    request_body = NewTodo,
    responses(
        (status = 200, description = "Created", body = TodoResponse),
        (status = 400, description = "Bad Request", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(store))]
pub async fn create_todo(
    Todos: Todos,
    State(store): State<TodoStore>,
    Json(new_todo): Json<NewTodo>,
) -> ApiResult<Json<TodoResponse>> {
    let new_todo = Valid::new(new_todo)?.into_inner();
    let todo =
        todo_service::create_todo(&store, &new_todo.subject, &new_todo.description).await?;
    Ok(Json(TodoResponse { todo }))
}

/// Reads a page of todos, newest first.
#[utoipa::path(
    get,
    path = "/todos",
    params(CursorParams),
    responses(
        (status = 200, description = "Ok", body = TodosResponse),
        (status = 400, description = "Bad Request", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(store))]
pub async fn read_todos(
    Todos: Todos,
    State(store): State<TodoStore>,
    Query(params): Query<CursorParams>,
) -> ApiResult<Json<TodosResponse>> {
    let params = Valid::new(params)?;
    let todos = todo_service::read_todos(&store, params.inner()).await?;
    Ok(Json(TodosResponse { todos }))
}

/// Updates a todo.
#[utoipa::path(
    put,
    path = "/todos",
    request_body = UpdateTodo,
    responses(
        (status = 200, description = "Ok", body = TodoResponse),
        (status = 400, description = "Bad Request", body = ErrorBody),
        (status = 404, description = "Not Found", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(store))]
pub async fn update_todo(
    Todos: Todos,
    State(store): State<TodoStore>,
    Json(update): Json<UpdateTodo>,
) -> ApiResult<Json<TodoResponse>> {
    let update = Valid::new(update)?.into_inner();
    let todo =
        todo_service::update_todo(&store, update.id, &update.subject, &update.description)
            .await?;
    Ok(Json(TodoResponse { todo }))
}

/// Deletes todos.
#[utoipa::path(
    delete,
    path = "/todos",
    request_body = DeleteTodos,
    responses(
        (status = 200, description = "Ok", body = DeletedResponse),
        (status = 400, description = "Bad Request", body = ErrorBody),
        (status = 404, description = "Not Found", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody),
    )
)]
#[instrument(skip(store))]
pub async fn delete_todos(
    Todos: Todos,
    State(store): State<TodoStore>,
    Json(delete): Json<DeleteTodos>,
) -> ApiResult<Json<DeletedResponse>> {
    let delete = Valid::new(delete)?.into_inner();
    todo_service::delete_todos(&store, &delete.ids).await?;
    Ok(Json(DeletedResponse {}))
}
