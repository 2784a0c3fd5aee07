//! OpenAPI configuration.

use crate::feature::{
    health::health_api,
    todo::{todo_api, todo_repository},
};
use utoipa::OpenApi;

/// OpenApi configuration.
#[derive(OpenApi)]
#[openapi(
    paths(
        health_api::healthz,
        todo_api::create_todo,
        todo_api::read_todos,
        todo_api::update_todo,
        todo_api::delete_todos,
    ),
    components(
        schemas(
            health_api::Health,
            todo_repository::Todo,
            todo_api::NewTodo,
            todo_api::UpdateTodo,
            todo_api::DeleteTodos,
            todo_api::TodoResponse,
            todo_api::TodosResponse,
            todo_api::DeletedResponse,
            crate::infra::error::ErrorBody
        )
    )
)]
#[derive(Clone, Copy, Debug)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_routes_are_documented() {
        let doc = ApiDoc::openapi();
        let todos = doc.paths.paths.get("/todos").unwrap();
        assert_eq!(4, todos.operations.len());
        assert!(doc.paths.paths.contains_key("/healthz"));
    }
}
