//! Global application state.
//!
//! Used for access to common resources such as the todo store.

use super::database::DbPool;
use crate::feature::todo::todo_repository::TodoStore;
use axum::extract::FromRef;

/// Global application state.
#[derive(Clone, Debug, FromRef)]
pub struct AppState {
    todos: TodoStore,
}

impl AppState {
    /// Constructs a new [`AppState`].
    pub fn new(db: DbPool) -> Self {
        Self {
            todos: TodoStore::new(db),
        }
    }
}
