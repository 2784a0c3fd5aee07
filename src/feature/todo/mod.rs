//! Todos: create, page through, update and delete.

pub mod todo_api;
pub mod todo_repository;
pub mod todo_service;
