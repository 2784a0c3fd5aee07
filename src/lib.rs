//! A service for creating, paging through, updating and deleting todos.
//!
//! The interesting part is [`feature::todo::todo_repository`], which turns
//! those operations into parameterized SQL.

pub mod app;
pub mod feature;
pub mod infra;
