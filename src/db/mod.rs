//! Persistence for users and todos.
//!
//! The services only see the [`UserRepository`] and [`TodoRepository`]
//! traits. [`DbOperations`] implements them on Postgres; [`MemoryStore`]
//! implements them in memory for tests.

pub mod memory;
pub mod models;
pub mod operations;
pub mod repository;

pub use memory::MemoryStore;
pub use models::{Todo, TodoInput, User};
pub use operations::DbOperations;
pub use repository::{DbResult, TodoRepository, UserRepository};
