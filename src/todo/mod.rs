//! The shared todo list. Anyone can read it; only a todo's owner can change
//! or delete it.

pub mod handlers;
mod service;

pub use service::TodoService;
