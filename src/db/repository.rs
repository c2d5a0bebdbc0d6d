use async_trait::async_trait;

use crate::db::models::{Todo, TodoInput, User};
use crate::error::DatabaseError;

pub type DbResult<T> = std::result::Result<T, DatabaseError>;

/// Persistence for user accounts and their single current refresh token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user. Fails with [`DatabaseError::Duplicate`] when the
    /// username is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> DbResult<User>;

    async fn get_user_by_username(&self, username: &str) -> DbResult<Option<User>>;

    async fn get_user_by_id(&self, id: i32) -> DbResult<Option<User>>;

    /// Replaces the stored refresh token, revoking whatever was there before.
    async fn update_refresh_token(&self, user_id: i32, refresh_token: &str) -> DbResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn create_todo(&self, input: &TodoInput, user_id: i32) -> DbResult<Todo>;

    /// All todos with the owner's username joined in, ordered by id.
    async fn get_all_todos(&self) -> DbResult<Vec<Todo>>;

    async fn get_todo_by_id(&self, id: i32) -> DbResult<Option<Todo>>;

    /// Overwrites title and description. Returns `None` if the row is gone.
    async fn update_todo(&self, id: i32, input: &TodoInput) -> DbResult<Option<Todo>>;

    /// Returns whether a row was removed.
    async fn delete_todo(&self, id: i32) -> DbResult<bool>;
}
