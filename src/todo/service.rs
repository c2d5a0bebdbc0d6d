use std::sync::Arc;
use tracing::{info, warn};

use crate::db::{Todo, TodoInput, TodoRepository};
use crate::error::{AppError, AuthError};

pub struct TodoService {
    todos: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(todos: Arc<dyn TodoRepository>) -> Self {
        Self { todos }
    }

    /// The new todo is always owned by `caller_id`.
    pub async fn create(&self, input: &TodoInput, caller_id: i32) -> Result<Todo, AppError> {
        validate(input)?;
        info!(user_id = caller_id, title = %input.title, "Creating todo");

        let todo = self.todos.create_todo(input, caller_id).await?;
        Ok(todo)
    }

    pub async fn list_all(&self) -> Result<Vec<Todo>, AppError> {
        Ok(self.todos.get_all_todos().await?)
    }

    pub async fn update(
        &self,
        id: i32,
        input: &TodoInput,
        caller_id: i32,
    ) -> Result<Todo, AppError> {
        validate(input)?;
        self.check_owner(id, caller_id).await?;

        let todo = self
            .todos
            .update_todo(id, input)
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(user_id = caller_id, todo_id = id, "Updated todo");
        Ok(todo)
    }

    pub async fn delete(&self, id: i32, caller_id: i32) -> Result<(), AppError> {
        self.check_owner(id, caller_id).await?;

        if !self.todos.delete_todo(id).await? {
            return Err(not_found(id));
        }
        info!(user_id = caller_id, todo_id = id, "Deleted todo");
        Ok(())
    }

    // Not atomic with the write that follows it.
    async fn check_owner(&self, id: i32, caller_id: i32) -> Result<(), AppError> {
        let existing = self
            .todos
            .get_todo_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if existing.user_id != caller_id {
            warn!(user_id = caller_id, todo_id = id, owner_id = existing.user_id, "Rejected mutation by non-owner");
            return Err(AuthError::Unauthorized.into());
        }
        Ok(())
    }
}

fn validate(input: &TodoInput) -> Result<(), AppError> {
    if input.title.is_empty() {
        return Err(AppError::ValidationError("title must not be empty".into()));
    }
    if input.description.is_empty() {
        return Err(AppError::ValidationError("description must not be empty".into()));
    }
    Ok(())
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("todo {}", id))
}
