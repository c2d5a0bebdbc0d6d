use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::db::models::{Todo, TodoInput, User};
use crate::db::repository::{DbResult, TodoRepository, UserRepository};
use crate::error::DatabaseError;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    todos: BTreeMap<i32, Todo>,
    next_user_id: i32,
    next_todo_id: i32,
}

/// In-memory store with the same observable behavior as [`DbOperations`]:
/// serial ids starting at 1, unique usernames, owner usernames joined on list.
///
/// [`DbOperations`]: crate::db::DbOperations
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> DbResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == username) {
            return Err(DatabaseError::Duplicate);
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            refresh_token: None,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn get_user_by_id(&self, id: i32) -> DbResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn update_refresh_token(&self, user_id: i32, refresh_token: &str) -> DbResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables.users.get_mut(&user_id).ok_or(DatabaseError::NotFound)?;
        user.refresh_token = Some(refresh_token.to_string());
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for MemoryStore {
    async fn create_todo(&self, input: &TodoInput, user_id: i32) -> DbResult<Todo> {
        let mut tables = self.tables.write().await;
        // Mirrors the foreign key on todos.user_id.
        if !tables.users.contains_key(&user_id) {
            return Err(DatabaseError::QueryError(format!(
                "user {} does not exist",
                user_id
            )));
        }

        tables.next_todo_id += 1;
        let todo = Todo {
            id: tables.next_todo_id,
            title: input.title.clone(),
            description: input.description.clone(),
            user_id,
            username: None,
        };
        tables.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn get_all_todos(&self) -> DbResult<Vec<Todo>> {
        let tables = self.tables.read().await;
        let todos = tables
            .todos
            .values()
            .filter_map(|todo| {
                tables.users.get(&todo.user_id).map(|owner| Todo {
                    username: Some(owner.username.clone()),
                    ..todo.clone()
                })
            })
            .collect();
        Ok(todos)
    }

    async fn get_todo_by_id(&self, id: i32) -> DbResult<Option<Todo>> {
        Ok(self.tables.read().await.todos.get(&id).cloned())
    }

    async fn update_todo(&self, id: i32, input: &TodoInput) -> DbResult<Option<Todo>> {
        let mut tables = self.tables.write().await;
        let Some(todo) = tables.todos.get_mut(&id) else {
            return Ok(None);
        };
        todo.title = input.title.clone();
        todo.description = input.description.clone();
        Ok(Some(todo.clone()))
    }

    async fn delete_todo(&self, id: i32) -> DbResult<bool> {
        Ok(self.tables.write().await.todos.remove(&id).is_some())
    }
}
