pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod todo;

use std::sync::Arc;
use actix_web::{web, HttpResponse};

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use crate::config::Settings;

pub use auth::{AuthService, AuthenticatedUser, PasswordHasher, TokenCodec};
pub use db::{DbOperations, MemoryStore, Todo, TodoRepository, User, UserRepository};
pub use todo::TodoService;

/// Health check endpoint handler
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Registers every route. Shared by `main` and the integration tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|_err, _req| {
        AppError::ValidationError("invalid id".to_string()).into()
    }))
    .route("/health", web::get().to(health_check))
    .service(
        web::scope("/auth")
            .route("/register", web::post().to(auth::handlers::register))
            .route("/login", web::post().to(auth::handlers::login))
            .route("/refresh", web::post().to(auth::handlers::refresh)),
    )
    .service(
        web::scope("/todos")
            .route("", web::get().to(todo::handlers::list_todos))
            .route("", web::post().to(todo::handlers::create_todo))
            .route("/{id}", web::put().to(todo::handlers::update_todo))
            .route("/{id}", web::delete().to(todo::handlers::delete_todo)),
    );
}

/// Application state shared across all workers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub auth_service: Arc<AuthService>,
    pub todo_service: Arc<TodoService>,
}

impl AppState {
    /// Wires the services on top of the given store.
    pub fn new(
        config: Settings,
        users: Arc<dyn UserRepository>,
        todos: Arc<dyn TodoRepository>,
    ) -> Result<Self> {
        if config.auth.jwt_secret.is_empty() {
            return Err(AppError::ConfigError("auth.jwt_secret must not be empty".into()));
        }

        let tokens = Arc::new(TokenCodec::from_config(&config.auth));
        let hasher = PasswordHasher::from_config(&config.auth)?;

        Ok(Self {
            auth_service: Arc::new(AuthService::new(users, tokens, hasher)?),
            todo_service: Arc::new(TodoService::new(todos)),
            config: Arc::new(config),
        })
    }

    /// State backed by a fresh [`MemoryStore`].
    pub fn in_memory(config: Settings) -> Result<Self> {
        let store = Arc::new(MemoryStore::new());
        Self::new(config, store.clone(), store)
    }
}
