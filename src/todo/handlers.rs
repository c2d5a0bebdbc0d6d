use actix_web::{web, HttpResponse};

use crate::auth::AuthenticatedUser;
use crate::db::TodoInput;
use crate::error::AppError;
use crate::AppState;

pub async fn list_todos(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let todos = state.todo_service.list_all().await?;
    Ok(HttpResponse::Ok().json(todos))
}

pub async fn create_todo(
    user: AuthenticatedUser,
    req: web::Json<TodoInput>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let todo = state.todo_service.create(&req, user.user_id).await?;
    Ok(HttpResponse::Created().json(todo))
}

pub async fn update_todo(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    req: web::Json<TodoInput>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let todo = state
        .todo_service
        .update(path.into_inner(), &req, user.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(todo))
}

pub async fn delete_todo(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    state
        .todo_service
        .delete(path.into_inner(), user.user_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
