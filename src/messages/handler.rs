use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use sqlx::SqlitePool;

use crate::{
    auth::jwt,
    error::AppError,
    messages::{service, NewMessage},
    response::ApiResponse,
    users,
};

/// POST /api/messages
pub async fn create_message(
    State(pool): State<SqlitePool>,
    claims: jwt::Claims,
    Json(payload): Json<NewMessage>,
) -> Result<impl IntoResponse, AppError> {
    let message = service::post_message(&pool, claims.sub, &payload.text).await?;

    let response = service::get_message(&pool, claims.sub, message.id).await?;
    Ok(ApiResponse::success(response).created())
}

/// GET /api/messages/:id
pub async fn get_message(
    State(pool): State<SqlitePool>,
    claims: jwt::Claims,
    Path(message_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let message = service::get_message(&pool, claims.sub, message_id).await?;
    Ok(ApiResponse::success(message))
}

/// Delete a message (author only)
/// DELETE /api/messages/:id
pub async fn delete_message(
    State(pool): State<SqlitePool>,
    claims: jwt::Claims,
    Path(message_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    service::delete_message(&pool, claims.sub, message_id).await?;
    Ok(ApiResponse::ok("Message deleted"))
}

/// GET /api/users/:id/messages
pub async fn get_user_messages(
    State(pool): State<SqlitePool>,
    claims: jwt::Claims,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    users::service::get_user(&pool, user_id).await?;

    let messages = service::user_messages(&pool, claims.sub, user_id).await?;
    Ok(ApiResponse::success(messages))
}
