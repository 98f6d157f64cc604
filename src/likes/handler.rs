use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    auth::jwt,
    error::AppError,
    likes::{service, LikeActionResponse},
    messages,
    response::ApiResponse,
    users,
};

/// POST /api/messages/:id/like
pub async fn like_message(
    State(pool): State<SqlitePool>,
    claims: jwt::Claims,
    Path(message_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    service::like(&pool, claims.sub, message_id).await?;

    let likes_count = service::likes_count(&pool, message_id).await?;

    Ok(ApiResponse::success(LikeActionResponse {
        liked: true,
        likes_count,
    }))
}

/// DELETE /api/messages/:id/like
pub async fn unlike_message(
    State(pool): State<SqlitePool>,
    claims: jwt::Claims,
    Path(message_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    messages::service::find_message(&pool, message_id).await?;

    service::unlike(&pool, claims.sub, message_id).await?;

    let likes_count = service::likes_count(&pool, message_id).await?;

    Ok(ApiResponse::success(LikeActionResponse {
        liked: false,
        likes_count,
    }))
}

/// GET /api/users/:id/likes
pub async fn get_user_likes(
    State(pool): State<SqlitePool>,
    claims: jwt::Claims,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    users::service::get_user(&pool, user_id).await?;

    let messages = service::liked_messages(&pool, claims.sub, user_id).await?;
    Ok(ApiResponse::success(messages))
}
