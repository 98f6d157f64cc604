use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    auth::jwt,
    error::AppError,
    follows::{service, FollowActionResponse},
    response::ApiResponse,
    users,
};

/// Follow a user
/// POST /api/users/:id/follow
pub async fn follow_user(
    State(pool): State<SqlitePool>,
    claims: jwt::Claims,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    service::follow(&pool, claims.sub, user_id).await?;

    let followers_count = service::followers_count(&pool, user_id).await?;

    Ok(ApiResponse::success(FollowActionResponse {
        following: true,
        followers_count,
    }))
}

/// Unfollow a user
/// DELETE /api/users/:id/follow
pub async fn unfollow_user(
    State(pool): State<SqlitePool>,
    claims: jwt::Claims,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    users::service::get_user(&pool, user_id).await?;

    service::unfollow(&pool, claims.sub, user_id).await?;

    let followers_count = service::followers_count(&pool, user_id).await?;

    Ok(ApiResponse::success(FollowActionResponse {
        following: false,
        followers_count,
    }))
}

/// GET /api/users/:id/followers
pub async fn get_followers(
    State(pool): State<SqlitePool>,
    _claims: jwt::Claims,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    users::service::get_user(&pool, user_id).await?;

    let users = service::followers(&pool, user_id).await?;
    Ok(ApiResponse::success(users))
}

/// GET /api/users/:id/following
pub async fn get_following(
    State(pool): State<SqlitePool>,
    _claims: jwt::Claims,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    users::service::get_user(&pool, user_id).await?;

    let users = service::following(&pool, user_id).await?;
    Ok(ApiResponse::success(users))
}
