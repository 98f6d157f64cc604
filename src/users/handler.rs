use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use sqlx::SqlitePool;

use crate::{
    auth::jwt,
    error::AppError,
    response::ApiResponse,
    users::{service, UpdateProfile, UserFilter, UserResponse},
};

/// List users, optionally filtered by `?q=` on username
/// GET /api/users
pub async fn list_users(
    State(pool): State<SqlitePool>,
    _claims: jwt::Claims,
    Query(filter): Query<UserFilter>,
) -> Result<impl IntoResponse, AppError> {
    let users = service::list_users(&pool, filter.q.as_deref()).await?;
    Ok(ApiResponse::success(users))
}

/// GET /api/users/:id
pub async fn get_user_profile(
    State(pool): State<SqlitePool>,
    claims: jwt::Claims,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let profile = service::profile(&pool, claims.sub, user_id).await?;
    Ok(ApiResponse::success(profile))
}

/// PUT /api/me
pub async fn update_profile(
    State(pool): State<SqlitePool>,
    claims: jwt::Claims,
    Json(payload): Json<UpdateProfile>,
) -> Result<impl IntoResponse, AppError> {
    let user = service::update_profile(&pool, claims.sub, payload).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}

/// DELETE /api/me
pub async fn delete_account(
    State(pool): State<SqlitePool>,
    claims: jwt::Claims,
) -> Result<impl IntoResponse, AppError> {
    service::delete_user(&pool, claims.sub).await?;
    Ok(ApiResponse::ok("User successfully deleted"))
}
