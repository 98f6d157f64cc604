use axum::{extract::State, response::IntoResponse, Json};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    auth::{jwt, service, AuthResponse, LoginUser, RegisterUser},
    config::settings::Settings,
    error::AppError,
    response::ApiResponse,
    users::{self, UserResponse},
};

/// POST /api/auth/sign-up
pub async fn signup(
    State(pool): State<SqlitePool>,
    State(settings): State<Settings>,
    Json(payload): Json<RegisterUser>,
) -> Result<impl IntoResponse, AppError> {
    let user = service::signup(&pool, payload).await?;

    let token = jwt::create_token(user.id, &settings.jwt_secret, settings.jwt_ttl_hours)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(ApiResponse::success(AuthResponse {
        token,
        user: UserResponse::from(user),
    })
    .created())
}

/// POST /api/auth/sign-in
pub async fn login(
    State(pool): State<SqlitePool>,
    State(settings): State<Settings>,
    Json(payload): Json<LoginUser>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = service::authenticate(&pool, &payload.username, &payload.password)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let token = jwt::create_token(user.id, &settings.jwt_secret, settings.jwt_ttl_hours)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = user.id, "user signed in");

    Ok(ApiResponse::success(AuthResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; the client drops its copy.
pub async fn logout(claims: jwt::Claims) -> impl IntoResponse {
    tracing::info!(user_id = claims.sub, "user signed out");
    ApiResponse::ok("Logout successful")
}

/// GET /api/me
pub async fn get_me(
    State(pool): State<SqlitePool>,
    claims: jwt::Claims,
) -> Result<impl IntoResponse, AppError> {
    let user = users::service::get_user(&pool, claims.sub).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}
