use axum::{extract::State, response::IntoResponse};
use sqlx::SqlitePool;

use crate::{
    auth::jwt,
    error::AppError,
    feed::{service, HomeResponse},
    response::ApiResponse,
};

/// Show homepage
/// GET /api/home
///
/// Anonymous callers get a data-free view; the feed query never runs for them.
pub async fn home(
    State(pool): State<SqlitePool>,
    claims: Option<jwt::Claims>,
) -> Result<impl IntoResponse, AppError> {
    let Some(claims) = claims else {
        return Ok(ApiResponse::success(HomeResponse::Anonymous {
            message: "Sign up or sign in to see what people are warbling about.".to_string(),
        }));
    };

    let messages = service::home_feed(&pool, claims.sub).await?;

    Ok(ApiResponse::success(HomeResponse::Feed { messages }))
}
