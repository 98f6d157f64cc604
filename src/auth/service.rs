use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    auth::{utils, RegisterUser},
    error::{AppError, AppResult},
    users::{non_blank, User, DEFAULT_HEADER_IMAGE_URL, DEFAULT_IMAGE_URL},
};

/// Creates an account. A username or email collision is reported as one
/// `Duplicate` without saying which field clashed.
pub async fn signup(pool: &SqlitePool, mut payload: RegisterUser) -> AppResult<User> {
    payload.image_url = non_blank(payload.image_url);
    payload.validate()?;

    let password_hash = utils::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let image_url = payload
        .image_url
        .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, image_url, header_image_url, password_hash)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&payload.username)
    .bind(&payload.email)
    .bind(&image_url)
    .bind(DEFAULT_HEADER_IMAGE_URL)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::duplicate_or(e, "Username or email already taken"))?;

    tracing::info!(user_id = user.id, "user signed up");

    Ok(user)
}

/// Returns the user only when the username exists and the password matches.
/// Unknown usernames and wrong passwords are indistinguishable to the caller.
pub async fn authenticate(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    let Some(user) = user else {
        utils::verify_dummy(password);
        return Ok(None);
    };

    if utils::verify_password(&user.password_hash, password).is_err() {
        return Ok(None);
    }

    Ok(Some(user))
}
