use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    auth,
    error::{AppError, AppResult},
    follows,
    users::{
        non_blank, UpdateProfile, User, UserProfileResponse, UserSummary,
        DEFAULT_HEADER_IMAGE_URL, DEFAULT_IMAGE_URL,
    },
};

#[derive(sqlx::FromRow)]
struct ProfileCounts {
    messages_count: i64,
    followers_count: i64,
    following_count: i64,
    likes_count: i64,
}

pub async fn get_user(pool: &SqlitePool, user_id: i64) -> AppResult<User> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))
}

/// All users, or those whose username contains `search`.
pub async fn list_users(pool: &SqlitePool, search: Option<&str>) -> AppResult<Vec<UserSummary>> {
    let users = match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(term) => {
            sqlx::query_as::<_, UserSummary>(
                r#"
                SELECT id, username, image_url, bio FROM users
                WHERE username LIKE '%' || $1 || '%'
                ORDER BY id
                "#,
            )
            .bind(term)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, UserSummary>(
                "SELECT id, username, image_url, bio FROM users ORDER BY id",
            )
            .fetch_all(pool)
            .await?
        }
    };

    Ok(users)
}

pub async fn profile(
    pool: &SqlitePool,
    viewer_id: i64,
    user_id: i64,
) -> AppResult<UserProfileResponse> {
    let user = get_user(pool, user_id).await?;

    let counts = sqlx::query_as::<_, ProfileCounts>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM messages WHERE user_id = $1) AS messages_count,
            (SELECT COUNT(*) FROM follows WHERE followed_id = $1) AS followers_count,
            (SELECT COUNT(*) FROM follows WHERE follower_id = $1) AS following_count,
            (SELECT COUNT(*) FROM likes WHERE user_id = $1) AS likes_count
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    let is_following = follows::service::is_following(pool, viewer_id, user_id).await?;
    let is_followed_by = follows::service::is_followed_by(pool, viewer_id, user_id).await?;

    Ok(UserProfileResponse {
        id: user.id,
        username: user.username,
        image_url: user.image_url,
        header_image_url: user.header_image_url,
        bio: user.bio,
        location: user.location,
        messages_count: counts.messages_count,
        followers_count: counts.followers_count,
        following_count: counts.following_count,
        likes_count: counts.likes_count,
        is_following,
        is_followed_by,
    })
}

/// Self-edit. The current password must be supplied and must match.
pub async fn update_profile(
    pool: &SqlitePool,
    user_id: i64,
    mut payload: UpdateProfile,
) -> AppResult<User> {
    payload.image_url = non_blank(payload.image_url);
    payload.header_image_url = non_blank(payload.header_image_url);
    payload.validate()?;

    let current = get_user(pool, user_id).await?;

    auth::service::authenticate(pool, &current.username, &payload.password)
        .await?
        .filter(|user| user.id == user_id)
        .ok_or(AppError::Unauthorized)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET username = $1, email = $2, image_url = $3, header_image_url = $4,
            bio = $5, location = $6
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(&payload.username)
    .bind(&payload.email)
    .bind(payload.image_url.as_deref().unwrap_or(DEFAULT_IMAGE_URL))
    .bind(
        payload
            .header_image_url
            .as_deref()
            .unwrap_or(DEFAULT_HEADER_IMAGE_URL),
    )
    .bind(payload.bio.unwrap_or_default())
    .bind(payload.location.unwrap_or_default())
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::duplicate_or(e, "Username or email already taken"))?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id, "profile updated");

    Ok(user)
}

/// Deletes the account and everything that references it in one transaction:
/// likes given, likes on the user's messages, follow edges on either side,
/// then the messages and the user row.
pub async fn delete_user(pool: &SqlitePool, user_id: i64) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    // Writes come first so the transaction takes the write lock up front
    sqlx::query(
        r#"
        DELETE FROM likes
        WHERE user_id = $1
           OR message_id IN (SELECT id FROM messages WHERE user_id = $1)
        "#,
    )
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM follows WHERE follower_id = $1 OR followed_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let messages = sqlx::query("DELETE FROM messages WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    tx.commit().await?;

    tracing::info!(
        user_id,
        messages_deleted = messages.rows_affected(),
        "user deleted"
    );

    Ok(())
}
