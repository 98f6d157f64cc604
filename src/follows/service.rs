use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    follows::Follow,
    users::UserSummary,
};

/// Adds the edge `follower_id -> followed_id`. An existing edge is a
/// `Duplicate`, never silently merged.
pub async fn follow(pool: &SqlitePool, follower_id: i64, followed_id: i64) -> AppResult<Follow> {
    if follower_id == followed_id {
        return Err(AppError::Forbidden("You cannot follow yourself".to_string()));
    }

    // Single statement: concurrent duplicates surface as key violations
    let edge = sqlx::query_as::<_, Follow>(
        r#"
        INSERT INTO follows (follower_id, followed_id)
        SELECT $1, id FROM users WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::duplicate_or(e, "Already following this user"))?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    tracing::info!(follower_id, followed_id, "follow created");

    Ok(edge)
}

/// Removes the edge if present; a missing edge is not an error.
pub async fn unfollow(pool: &SqlitePool, follower_id: i64, followed_id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2")
        .bind(follower_id)
        .bind(followed_id)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        tracing::info!(follower_id, followed_id, "follow removed");
    }

    Ok(())
}

/// Does `user_id` follow `other_id`?
pub async fn is_following(pool: &SqlitePool, user_id: i64, other_id: i64) -> AppResult<bool> {
    let found = sqlx::query("SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2")
        .bind(user_id)
        .bind(other_id)
        .fetch_optional(pool)
        .await?
        .is_some();

    Ok(found)
}

/// Is `user_id` followed by `other_id`?
pub async fn is_followed_by(pool: &SqlitePool, user_id: i64, other_id: i64) -> AppResult<bool> {
    is_following(pool, other_id, user_id).await
}

pub async fn followers_count(pool: &SqlitePool, user_id: i64) -> AppResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM follows WHERE followed_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Users following `user_id`
pub async fn followers(pool: &SqlitePool, user_id: i64) -> AppResult<Vec<UserSummary>> {
    let users = sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT u.id, u.username, u.image_url, u.bio
        FROM follows f
        JOIN users u ON f.follower_id = u.id
        WHERE f.followed_id = $1
        ORDER BY u.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Users that `user_id` follows
pub async fn following(pool: &SqlitePool, user_id: i64) -> AppResult<Vec<UserSummary>> {
    let users = sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT u.id, u.username, u.image_url, u.bio
        FROM follows f
        JOIN users u ON f.followed_id = u.id
        WHERE f.follower_id = $1
        ORDER BY u.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(users)
}
