use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    likes::Like,
    messages::{MessageFromDb, MessageResponse, MESSAGE_SELECT},
};

/// Records that `liker_id` likes `message_id`. Liking your own message is
/// forbidden and liking twice is a `Duplicate`.
pub async fn like(pool: &SqlitePool, liker_id: i64, message_id: i64) -> AppResult<Like> {
    let like = sqlx::query_as::<_, Like>(
        r#"
        INSERT INTO likes (user_id, message_id)
        SELECT $1, id FROM messages WHERE id = $2 AND user_id <> $1
        RETURNING *
        "#,
    )
    .bind(liker_id)
    .bind(message_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::duplicate_or(e, "Message already liked"))?;

    let Some(like) = like else {
        // Nothing inserted: the message is missing or belongs to the liker
        let owner_id =
            sqlx::query_scalar::<_, i64>("SELECT user_id FROM messages WHERE id = $1")
                .bind(message_id)
                .fetch_optional(pool)
                .await?;

        return Err(match owner_id {
            None => AppError::NotFound("Message not found".to_string()),
            Some(_) => AppError::Forbidden("You cannot like your own message".to_string()),
        });
    };

    tracing::info!(user_id = liker_id, message_id, "message liked");

    Ok(like)
}

/// Removes the like if present; a missing like is not an error.
pub async fn unlike(pool: &SqlitePool, liker_id: i64, message_id: i64) -> AppResult<()> {
    let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND message_id = $2")
        .bind(liker_id)
        .bind(message_id)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        tracing::info!(user_id = liker_id, message_id, "message unliked");
    }

    Ok(())
}

pub async fn likes_count(pool: &SqlitePool, message_id: i64) -> AppResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE message_id = $1")
        .bind(message_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Messages liked by `user_id`, newest first.
pub async fn liked_messages(
    pool: &SqlitePool,
    viewer_id: i64,
    user_id: i64,
) -> AppResult<Vec<MessageResponse>> {
    let query = format!(
        r#"
        {MESSAGE_SELECT}
        JOIN likes lk ON lk.message_id = m.id AND lk.user_id = $2
        ORDER BY m.timestamp DESC, m.id DESC
        "#
    );

    let rows = sqlx::query_as::<_, MessageFromDb>(&query)
        .bind(viewer_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(MessageResponse::from).collect())
}
