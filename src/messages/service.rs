use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    messages::{Message, MessageFromDb, MessageResponse, NewMessage, MESSAGE_SELECT},
};

/// Posts `text` as `author_id`. Surrounding whitespace is dropped and what
/// remains must be 1 to 140 characters.
pub async fn post_message(pool: &SqlitePool, author_id: i64, text: &str) -> AppResult<Message> {
    let text = text.trim();

    NewMessage {
        text: text.to_string(),
    }
    .validate()?;

    // Inserts nothing when the author no longer exists
    let message = sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (text, timestamp, user_id)
        SELECT $1, $2, id FROM users WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(text)
    .bind(Utc::now())
    .bind(author_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = author_id, message_id = message.id, "message posted");

    Ok(message)
}

pub async fn find_message(pool: &SqlitePool, message_id: i64) -> AppResult<Message> {
    sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
        .bind(message_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Message not found".to_string()))
}

pub async fn get_message(
    pool: &SqlitePool,
    viewer_id: i64,
    message_id: i64,
) -> AppResult<MessageResponse> {
    let query = format!("{MESSAGE_SELECT} WHERE m.id = $2");

    let message = sqlx::query_as::<_, MessageFromDb>(&query)
        .bind(viewer_id)
        .bind(message_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Message not found".to_string()))?;

    Ok(MessageResponse::from(message))
}

/// Messages written by `user_id`, newest first.
pub async fn user_messages(
    pool: &SqlitePool,
    viewer_id: i64,
    user_id: i64,
) -> AppResult<Vec<MessageResponse>> {
    let query = format!(
        "{MESSAGE_SELECT} WHERE m.user_id = $2 ORDER BY m.timestamp DESC, m.id DESC"
    );

    let rows = sqlx::query_as::<_, MessageFromDb>(&query)
        .bind(viewer_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(MessageResponse::from).collect())
}

/// Deletes a message owned by `requester_id` together with every like on it.
pub async fn delete_message(
    pool: &SqlitePool,
    requester_id: i64,
    message_id: i64,
) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    // Writes come first so the transaction takes the write lock up front
    sqlx::query(
        r#"
        DELETE FROM likes
        WHERE message_id IN (SELECT id FROM messages WHERE id = $1 AND user_id = $2)
        "#,
    )
    .bind(message_id)
    .bind(requester_id)
    .execute(&mut *tx)
    .await?;

    let deleted = sqlx::query("DELETE FROM messages WHERE id = $1 AND user_id = $2")
        .bind(message_id)
        .bind(requester_id)
        .execute(&mut *tx)
        .await?;

    if deleted.rows_affected() == 0 {
        let owner_id = sqlx::query_scalar::<_, i64>("SELECT user_id FROM messages WHERE id = $1")
            .bind(message_id)
            .fetch_optional(&mut *tx)
            .await?;

        return Err(match owner_id {
            None => AppError::NotFound("Message not found".to_string()),
            Some(_) => AppError::Forbidden("You can only delete your own messages".to_string()),
        });
    }

    tx.commit().await?;

    tracing::info!(user_id = requester_id, message_id, "message deleted");

    Ok(())
}
