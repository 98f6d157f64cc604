use sqlx::SqlitePool;

use crate::{
    error::AppResult,
    feed::FEED_LIMIT,
    messages::{MessageFromDb, MessageResponse, MESSAGE_SELECT},
};

/// The viewer's timeline: their own messages plus those of everyone they
/// follow, newest first, capped at [`FEED_LIMIT`]. Equal timestamps fall
/// back to id descending so the order is stable.
pub async fn home_feed(pool: &SqlitePool, viewer_id: i64) -> AppResult<Vec<MessageResponse>> {
    let query = format!(
        r#"
        {MESSAGE_SELECT}
        WHERE m.user_id = $1
           OR m.user_id IN (SELECT followed_id FROM follows WHERE follower_id = $1)
        ORDER BY m.timestamp DESC, m.id DESC
        LIMIT $2
        "#
    );

    let rows = sqlx::query_as::<_, MessageFromDb>(&query)
        .bind(viewer_id)
        .bind(FEED_LIMIT)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(MessageResponse::from).collect())
}
