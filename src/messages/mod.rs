use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub mod handler;
pub mod service;

/// Database model for a message
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: i64,
}

/// Request payload for posting a message
#[derive(Debug, Deserialize, Validate)]
pub struct NewMessage {
    #[validate(length(
        min = 1,
        max = 140,
        message = "Message must be between 1 and 140 characters"
    ))]
    pub text: String,
}

/// A message with its author and like info, as seen by one viewer
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: i64,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub author: AuthorResponse,
    pub likes_count: i64,
    pub liked: bool,
}

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub username: String,
    pub image_url: String,
}

/// Helper struct for fetching messages with author info from database
#[derive(sqlx::FromRow)]
pub(crate) struct MessageFromDb {
    id: i64,
    text: String,
    timestamp: DateTime<Utc>,
    user_id: i64,
    username: String,
    image_url: String,
    likes_count: i64,
    liked: bool,
}

impl From<MessageFromDb> for MessageResponse {
    fn from(m: MessageFromDb) -> Self {
        MessageResponse {
            id: m.id,
            text: m.text,
            timestamp: m.timestamp,
            author: AuthorResponse {
                id: m.user_id,
                username: m.username,
                image_url: m.image_url,
            },
            likes_count: m.likes_count,
            liked: m.liked,
        }
    }
}

/// Message rows joined with author and like info. `$1` binds the viewer id;
/// callers append their own clauses starting at `$2`.
pub(crate) const MESSAGE_SELECT: &str = r#"
    SELECT
        m.id, m.text, m.timestamp, m.user_id,
        u.username, u.image_url,
        (SELECT COUNT(*) FROM likes l WHERE l.message_id = m.id) AS likes_count,
        EXISTS (SELECT 1 FROM likes l WHERE l.message_id = m.id AND l.user_id = $1) AS liked
    FROM messages m
    JOIN users u ON m.user_id = u.id
"#;
