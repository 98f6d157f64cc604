use serde::Serialize;

pub mod handler;
pub mod service;

/// `user_id` liked `message_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Like {
    pub user_id: i64,
    pub message_id: i64,
}

/// Response for like/unlike actions
#[derive(Debug, Serialize)]
pub struct LikeActionResponse {
    pub liked: bool,
    pub likes_count: i64,
}
