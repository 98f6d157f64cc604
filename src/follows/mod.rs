use serde::Serialize;

pub mod handler;
pub mod service;

/// Directed edge: `follower_id` follows `followed_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Follow {
    pub follower_id: i64,
    pub followed_id: i64,
}

/// Response for follow/unfollow actions
#[derive(Debug, Serialize)]
pub struct FollowActionResponse {
    pub following: bool,
    pub followers_count: i64,
}
