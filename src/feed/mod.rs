use serde::Serialize;

use crate::messages::MessageResponse;

pub mod handler;
pub mod service;

/// How many messages the home feed shows at most.
pub const FEED_LIMIT: i64 = 100;

/// Home route payload: the static view for anonymous callers, or the feed.
#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum HomeResponse {
    Anonymous { message: String },
    Feed { messages: Vec<MessageResponse> },
}
