use serde::{Deserialize, Serialize};
use validator::Validate;

pub mod handler;
pub mod service;

pub const DEFAULT_IMAGE_URL: &str =
    "https://icon-library.com/images/default-user-icon/default-user-icon-28.jpg";

pub const DEFAULT_HEADER_IMAGE_URL: &str = "https://images.unsplash.com/photo-1519751138087-5bf79df62d5b?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=2070&q=80";

/// Database model for a registered account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub image_url: String,
    pub header_image_url: String,
    pub bio: String,
    pub location: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub image_url: String,
    pub header_image_url: String,
    pub bio: String,
    pub location: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            image_url: user.image_url,
            header_image_url: user.header_image_url,
            bio: user.bio,
            location: user.location,
        }
    }
}

/// A user as shown in lists: no email, no hash
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub image_url: String,
    pub bio: String,
}

/// Profile page payload, with relationship flags relative to the viewer
#[derive(Debug, Serialize)]
pub struct UserProfileResponse {
    pub id: i64,
    pub username: String,
    pub image_url: String,
    pub header_image_url: String,
    pub bio: String,
    pub location: String,
    pub messages_count: i64,
    pub followers_count: i64,
    pub following_count: i64,
    pub likes_count: i64,
    pub is_following: bool,
    pub is_followed_by: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(length(
        min = 1,
        max = 30,
        message = "Username must be between 1 and 30 characters"
    ))]
    pub username: String,
    #[validate(
        email(message = "Invalid email format"),
        length(max = 50, message = "Email must be at most 50 characters")
    )]
    pub email: String,
    #[validate(url(message = "Image URL must be a URL"))]
    pub image_url: Option<String>,
    #[validate(url(message = "Header image URL must be a URL"))]
    pub header_image_url: Option<String>,
    pub bio: Option<String>,
    #[validate(length(max = 30, message = "Location must be at most 30 characters"))]
    pub location: Option<String>,
    /// Current password; the edit is refused unless it matches.
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UserFilter {
    pub q: Option<String>,
}

/// Treats a blank optional URL as absent so the column default applies.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
