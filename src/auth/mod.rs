use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::users::UserResponse;

pub mod handler;
pub mod jwt;
pub mod service;
pub mod utils;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUser {
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
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(url(message = "Image URL must be a URL"))]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginUser {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}
