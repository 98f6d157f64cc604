use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod feed;
pub mod follows;
pub mod likes;
pub mod messages;
pub mod response;
pub mod users;

use config::settings::Settings;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub settings: Settings,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> SqlitePool {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for Settings {
    fn from_ref(app_state: &AppState) -> Settings {
        app_state.settings.clone()
    }
}

pub fn app(app_state: AppState) -> Router {
    let auth_router = Router::new()
        .route("/sign-in", post(auth::handler::login))
        .route("/sign-up", post(auth::handler::signup))
        .route("/logout", post(auth::handler::logout));

    let me_router = Router::new().route(
        "/",
        get(auth::handler::get_me)
            .put(users::handler::update_profile)
            .delete(users::handler::delete_account),
    );

    let user_router = Router::new()
        .route("/", get(users::handler::list_users))
        .route("/:id", get(users::handler::get_user_profile))
        .route("/:id/following", get(follows::handler::get_following))
        .route("/:id/followers", get(follows::handler::get_followers))
        .route("/:id/likes", get(likes::handler::get_user_likes))
        .route("/:id/messages", get(messages::handler::get_user_messages))
        .route(
            "/:id/follow",
            post(follows::handler::follow_user).delete(follows::handler::unfollow_user),
        );

    let message_router = Router::new()
        .route("/", post(messages::handler::create_message))
        .route(
            "/:id",
            get(messages::handler::get_message).delete(messages::handler::delete_message),
        )
        .route(
            "/:id/like",
            post(likes::handler::like_message).delete(likes::handler::unlike_message),
        );

    Router::new()
        .route("/", get(|| async { "Warbler" }))
        .route("/api/home", get(feed::handler::home))
        .nest("/api/auth", auth_router)
        .nest("/api/me", me_router)
        .nest("/api/users", user_router)
        .nest("/api/messages", message_router)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
