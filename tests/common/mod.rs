#![allow(dead_code)]

use std::{
    net::SocketAddr,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use sqlx::SqlitePool;
use warbler::{
    auth::{self, jwt, RegisterUser},
    config::settings::Settings,
    db,
    users::User,
    AppState,
};

pub const PASSWORD: &str = "password";
pub const JWT_SECRET: &str = "test-secret";

/// Fresh in-memory database with the schema applied.
pub async fn test_pool() -> SqlitePool {
    let pool = db::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");
    db::migrate(&pool).await.expect("Failed to run migrations");
    pool
}

/// File-backed database shared by several connections, removed on drop.
pub struct FileDb {
    pub pool: SqlitePool,
    path: PathBuf,
}

impl FileDb {
    pub async fn new(name: &str, max_connections: u32) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Clock before epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "warbler-{name}-{}-{nanos}.db",
            std::process::id()
        ));

        let pool = db::connect(&format!("sqlite://{}", path.display()), max_connections)
            .await
            .expect("Failed to open database file");
        db::migrate(&pool).await.expect("Failed to run migrations");

        Self { pool, path }
    }
}

impl Drop for FileDb {
    fn drop(&mut self) {
        for suffix in ["", "-journal", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", self.path.display()));
        }
    }
}

pub async fn create_user(pool: &SqlitePool, username: &str) -> User {
    auth::service::signup(
        pool,
        RegisterUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: PASSWORD.to_string(),
            image_url: None,
        },
    )
    .await
    .expect("Failed to sign up test user")
}

pub fn test_settings() -> Settings {
    Settings {
        port: 0,
        addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        jwt_secret: JWT_SECRET.to_string(),
        jwt_ttl_hours: 1,
    }
}

pub fn test_state(pool: SqlitePool) -> AppState {
    AppState {
        pool,
        settings: test_settings(),
    }
}

pub fn bearer(user_id: i64) -> String {
    let token = jwt::create_token(user_id, JWT_SECRET, 1).expect("Failed to create token");
    format!("Bearer {token}")
}

/// Rows in any table that still reference `user_id`.
pub async fn rows_referencing_user(pool: &SqlitePool, user_id: i64) -> i64 {
    let queries = [
        "SELECT COUNT(*) FROM users WHERE id = $1",
        "SELECT COUNT(*) FROM follows WHERE follower_id = $1 OR followed_id = $1",
        "SELECT COUNT(*) FROM messages WHERE user_id = $1",
        "SELECT COUNT(*) FROM likes WHERE user_id = $1",
    ];

    let mut total = 0;
    for query in queries {
        total += sqlx::query_scalar::<_, i64>(query)
            .bind(user_id)
            .fetch_one(pool)
            .await
            .expect("Failed to count rows");
    }
    total
}
