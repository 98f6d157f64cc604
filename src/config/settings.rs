use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};

#[derive(Clone)]
pub struct Settings {
    pub port: u16,
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
}

impl Settings {
    pub fn new() -> Result<Self> {
        let port: u16 = parse_or("PORT", 3000);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        Ok(Self {
            port,
            addr,
            database_url,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 5),
            jwt_secret,
            jwt_ttl_hours: parse_or("JWT_TTL_HOURS", 24),
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
