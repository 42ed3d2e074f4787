use anyhow::Context;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server_port: String,
    pub database_url: Option<String>,
    pub db_pool_max: u32,
    pub session_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let server_port = env::var("SERVER_PORT").unwrap_or_else(|_| "8080".into());
        let database_url = env::var("DATABASE_URL").ok();
        let db_pool_max = match env::var("DB_POOL_MAX") {
            Ok(v) => v.parse().context("DB_POOL_MAX must be a positive integer")?,
            Err(_) => 5,
        };
        let session_ttl_secs = match env::var("SESSION_TTL_SECS") {
            Ok(v) => v.parse().context("SESSION_TTL_SECS must be an integer")?,
            Err(_) => 3600,
        };
        Ok(Self {
            server_port,
            database_url,
            db_pool_max,
            session_ttl_secs,
        })
    }
}
