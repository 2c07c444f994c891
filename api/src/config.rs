use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Directory the local upload adapter writes into
    pub upload_dir: PathBuf,
    /// Public URL prefix for uploaded files
    pub upload_public_url: String,
    pub max_upload_bytes: usize,
    /// Image upload rate limit per peer IP
    pub upload_rate_per_second: u64,
    pub upload_rate_burst: u32,
    /// Create missing tables at startup
    pub auto_create_schema: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse_or("PORT", 8080)?,
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./uploads")),
            upload_public_url: env::var("UPLOAD_PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:8080/uploads".to_string()),
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            upload_rate_per_second: parse_or("UPLOAD_RATE_PER_SECOND", 2)?,
            upload_rate_burst: parse_or("UPLOAD_RATE_BURST", 5)?,
            auto_create_schema: parse_or("AUTO_CREATE_SCHEMA", false)?,
        })
    }
}

/// Parse an optional variable, failing loudly on a malformed value
fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}
