use anyhow::{Context, bail};
use chrono::{FixedOffset, Offset, Utc};
use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,

    // Rate limiting
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    /// Offset used to turn session timestamps into calendar dates and clock times.
    pub session_utc_offset_minutes: i32,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();

        let session_utc_offset_minutes: i32 = parse_or("SESSION_UTC_OFFSET_MINUTES", 0)?;
        if session_utc_offset_minutes.abs() >= 24 * 60 {
            bail!("SESSION_UTC_OFFSET_MINUTES must be within ±1439");
        }

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,

            rate_protected_per_min: parse_or("RATE_PROTECTED_PER_MIN", 1000)?,

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            session_utc_offset_minutes,
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        })
    }

    /// Timezone that session timestamps are bucketed and rendered in.
    pub fn session_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.session_utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix())
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
pub fn test_config() -> Config {
    Config {
        database_url: "mysql://localhost/test".to_string(),
        jwt_secret: "test-secret".to_string(),
        server_addr: "127.0.0.1:0".to_string(),
        rate_protected_per_min: 1000,
        api_prefix: "/api".to_string(),
        session_utc_offset_minutes: 0,
        log_dir: "logs".to_string(),
    }
}
