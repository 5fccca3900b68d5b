use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACCESS_TTL_MINUTES: i64 = 60;
const DEFAULT_REFRESH_TTL_MINUTES: i64 = 60 * 24 * 14;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt: JwtConfig,
}

/// Reads settings through `lookup` so tests can feed a map instead of the
/// process environment.
struct Settings<F> {
    lookup: F,
}

impl<F> Settings<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn required(&self, key: &str) -> anyhow::Result<String> {
        (self.lookup)(key)
            .filter(|v| !v.trim().is_empty())
            .with_context(|| format!("{} must be set", key))
    }

    fn or(&self, key: &str, default: &str) -> String {
        (self.lookup)(key).unwrap_or_else(|| default.to_string())
    }

    /// Unset falls back to `default`; set but unparseable is an error.
    fn parsed<T>(&self, key: &str, default: T) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match (self.lookup)(key) {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("{} is not a valid number: {:?}", key, raw)),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let s = Settings { lookup };
        Ok(Self {
            database_url: s.required("DATABASE_URL")?,
            db_max_connections: s.parsed("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            jwt: JwtConfig {
                secret: s.required("JWT_SECRET")?,
                issuer: s.or("JWT_ISSUER", "tickerdesk"),
                audience: s.or("JWT_AUDIENCE", "tickerdesk-users"),
                ttl_minutes: s.parsed("JWT_TTL_MINUTES", DEFAULT_ACCESS_TTL_MINUTES)?,
                refresh_ttl_minutes: s
                    .parsed("JWT_REFRESH_TTL_MINUTES", DEFAULT_REFRESH_TTL_MINUTES)?,
            },
        })
    }
}
