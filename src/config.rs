//! Environment-driven application configuration.
//!
//! Loaded once at startup (after dotenvy) and shared through `AppState`.

use anyhow::Context;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to
    pub port: u16,
    /// Postgres connection string; memory store is used when absent
    pub database_url: Option<String>,
    /// Secret for signing bearer and quote-lock tokens
    pub jwt_secret: String,
    /// Password for POST /admin/login
    pub admin_password: String,
    /// Currency code quoted to clients (zero-decimal display)
    pub currency: String,
    /// Lifetime of issued bearer tokens, in seconds
    pub token_ttl_secs: i64,
    /// Lifetime of quote-lock tokens, in seconds
    pub quote_ttl_secs: i64,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// `JWT_SECRET` and `ADMIN_PASSWORD` are required; everything else
    /// has a sensible default.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().context("PORT must be a number")?,
            Err(_) => 3000,
        };

        Ok(Self {
            port,
            database_url: std::env::var("DATABASE_URL").ok(),
            jwt_secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            admin_password: std::env::var("ADMIN_PASSWORD")
                .context("ADMIN_PASSWORD must be set")?,
            currency: std::env::var("CURRENCY").unwrap_or_else(|_| "GBP".to_string()),
            token_ttl_secs: env_i64("TOKEN_TTL_SECS", 7 * 24 * 60 * 60),
            quote_ttl_secs: env_i64("QUOTE_TTL_SECS", 10 * 60),
        })
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
