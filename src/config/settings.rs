//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_ANTIFORGERY_TTL_MINUTES, DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, MIN_ANTIFORGERY_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    antiforgery_secret: String,
    pub antiforgery_ttl_minutes: i64,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("antiforgery_secret", &"[REDACTED]")
            .field("antiforgery_ttl_minutes", &self.antiforgery_ttl_minutes)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Build a configuration with defaults for everything but the
    /// database and the anti-forgery secret.
    pub fn new(database_url: impl Into<String>, antiforgery_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            antiforgery_secret: antiforgery_secret.into(),
            antiforgery_ttl_minutes: DEFAULT_ANTIFORGERY_TTL_MINUTES,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if ANTIFORGERY_SECRET is missing in a release build or is too short.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let antiforgery_secret = env::var("ANTIFORGERY_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!(
                    "ANTIFORGERY_SECRET not set, using insecure default for development"
                );
                "dev-antiforgery-secret-32-chars!!".to_string()
            } else {
                panic!("ANTIFORGERY_SECRET environment variable must be set in production");
            }
        });

        if antiforgery_secret.len() < MIN_ANTIFORGERY_SECRET_LENGTH {
            panic!(
                "ANTIFORGERY_SECRET must be at least {} characters long",
                MIN_ANTIFORGERY_SECRET_LENGTH
            );
        }

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            antiforgery_secret,
            antiforgery_ttl_minutes: env::var("ANTIFORGERY_TOKEN_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|minutes: &i64| *minutes > 0)
                .unwrap_or(DEFAULT_ANTIFORGERY_TTL_MINUTES),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        }
    }

    /// Secret bytes for signing and verifying anti-forgery tokens.
    pub fn antiforgery_secret_bytes(&self) -> &[u8] {
        self.antiforgery_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
