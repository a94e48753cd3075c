//! Application configuration

use std::env;

/// Execution mode of the serving process.
///
/// Development mode bypasses the tenant routing cache entirely and marks
/// rewritten responses as uncacheable so stale browser caches never mask a
/// flag change while iterating locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,
    pub base_domain: String, // e.g., "lensfolio.com" for *.lensfolio.com routing
    pub environment: Environment,

    // Database
    pub database_url: String,
    pub database_max_connections: u32,

    // Hosted auth provider (session verification)
    pub auth_url: String,
    pub auth_anon_key: String,
    pub session_cookie: String,

    // Routing
    pub profile_lookup_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Server
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            base_domain: env::var("BASE_DOMAIN").unwrap_or_else(|_| "localhost:3000".to_string()),
            environment: match env::var("APP_ENV").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },

            // Database
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap_or(3),

            // Auth provider
            auth_url: env::var("AUTH_URL").map_err(|_| ConfigError::Missing("AUTH_URL"))?,
            auth_anon_key: env::var("AUTH_ANON_KEY")
                .map_err(|_| ConfigError::Missing("AUTH_ANON_KEY"))?,
            session_cookie: env::var("SESSION_COOKIE")
                .unwrap_or_else(|_| "lf-session".to_string()),

            // Routing
            profile_lookup_timeout_ms: env::var("PROFILE_LOOKUP_TIMEOUT_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
