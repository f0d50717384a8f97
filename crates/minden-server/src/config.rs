use chrono::Duration;

use minden_core::AppError;

use crate::auth::JwtConfig;
use crate::cors;

/// Secret used when `JWT_SECRET` is unset. Only suitable for local development.
pub const DEV_JWT_SECRET: &str = "minden-dev-secret-change-me";

/// Upper bound for `JWT_TTL_HOURS` (one year).
pub const MAX_JWT_TTL_HOURS: i64 = 24 * 365;

/// Runtime settings of the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub jwt: JwtConfig,
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `PORT` (default 8080)
    /// - `JWT_SECRET` (falls back to a development secret with a warning)
    /// - `JWT_TTL_HOURS` (default 24, at most [`MAX_JWT_TTL_HOURS`])
    /// - `CORS_ALLOWED_ORIGINS` (comma-separated, defaults to localhost dev servers)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let port = match lookup("PORT") {
            None => 8080,
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| AppError::ConfigError(format!("Invalid PORT '{raw}'")))?,
        };

        let secret = match lookup("JWT_SECRET").filter(|s| !s.trim().is_empty()) {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let ttl_hours: i64 = match lookup("JWT_TTL_HOURS") {
            None => 24,
            Some(raw) => raw
                .trim()
                .parse()
                .ok()
                .filter(|h| (1..=MAX_JWT_TTL_HOURS).contains(h))
                .ok_or_else(|| {
                    AppError::ConfigError(format!(
                        "Invalid JWT_TTL_HOURS '{raw}': must be between 1 and {MAX_JWT_TTL_HOURS}"
                    ))
                })?,
        };

        let cors_origins = cors::parse_origins(lookup("CORS_ALLOWED_ORIGINS").as_deref());

        Ok(Self {
            port,
            jwt: JwtConfig::new(secret, Duration::hours(ttl_hours)),
            cors_origins,
        })
    }
}
