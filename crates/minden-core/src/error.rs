use thiserror::Error;

/// Application-wide error types for the airport API.
#[derive(Error, Debug)]
pub enum AppError {
    /// Requested record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Request data failed validation (bad field value, dangling reference).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Write collides with an existing record (e.g. duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Caller is not authenticated or credentials are wrong.
    #[error("{0}")]
    Unauthorized(String),

    /// Caller is authenticated but not allowed to do this.
    #[error("{0}")]
    Forbidden(String),

    /// Token could not be issued or verified.
    #[error("Token error: {0}")]
    TokenError(String),

    /// Password hashing failed.
    #[error("Password hashing failed: {0}")]
    PasswordHashError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Shorthand for a `NotFound` naming the entity and its id.
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("{entity} not found: {id}"))
    }

    /// Returns true for errors caused by the server side rather than the request.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::DatabaseError(_)
                | AppError::ConfigError(_)
                | AppError::PasswordHashError(_)
                | AppError::Generic(_)
        )
    }
}
