//! Bearer-token authentication.
//!
//! Access tokens are HS256 JWTs carrying the user id and email. Two
//! middlewares gate routes: [`require_auth`] checks the token and exposes the
//! caller as an [`AuthUser`] extension, and [`require_admin`], layered inside
//! it, additionally requires an active account with the ADMIN role.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use minden_core::AppError;

use crate::dto::ErrorResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Signing configuration for access tokens.
#[derive(Clone)]
pub struct JwtConfig {
    secret: Vec<u8>,
    ttl: Duration,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Claims included in issued access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub email: String,
    /// Same as `user_id`, for generic JWT tooling
    pub sub: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// A freshly signed token and the moment it stops being valid.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl JwtConfig {
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue_token(&self, user_id: Uuid, email: &str) -> Result<IssuedToken, AppError> {
        self.issue_token_at(user_id, email, Utc::now())
    }

    /// Sign a token as if issued at `now`.
    pub fn issue_token_at(
        &self,
        user_id: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::TokenError("Token lifetime out of range".into()))?;
        let claims = Claims {
            user_id,
            email: email.to_string(),
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|e| AppError::TokenError(format!("Failed to encode JWT: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify signature and expiry, returning the claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenError("Token expired".into()),
            ErrorKind::InvalidSignature => AppError::TokenError("Invalid token signature".into()),
            _ => AppError::TokenError("Invalid token".into()),
        })
    }
}

/// The authenticated caller, inserted into request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

fn unauthorized(error: &str, message: &str) -> Response {
    let body = ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
    };
    (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
}

/// Middleware that validates `Authorization: Bearer <jwt>`.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(auth_header) = auth_header else {
        return unauthorized("missing_token", "Authorization header required");
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return unauthorized(
            "invalid_token",
            "Invalid authorization header format. Expected: Bearer <token>",
        );
    };

    let claims = match state.jwt.verify_token(token.trim()) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected access token");
            return unauthorized("invalid_token", "Invalid or expired token");
        }
    };

    request.extensions_mut().insert(AuthUser {
        user_id: claims.user_id,
        email: claims.email,
    });

    next.run(request).await
}

/// Middleware that only lets active ADMIN accounts through. Must run after
/// [`require_auth`]; the role is read from the database on every request.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(auth) = request.extensions().get::<AuthUser>().cloned() else {
        return unauthorized("unauthorized", "Unauthorized");
    };

    let user = match state.db.user_repo().get_by_id(auth.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return unauthorized("unauthorized", "User not found"),
        Err(e) => return ApiError(e).into_response(),
    };

    if !user.active {
        return ApiError(AppError::Forbidden("Account is deactivated".into())).into_response();
    }
    if !user.role.is_admin() {
        tracing::warn!(user_id = %user.id, role = %user.role, "Admin access denied");
        return ApiError(AppError::Forbidden("Admin access required".into())).into_response();
    }

    next.run(request).await
}
