use minden_db::Database;

use crate::auth::JwtConfig;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub db: Database,
    /// Signing secret and lifetime for issued access tokens.
    pub jwt: JwtConfig,
}
