use minden_core::AppError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::airline_repository::AirlineRepository;
use crate::airport_repository::AirportRepository;
use crate::baggage_repository::BaggageRepository;
use crate::config::DatabaseConfig;
use crate::flight_repository::FlightRepository;
use crate::flight_status_repository::FlightStatusRepository;
use crate::maintenance_repository::MaintenanceLogRepository;
use crate::ticket_repository::TicketRepository;
use crate::user_repository::UserRepository;

/// Owns the connection pool, runs migrations and hands out repositories.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL with the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to connect: {e}")))?;

        tracing::info!(
            max_connections = config.max_connections,
            "Connected to database"
        );
        Ok(Self { pool })
    }

    /// Create a `Database` from an existing pool (useful for testing).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run all pending migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Migration failed: {e}")))?;
        Ok(())
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    pub fn user_repo(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    pub fn airline_repo(&self) -> AirlineRepository {
        AirlineRepository::new(self.pool.clone())
    }

    pub fn airport_repo(&self) -> AirportRepository {
        AirportRepository::new(self.pool.clone())
    }

    pub fn flight_repo(&self) -> FlightRepository {
        FlightRepository::new(self.pool.clone())
    }

    pub fn flight_status_repo(&self) -> FlightStatusRepository {
        FlightStatusRepository::new(self.pool.clone())
    }

    pub fn ticket_repo(&self) -> TicketRepository {
        TicketRepository::new(self.pool.clone())
    }

    pub fn baggage_repo(&self) -> BaggageRepository {
        BaggageRepository::new(self.pool.clone())
    }

    pub fn maintenance_repo(&self) -> MaintenanceLogRepository {
        MaintenanceLogRepository::new(self.pool.clone())
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Translate a sqlx error into an [`AppError`].
///
/// Constraint violations are the caller's fault: duplicates become
/// `Conflict`. Dangling references, check failures, oversized strings and
/// unparsable literals become `Validation`.
pub(crate) fn db_error(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        let constraint = db_err.constraint().unwrap_or("unknown");
        if db_err.is_unique_violation() {
            return match constraint {
                "uq_airport_users_email" => AppError::Conflict("Email already registered".into()),
                "uq_baggage_tracking_number" => {
                    AppError::Conflict("Tracking number already in use".into())
                }
                _ => AppError::Conflict(format!("Record already exists ({constraint})")),
            };
        }
        if db_err.is_foreign_key_violation() {
            return AppError::Validation(format!("Referenced record does not exist ({constraint})"));
        }
        if db_err.is_check_violation() {
            return AppError::Validation(format!("Value rejected by constraint {constraint}"));
        }
        match db_err.code().as_deref() {
            // string_data_right_truncation
            Some("22001") => {
                return AppError::Validation("Value too long for its column".into());
            }
            // invalid_text_representation
            Some("22P02") => {
                return AppError::Validation(format!("Malformed value: {}", db_err.message()));
            }
            _ => {}
        }
    }
    AppError::DatabaseError(e.to_string())
}

/// Like [`db_error`], but a foreign-key violation on delete means the row is
/// still referenced by other records.
pub(crate) fn delete_error(e: sqlx::Error) -> AppError {
    let referenced = e
        .as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation());
    if referenced {
        return AppError::Conflict("Record is still referenced by other records".into());
    }
    db_error(e)
}
