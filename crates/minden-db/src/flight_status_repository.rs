use minden_core::{AppError, FlightStatus};
use sqlx::{PgPool, Pool, Postgres};

use crate::database::db_error;

/// Read-only access to the seeded flight status catalog.
#[derive(Clone)]
pub struct FlightStatusRepository {
    pool: Pool<Postgres>,
}

impl FlightStatusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FlightStatusRow {
    id: i32,
    name: String,
    description: Option<String>,
}

impl From<FlightStatusRow> for FlightStatus {
    fn from(row: FlightStatusRow) -> Self {
        FlightStatus {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

impl FlightStatusRepository {
    pub async fn list(&self) -> Result<Vec<FlightStatus>, AppError> {
        let rows = sqlx::query_as::<_, FlightStatusRow>(
            "SELECT id, name, description FROM flight_statuses ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<FlightStatus>, AppError> {
        let row = sqlx::query_as::<_, FlightStatusRow>(
            "SELECT id, name, description FROM flight_statuses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }
}
