use minden_core::{AppError, Airport};
use sqlx::{PgPool, Pool, Postgres};

use crate::database::{db_error, delete_error};

#[derive(Clone)]
pub struct AirportRepository {
    pool: Pool<Postgres>,
}

impl AirportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AirportRow {
    id: String,
    name: String,
    country: String,
    city: String,
    timezone: String,
    elevation: f64,
    number_of_terminals: i32,
    latitude: f64,
    longitude: f64,
}

impl From<AirportRow> for Airport {
    fn from(row: AirportRow) -> Self {
        Airport {
            id: row.id,
            name: row.name,
            country: row.country,
            city: row.city,
            timezone: row.timezone,
            elevation: row.elevation,
            number_of_terminals: row.number_of_terminals,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

const AIRPORT_COLUMNS: &str =
    "id, name, country, city, timezone, elevation, number_of_terminals, latitude, longitude";

impl AirportRepository {
    pub async fn list(&self) -> Result<Vec<Airport>, AppError> {
        let rows = sqlx::query_as::<_, AirportRow>(&format!(
            "SELECT {AIRPORT_COLUMNS} FROM airports ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Airport>, AppError> {
        let row = sqlx::query_as::<_, AirportRow>(&format!(
            "SELECT {AIRPORT_COLUMNS} FROM airports WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    pub async fn create(&self, airport: &Airport) -> Result<Airport, AppError> {
        let row = sqlx::query_as::<_, AirportRow>(&format!(
            r#"
            INSERT INTO airports
                (id, name, country, city, timezone, elevation, number_of_terminals, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {AIRPORT_COLUMNS}
            "#
        ))
        .bind(&airport.id)
        .bind(&airport.name)
        .bind(&airport.country)
        .bind(&airport.city)
        .bind(&airport.timezone)
        .bind(airport.elevation)
        .bind(airport.number_of_terminals)
        .bind(airport.latitude)
        .bind(airport.longitude)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.into())
    }

    pub async fn update(&self, id: &str, airport: &Airport) -> Result<Airport, AppError> {
        let row = sqlx::query_as::<_, AirportRow>(&format!(
            r#"
            UPDATE airports
            SET name = $2, country = $3, city = $4, timezone = $5, elevation = $6,
                number_of_terminals = $7, latitude = $8, longitude = $9
            WHERE id = $1
            RETURNING {AIRPORT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&airport.name)
        .bind(&airport.country)
        .bind(&airport.city)
        .bind(&airport.timezone)
        .bind(airport.elevation)
        .bind(airport.number_of_terminals)
        .bind(airport.latitude)
        .bind(airport.longitude)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Into::into).ok_or_else(|| AppError::not_found("Airport", id))
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM airports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(delete_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Airport", id));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM airports")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(count)
    }
}
