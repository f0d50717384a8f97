use minden_core::{Airline, AppError};
use sqlx::{PgPool, Pool, Postgres};

use crate::database::{db_error, delete_error};

#[derive(Clone)]
pub struct AirlineRepository {
    pool: Pool<Postgres>,
}

impl AirlineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AirlineRow {
    id: String,
    name: String,
    country: String,
    logo: Option<String>,
    active: bool,
}

impl From<AirlineRow> for Airline {
    fn from(row: AirlineRow) -> Self {
        Airline {
            id: row.id,
            name: row.name,
            country: row.country,
            logo: row.logo,
            active: row.active,
        }
    }
}

impl AirlineRepository {
    pub async fn list(&self) -> Result<Vec<Airline>, AppError> {
        let rows = sqlx::query_as::<_, AirlineRow>(
            "SELECT id, name, country, logo, active FROM airlines ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Airline>, AppError> {
        let row = sqlx::query_as::<_, AirlineRow>(
            "SELECT id, name, country, logo, active FROM airlines WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    pub async fn create(&self, airline: &Airline) -> Result<Airline, AppError> {
        let row = sqlx::query_as::<_, AirlineRow>(
            r#"
            INSERT INTO airlines (id, name, country, logo, active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, country, logo, active
            "#,
        )
        .bind(&airline.id)
        .bind(&airline.name)
        .bind(&airline.country)
        .bind(&airline.logo)
        .bind(airline.active)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.into())
    }

    /// Overwrite every column of the airline identified by `id`.
    pub async fn update(&self, id: &str, airline: &Airline) -> Result<Airline, AppError> {
        let row = sqlx::query_as::<_, AirlineRow>(
            r#"
            UPDATE airlines
            SET name = $2, country = $3, logo = $4, active = $5
            WHERE id = $1
            RETURNING id, name, country, logo, active
            "#,
        )
        .bind(id)
        .bind(&airline.name)
        .bind(&airline.country)
        .bind(&airline.logo)
        .bind(airline.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Into::into).ok_or_else(|| AppError::not_found("Airline", id))
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM airlines WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(delete_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Airline", id));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM airlines")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(count)
    }

    pub async fn count_active(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM airlines WHERE active")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(count)
    }
}
