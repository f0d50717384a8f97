use minden_core::{AppError, Baggage, BaggageUpdate, NewBaggage, Page, PageRequest};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use crate::database::{db_error, delete_error};

#[derive(Clone)]
pub struct BaggageRepository {
    pool: Pool<Postgres>,
}

impl BaggageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BaggageRow {
    id: Uuid,
    airport_user_id: Uuid,
    flight_id: String,
    size: i32,
    weight: f64,
    tracking_number: String,
    status: String,
    special_handling: Option<String>,
}

impl From<BaggageRow> for Baggage {
    fn from(row: BaggageRow) -> Self {
        Baggage {
            id: row.id,
            airport_user_id: row.airport_user_id,
            flight_id: row.flight_id,
            size: row.size,
            weight: row.weight,
            tracking_number: row.tracking_number,
            status: row.status.parse().unwrap_or_default(),
            special_handling: row.special_handling,
        }
    }
}

const BAGGAGE_COLUMNS: &str =
    "id, airport_user_id, flight_id, size, weight, tracking_number, status, special_handling";

impl BaggageRepository {
    pub async fn get(&self, id: Uuid) -> Result<Option<Baggage>, AppError> {
        let row = sqlx::query_as::<_, BaggageRow>(&format!(
            "SELECT {BAGGAGE_COLUMNS} FROM baggage WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    pub async fn get_by_tracking_number(
        &self,
        tracking_number: &str,
    ) -> Result<Option<Baggage>, AppError> {
        let row = sqlx::query_as::<_, BaggageRow>(&format!(
            "SELECT {BAGGAGE_COLUMNS} FROM baggage WHERE tracking_number = $1"
        ))
        .bind(tracking_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Baggage>, AppError> {
        let rows = sqlx::query_as::<_, BaggageRow>(&format!(
            "SELECT {BAGGAGE_COLUMNS} FROM baggage WHERE airport_user_id = $1 ORDER BY tracking_number"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn list_by_flight(&self, flight_id: &str) -> Result<Vec<Baggage>, AppError> {
        let rows = sqlx::query_as::<_, BaggageRow>(&format!(
            "SELECT {BAGGAGE_COLUMNS} FROM baggage WHERE flight_id = $1 ORDER BY tracking_number"
        ))
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn list_page(&self, request: PageRequest) -> Result<Page<Baggage>, AppError> {
        let rows = sqlx::query_as::<_, BaggageRow>(&format!(
            "SELECT {BAGGAGE_COLUMNS} FROM baggage ORDER BY tracking_number LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(request.limit))
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        let total = self.count().await?;
        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            request,
            total,
        ))
    }

    /// Insert a baggage item, generating a tracking number when none is given.
    pub async fn create(&self, baggage: &NewBaggage) -> Result<Baggage, AppError> {
        let tracking_number = baggage
            .tracking_number
            .clone()
            .unwrap_or_else(Baggage::generate_tracking_number);
        let status = baggage.status.unwrap_or_default();

        let row = sqlx::query_as::<_, BaggageRow>(&format!(
            r#"
            INSERT INTO baggage
                (id, airport_user_id, flight_id, size, weight, tracking_number, status, special_handling)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {BAGGAGE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(baggage.airport_user_id)
        .bind(&baggage.flight_id)
        .bind(baggage.size)
        .bind(baggage.weight)
        .bind(&tracking_number)
        .bind(status.as_str())
        .bind(&baggage.special_handling)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        tracing::info!(
            baggage_id = %row.id,
            tracking_number = %row.tracking_number,
            "Baggage checked"
        );
        Ok(row.into())
    }

    pub async fn update(&self, id: Uuid, update: &BaggageUpdate) -> Result<Baggage, AppError> {
        let row = sqlx::query_as::<_, BaggageRow>(&format!(
            r#"
            UPDATE baggage
            SET flight_id = $2, size = $3, weight = $4, status = $5, special_handling = $6
            WHERE id = $1
            RETURNING {BAGGAGE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.flight_id)
        .bind(update.size)
        .bind(update.weight)
        .bind(update.status.as_str())
        .bind(&update.special_handling)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Into::into).ok_or_else(|| AppError::not_found("Baggage", id))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM baggage WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(delete_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Baggage", id));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM baggage")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(count)
    }
}

