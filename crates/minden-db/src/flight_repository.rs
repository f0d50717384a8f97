use chrono::{DateTime, Utc};
use minden_core::{AppError, Flight, Page, PageRequest};
use sqlx::{PgPool, Pool, Postgres};

use crate::database::{db_error, delete_error};

#[derive(Clone)]
pub struct FlightRepository {
    pool: Pool<Postgres>,
}

impl FlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct FlightRow {
    id: String,
    from_airport: String,
    to_airport: String,
    airline_id: Option<String>,
    pilot_id: String,
    plane_id: String,
    terminal_id: Option<String>,
    status_id: Option<i32>,
    scheduled_departure: DateTime<Utc>,
    actual_departure: Option<DateTime<Utc>>,
    scheduled_arrival: DateTime<Utc>,
    actual_arrival: Option<DateTime<Utc>>,
    gate: Option<String>,
    baggage_claim: Option<String>,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id: row.id,
            from: row.from_airport,
            to: row.to_airport,
            airline_id: row.airline_id,
            pilot_id: row.pilot_id,
            plane_id: row.plane_id,
            terminal_id: row.terminal_id,
            status_id: row.status_id,
            scheduled_departure: row.scheduled_departure,
            actual_departure: row.actual_departure,
            scheduled_arrival: row.scheduled_arrival,
            actual_arrival: row.actual_arrival,
            gate: row.gate,
            baggage_claim: row.baggage_claim,
        }
    }
}

const FLIGHT_COLUMNS: &str = "id, from_airport, to_airport, airline_id, pilot_id, plane_id, \
     terminal_id, status_id, scheduled_departure, actual_departure, scheduled_arrival, \
     actual_arrival, gate, baggage_claim";

impl FlightRepository {
    /// All flights, earliest scheduled departure first.
    pub async fn list(&self) -> Result<Vec<Flight>, AppError> {
        let rows = sqlx::query_as::<_, FlightRow>(&format!(
            "SELECT {FLIGHT_COLUMNS} FROM flights ORDER BY scheduled_departure, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn list_page(&self, request: PageRequest) -> Result<Page<Flight>, AppError> {
        let rows = sqlx::query_as::<_, FlightRow>(&format!(
            "SELECT {FLIGHT_COLUMNS} FROM flights
             ORDER BY scheduled_departure DESC, id
             LIMIT $1 OFFSET $2"
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

    /// Flights departing soonest from now, up to `limit`.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<Flight>, AppError> {
        let rows = sqlx::query_as::<_, FlightRow>(&format!(
            "SELECT {FLIGHT_COLUMNS} FROM flights
             WHERE scheduled_departure >= NOW()
             ORDER BY scheduled_departure
             LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Flight>, AppError> {
        let row = sqlx::query_as::<_, FlightRow>(&format!(
            "SELECT {FLIGHT_COLUMNS} FROM flights WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    pub async fn create(&self, flight: &Flight) -> Result<Flight, AppError> {
        let row = sqlx::query_as::<_, FlightRow>(&format!(
            r#"
            INSERT INTO flights ({FLIGHT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {FLIGHT_COLUMNS}
            "#
        ))
        .bind(&flight.id)
        .bind(&flight.from)
        .bind(&flight.to)
        .bind(&flight.airline_id)
        .bind(&flight.pilot_id)
        .bind(&flight.plane_id)
        .bind(&flight.terminal_id)
        .bind(flight.status_id)
        .bind(flight.scheduled_departure)
        .bind(flight.actual_departure)
        .bind(flight.scheduled_arrival)
        .bind(flight.actual_arrival)
        .bind(&flight.gate)
        .bind(&flight.baggage_claim)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        tracing::info!(flight_id = %row.id, "Flight created");
        Ok(row.into())
    }

    /// Replace the flight identified by `id`. The id itself is not changed.
    pub async fn update(&self, id: &str, flight: &Flight) -> Result<Flight, AppError> {
        let row = sqlx::query_as::<_, FlightRow>(&format!(
            r#"
            UPDATE flights
            SET from_airport = $2, to_airport = $3, airline_id = $4, pilot_id = $5,
                plane_id = $6, terminal_id = $7, status_id = $8, scheduled_departure = $9,
                actual_departure = $10, scheduled_arrival = $11, actual_arrival = $12,
                gate = $13, baggage_claim = $14
            WHERE id = $1
            RETURNING {FLIGHT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&flight.from)
        .bind(&flight.to)
        .bind(&flight.airline_id)
        .bind(&flight.pilot_id)
        .bind(&flight.plane_id)
        .bind(&flight.terminal_id)
        .bind(flight.status_id)
        .bind(flight.scheduled_departure)
        .bind(flight.actual_departure)
        .bind(flight.scheduled_arrival)
        .bind(flight.actual_arrival)
        .bind(&flight.gate)
        .bind(&flight.baggage_claim)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Into::into).ok_or_else(|| AppError::not_found("Flight", id))
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM flights WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(delete_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Flight", id));
        }
        tracing::info!(flight_id = %id, "Flight deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM flights")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(count)
    }
}
