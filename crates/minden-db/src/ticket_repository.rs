use chrono::{DateTime, Utc};
use minden_core::{AppError, NewTicket, Page, PageRequest, Ticket, TicketStatus};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use crate::database::db_error;

#[derive(Clone)]
pub struct TicketRepository {
    pool: Pool<Postgres>,
}

impl TicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: Uuid,
    airport_user_id: Uuid,
    flight_id: String,
    seat_number: Option<String>,
    travel_class: Option<String>,
    price: f64,
    booking_date: DateTime<Utc>,
    status: String,
    from_airport: Option<String>,
    to_airport: Option<String>,
    gate: Option<String>,
    baggage_claim: Option<String>,
    departure_time: Option<DateTime<Utc>>,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            id: row.id,
            airport_user_id: row.airport_user_id,
            flight_id: row.flight_id,
            seat_number: row.seat_number,
            travel_class: row.travel_class,
            price: row.price,
            booking_date: row.booking_date,
            status: row.status.parse().unwrap_or(TicketStatus::Confirmed),
            from: row.from_airport,
            to: row.to_airport,
            gate: row.gate,
            baggage_claim: row.baggage_claim,
            departure_time: row.departure_time,
        }
    }
}

/// Ticket columns joined with the flight-derived read-only fields.
/// Expects the ticket relation aliased as `t`.
const TICKET_SELECT: &str = "SELECT t.id, t.airport_user_id, t.flight_id, t.seat_number, \
     t.travel_class, t.price, t.booking_date, t.status, \
     f.from_airport, f.to_airport, f.gate, f.baggage_claim, \
     f.scheduled_departure AS departure_time";

impl TicketRepository {
    pub async fn get(&self, id: Uuid) -> Result<Option<Ticket>, AppError> {
        let row = sqlx::query_as::<_, TicketRow>(&format!(
            "{TICKET_SELECT}
             FROM tickets t LEFT JOIN flights f ON f.id = t.flight_id
             WHERE t.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    /// Tickets booked by one user, newest booking first.
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Ticket>, AppError> {
        let rows = sqlx::query_as::<_, TicketRow>(&format!(
            "{TICKET_SELECT}
             FROM tickets t LEFT JOIN flights f ON f.id = t.flight_id
             WHERE t.airport_user_id = $1
             ORDER BY t.booking_date DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn list_page(&self, request: PageRequest) -> Result<Page<Ticket>, AppError> {
        let rows = sqlx::query_as::<_, TicketRow>(&format!(
            "{TICKET_SELECT}
             FROM tickets t LEFT JOIN flights f ON f.id = t.flight_id
             ORDER BY t.booking_date DESC, t.id
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

    /// Book a ticket. New tickets always start out `CONFIRMED`.
    pub async fn create(&self, ticket: &NewTicket) -> Result<Ticket, AppError> {
        let row = sqlx::query_as::<_, TicketRow>(&format!(
            "WITH t AS (
                INSERT INTO tickets (airport_user_id, flight_id, seat_number, travel_class, price, status)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
             )
             {TICKET_SELECT}
             FROM t LEFT JOIN flights f ON f.id = t.flight_id"
        ))
        .bind(ticket.airport_user_id)
        .bind(&ticket.flight_id)
        .bind(&ticket.seat_number)
        .bind(&ticket.travel_class)
        .bind(ticket.price)
        .bind(TicketStatus::Confirmed.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        tracing::info!(
            ticket_id = %row.id,
            user_id = %row.airport_user_id,
            flight_id = %row.flight_id,
            "Ticket booked"
        );
        Ok(row.into())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tickets")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(count)
    }

    /// Sum of ticket prices, excluding cancelled tickets.
    pub async fn revenue(&self) -> Result<f64, AppError> {
        let (revenue,): (f64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(price), 0)::DOUBLE PRECISION FROM tickets WHERE status <> $1",
        )
        .bind(TicketStatus::Cancelled.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(revenue)
    }
}
