use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use minden_core::{
    Airline, Airport, AirportUser, Baggage, Flight, FlightStatus, MaintenanceLog, Page,
    PageRequest, Ticket, normalize_code,
};

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// `{"data": ..., "message": ...}` wrapper used by most non-catalog endpoints.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: Some(message.into()),
        }
    }
}

/// The caller's own records plus how many there are.
#[derive(Debug, Serialize)]
pub struct CountedResponse<T> {
    pub data: Vec<T>,
    pub count: usize,
    pub message: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
    pub message: String,
}

impl<T> PaginatedResponse<T> {
    pub fn from_page<M>(page: Page<M>, message: impl Into<String>) -> Self
    where
        T: From<M>,
    {
        let page = page.map(T::from);
        Self {
            pagination: PaginationMeta {
                page: page.page,
                limit: page.limit,
                total: page.total,
            },
            data: page.items,
            message: message.into(),
        }
    }
}

/// Raw `page`/`limit` query values. Anything unparseable falls back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct PaginationQuery {
    /// Page number, starting at 1
    pub page: Option<String>,
    /// Page size, 1 to 100 (default 50)
    pub limit: Option<String>,
}

impl PaginationQuery {
    pub fn to_request(&self) -> PageRequest {
        PageRequest::parse(self.page.as_deref(), self.limit.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub birthdate: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Account details without the password hash.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub active: bool,
    pub role: String,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub ticket_count: i64,
}

impl From<AirportUser> for UserResponse {
    fn from(user: AirportUser) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            birthdate: user.birthdate,
            active: user.active,
            role: user.role.to_string(),
            last_login: user.last_login,
            created_at: user.created_at,
            ticket_count: user.ticket_count,
        }
    }
}

/// Partial user update. Omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
    /// One of USER, STAFF, MANAGER, ADMIN
    pub role: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStatistics {
    pub total_tickets: usize,
    pub active_tickets: usize,
    pub total_spent: f64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDashboardResponse {
    pub user: UserResponse,
    pub statistics: UserStatistics,
    pub recent_tickets: Vec<TicketResponse>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AirlineDto {
    pub id: String,
    pub name: String,
    pub country: String,
    pub logo: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl From<Airline> for AirlineDto {
    fn from(a: Airline) -> Self {
        Self {
            id: a.id,
            name: a.name,
            country: a.country,
            logo: a.logo,
            active: a.active,
        }
    }
}

impl From<AirlineDto> for Airline {
    fn from(a: AirlineDto) -> Self {
        Self {
            id: normalize_code(&a.id),
            name: a.name,
            country: a.country,
            logo: a.logo,
            active: a.active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AirportDto {
    pub id: String,
    pub name: String,
    pub country: String,
    pub city: String,
    pub timezone: String,
    #[serde(default)]
    pub elevation: f64,
    #[serde(default)]
    pub number_of_terminals: i32,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

impl From<Airport> for AirportDto {
    fn from(a: Airport) -> Self {
        Self {
            id: a.id,
            name: a.name,
            country: a.country,
            city: a.city,
            timezone: a.timezone,
            elevation: a.elevation,
            number_of_terminals: a.number_of_terminals,
            latitude: a.latitude,
            longitude: a.longitude,
        }
    }
}

impl From<AirportDto> for Airport {
    fn from(a: AirportDto) -> Self {
        Self {
            id: normalize_code(&a.id),
            name: a.name,
            country: a.country,
            city: a.city,
            timezone: a.timezone,
            elevation: a.elevation,
            number_of_terminals: a.number_of_terminals,
            latitude: a.latitude,
            longitude: a.longitude,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FlightStatusResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<FlightStatus> for FlightStatusResponse {
    fn from(s: FlightStatus) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.description,
        }
    }
}

// ---------------------------------------------------------------------------
// Flights
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlightDto {
    pub id: String,
    pub from: String,
    pub to: String,
    pub airline_id: Option<String>,
    pub pilot_id: String,
    pub plane_id: String,
    pub terminal_id: Option<String>,
    pub status_id: Option<i32>,
    pub scheduled_departure: DateTime<Utc>,
    pub actual_departure: Option<DateTime<Utc>>,
    pub scheduled_arrival: DateTime<Utc>,
    pub actual_arrival: Option<DateTime<Utc>>,
    pub gate: Option<String>,
    pub baggage_claim: Option<String>,
}

impl From<Flight> for FlightDto {
    fn from(f: Flight) -> Self {
        Self {
            id: f.id,
            from: f.from,
            to: f.to,
            airline_id: f.airline_id,
            pilot_id: f.pilot_id,
            plane_id: f.plane_id,
            terminal_id: f.terminal_id,
            status_id: f.status_id,
            scheduled_departure: f.scheduled_departure,
            actual_departure: f.actual_departure,
            scheduled_arrival: f.scheduled_arrival,
            actual_arrival: f.actual_arrival,
            gate: f.gate,
            baggage_claim: f.baggage_claim,
        }
    }
}

impl From<FlightDto> for Flight {
    fn from(f: FlightDto) -> Self {
        Self {
            id: normalize_code(&f.id),
            from: normalize_code(&f.from),
            to: normalize_code(&f.to),
            airline_id: f
                .airline_id
                .map(|a| normalize_code(&a))
                .filter(|a| !a.is_empty()),
            pilot_id: f.pilot_id,
            plane_id: f.plane_id,
            terminal_id: f.terminal_id,
            status_id: f.status_id,
            scheduled_departure: f.scheduled_departure,
            actual_departure: f.actual_departure,
            scheduled_arrival: f.scheduled_arrival,
            actual_arrival: f.actual_arrival,
            gate: f.gate,
            baggage_claim: f.baggage_claim,
        }
    }
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    pub id: Uuid,
    pub airport_user_id: Uuid,
    /// Flight id
    pub flight: String,
    pub seat_number: Option<String>,
    pub travel_class: Option<String>,
    pub price: f64,
    pub booking_date: DateTime<Utc>,
    pub status: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub gate: Option<String>,
    pub baggage_claim: Option<String>,
    pub departure_time: Option<DateTime<Utc>>,
}

impl From<Ticket> for TicketResponse {
    fn from(t: Ticket) -> Self {
        Self {
            id: t.id,
            airport_user_id: t.airport_user_id,
            flight: t.flight_id,
            seat_number: t.seat_number,
            travel_class: t.travel_class,
            price: t.price,
            booking_date: t.booking_date,
            status: t.status.to_string(),
            from: t.from,
            to: t.to,
            gate: t.gate,
            baggage_claim: t.baggage_claim,
            departure_time: t.departure_time,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    #[serde(alias = "flight")]
    pub flight_id: String,
    pub seat_number: Option<String>,
    pub travel_class: Option<String>,
    #[serde(default)]
    pub price: f64,
}

// ---------------------------------------------------------------------------
// Baggage
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaggageResponse {
    pub id: Uuid,
    pub airport_user_id: Uuid,
    pub flight_id: String,
    pub size: i32,
    pub weight: f64,
    pub tracking_number: String,
    pub status: String,
    pub special_handling: Option<String>,
}

impl From<Baggage> for BaggageResponse {
    fn from(b: Baggage) -> Self {
        Self {
            id: b.id,
            airport_user_id: b.airport_user_id,
            flight_id: b.flight_id,
            size: b.size,
            weight: b.weight,
            tracking_number: b.tracking_number,
            status: b.status.to_string(),
            special_handling: b.special_handling,
        }
    }
}

/// Body for creating or updating a baggage item. The owner is always the caller.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaggageRequest {
    pub flight_id: Option<String>,
    /// 1 = carry-on, 2 = checked, 3 = oversized (default 2 on create)
    pub size: Option<i32>,
    pub weight: f64,
    /// One of CHECKED, IN_TRANSIT, DELIVERED, LOST
    pub status: Option<String>,
    pub special_handling: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct TrackBaggageQuery {
    /// Tracking number, e.g. BAG1A2B3C4D
    pub tracking: Option<String>,
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLogResponse {
    pub id: Uuid,
    pub plane_id: String,
    pub maintenance_date: DateTime<Utc>,
    pub description: String,
    pub technician: String,
    pub next_maintenance: Option<DateTime<Utc>>,
}

impl From<MaintenanceLog> for MaintenanceLogResponse {
    fn from(m: MaintenanceLog) -> Self {
        Self {
            id: m.id,
            plane_id: m.plane_id,
            maintenance_date: m.maintenance_date,
            description: m.description,
            technician: m.technician,
            next_maintenance: m.next_maintenance,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceLogRequest {
    pub plane_id: String,
    pub maintenance_date: DateTime<Utc>,
    pub description: String,
    pub technician: String,
    pub next_maintenance: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Admin dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatistics {
    pub total_flights: i64,
    pub total_airports: i64,
    pub total_airlines: i64,
    pub active_airlines: i64,
    pub total_passengers: i64,
    pub total_baggage: i64,
    pub revenue: f64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardResponse {
    pub statistics: AdminStatistics,
    pub recent_flights: Vec<FlightDto>,
    pub airports: Vec<AirportDto>,
    pub airlines: Vec<AirlineDto>,
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
