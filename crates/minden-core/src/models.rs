use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Access level of an airport user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Staff,
    Manager,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Staff => "STAFF",
            UserRole::Manager => "MANAGER",
            UserRole::Admin => "ADMIN",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USER" => Ok(UserRole::User),
            "STAFF" => Ok(UserRole::Staff),
            "MANAGER" => Ok(UserRole::Manager),
            "ADMIN" => Ok(UserRole::Admin),
            _ => Err(format!("Unknown user role: {s}")),
        }
    }
}

/// Booking state of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Confirmed,
    CheckedIn,
    Cancelled,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Confirmed => "CONFIRMED",
            TicketStatus::CheckedIn => "CHECKED_IN",
            TicketStatus::Cancelled => "CANCELLED",
        }
    }

    /// Confirmed and checked-in tickets count as active.
    pub fn is_active(&self) -> bool {
        matches!(self, TicketStatus::Confirmed | TicketStatus::CheckedIn)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CONFIRMED" => Ok(TicketStatus::Confirmed),
            "CHECKED_IN" => Ok(TicketStatus::CheckedIn),
            "CANCELLED" => Ok(TicketStatus::Cancelled),
            _ => Err(format!("Unknown ticket status: {s}")),
        }
    }
}

/// Handling state of a baggage item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BaggageStatus {
    #[default]
    Checked,
    InTransit,
    Delivered,
    Lost,
}

impl BaggageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaggageStatus::Checked => "CHECKED",
            BaggageStatus::InTransit => "IN_TRANSIT",
            BaggageStatus::Delivered => "DELIVERED",
            BaggageStatus::Lost => "LOST",
        }
    }
}

impl fmt::Display for BaggageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BaggageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CHECKED" => Ok(BaggageStatus::Checked),
            "IN_TRANSIT" => Ok(BaggageStatus::InTransit),
            "DELIVERED" => Ok(BaggageStatus::Delivered),
            "LOST" => Ok(BaggageStatus::Lost),
            _ => Err(format!("Unknown baggage status: {s}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog: airlines, airports, flight statuses
// ---------------------------------------------------------------------------

/// Canonical form of an operator-chosen code (airline, airport, flight
/// number): trimmed and uppercase. Applied on every write and every lookup.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// An airline, keyed by its IATA code (e.g. "LH").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airline {
    pub id: String,
    pub name: String,
    pub country: String,
    /// URL or path to the airline logo
    pub logo: Option<String>,
    pub active: bool,
}

/// An airport, keyed by its IATA code (e.g. "FRA").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    pub id: String,
    pub name: String,
    pub country: String,
    pub city: String,
    pub timezone: String,
    /// Elevation above sea level in feet
    pub elevation: f64,
    pub number_of_terminals: i32,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightStatus {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Flights
// ---------------------------------------------------------------------------

/// A scheduled flight. Also used as the create/update input, since the
/// flight number is chosen by the operator rather than generated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flight {
    pub id: String,
    /// Origin airport code
    pub from: String,
    /// Destination airport code
    pub to: String,
    pub airline_id: Option<String>,
    pub pilot_id: String,
    pub plane_id: String,
    pub terminal_id: Option<String>,
    /// References [`FlightStatus::id`]
    pub status_id: Option<i32>,
    pub scheduled_departure: DateTime<Utc>,
    pub actual_departure: Option<DateTime<Utc>>,
    pub scheduled_arrival: DateTime<Utc>,
    pub actual_arrival: Option<DateTime<Utc>>,
    pub gate: Option<String>,
    pub baggage_claim: Option<String>,
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

/// A booked ticket. `from`, `to`, `gate`, `baggage_claim` and
/// `departure_time` are read from the referenced flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    pub id: Uuid,
    pub airport_user_id: Uuid,
    pub flight_id: String,
    pub seat_number: Option<String>,
    pub travel_class: Option<String>,
    pub price: f64,
    pub booking_date: DateTime<Utc>,
    pub status: TicketStatus,
    pub from: Option<String>,
    pub to: Option<String>,
    pub gate: Option<String>,
    pub baggage_claim: Option<String>,
    pub departure_time: Option<DateTime<Utc>>,
}

impl Ticket {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// DTO for inserting a new ticket.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub airport_user_id: Uuid,
    pub flight_id: String,
    pub seat_number: Option<String>,
    pub travel_class: Option<String>,
    pub price: f64,
}

// ---------------------------------------------------------------------------
// Baggage
// ---------------------------------------------------------------------------

/// A tracked baggage item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Baggage {
    pub id: Uuid,
    pub airport_user_id: Uuid,
    pub flight_id: String,
    /// Size category: 1 = carry-on, 2 = checked, 3 = oversized
    pub size: i32,
    /// Weight in pounds
    pub weight: f64,
    pub tracking_number: String,
    pub status: BaggageStatus,
    pub special_handling: Option<String>,
}

impl Baggage {
    /// Generate a customer-facing tracking number like `BAG1A2B3C4D`.
    pub fn generate_tracking_number() -> String {
        let simple = Uuid::new_v4().simple().to_string();
        format!("BAG{}", simple[..8].to_uppercase())
    }
}

/// DTO for inserting a new baggage item.
#[derive(Debug, Clone)]
pub struct NewBaggage {
    pub airport_user_id: Uuid,
    pub flight_id: String,
    pub size: i32,
    pub weight: f64,
    /// Generated when absent
    pub tracking_number: Option<String>,
    /// Defaults to [`BaggageStatus::Checked`]
    pub status: Option<BaggageStatus>,
    pub special_handling: Option<String>,
}

/// Mutable fields of a baggage item. Owner and tracking number are fixed.
#[derive(Debug, Clone)]
pub struct BaggageUpdate {
    pub flight_id: String,
    pub size: i32,
    pub weight: f64,
    pub status: BaggageStatus,
    pub special_handling: Option<String>,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A registered account. The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirportUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birthdate: Option<NaiveDate>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub active: bool,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Number of tickets booked by this user
    pub ticket_count: i64,
}

impl AirportUser {
    /// Emails are stored trimmed and lowercased.
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

/// DTO for inserting a new user. `password_hash` must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub birthdate: Option<NaiveDate>,
    pub password_hash: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
}

/// Partial update applied by an administrator. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
    pub role: Option<UserRole>,
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceLog {
    pub id: Uuid,
    pub plane_id: String,
    pub maintenance_date: DateTime<Utc>,
    pub description: String,
    pub technician: String,
    pub next_maintenance: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewMaintenanceLog {
    pub plane_id: String,
    pub maintenance_date: DateTime<Utc>,
    pub description: String,
    pub technician: String,
    pub next_maintenance: Option<DateTime<Utc>>,
}
