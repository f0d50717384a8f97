pub mod error;
pub mod models;
pub mod pagination;
pub mod password;

pub use error::AppError;
pub use models::{
    Airline, Airport, AirportUser, Baggage, BaggageStatus, BaggageUpdate, Flight, FlightStatus,
    MaintenanceLog, NewBaggage, NewMaintenanceLog, NewTicket, NewUser, Ticket, TicketStatus,
    UserRole, UserUpdate, normalize_code,
};
pub use pagination::{Page, PageRequest};
