pub mod airline_repository;
pub mod airport_repository;
pub mod baggage_repository;
pub mod config;
pub mod database;
pub mod flight_repository;
pub mod flight_status_repository;
pub mod maintenance_repository;
pub mod ticket_repository;
pub mod user_repository;

pub use airline_repository::AirlineRepository;
pub use airport_repository::AirportRepository;
pub use baggage_repository::BaggageRepository;
pub use config::DatabaseConfig;
pub use database::Database;
pub use flight_repository::FlightRepository;
pub use flight_status_repository::FlightStatusRepository;
pub use maintenance_repository::MaintenanceLogRepository;
pub use ticket_repository::TicketRepository;
pub use user_repository::UserRepository;
