use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Minden Airport API",
        version = "0.1.0",
        description = "Flights, bookings, baggage tracking and airport administration."
    ),
    paths(
        crate::routes::health,
        crate::routes::register,
        crate::routes::login,
        crate::routes::logout,
        crate::routes::profile,
        crate::routes::user_dashboard,
        crate::routes::refresh_token,
        crate::routes::list_airlines,
        crate::routes::get_airline,
        crate::routes::list_airports,
        crate::routes::get_airport,
        crate::routes::list_flight_statuses,
        crate::routes::get_flight_status,
        crate::routes::list_flights,
        crate::routes::get_flight,
        crate::routes::my_tickets,
        crate::routes::create_ticket,
        crate::routes::get_ticket,
        crate::routes::track_baggage,
        crate::routes::my_baggage,
        crate::routes::baggage_for_flight,
        crate::routes::get_baggage,
        crate::routes::create_baggage,
        crate::routes::update_baggage,
        crate::routes::delete_baggage,
        crate::routes::admin_dashboard,
        crate::routes::admin_list_users,
        crate::routes::admin_get_user,
        crate::routes::admin_update_user,
        crate::routes::admin_deactivate_user,
        crate::routes::admin_list_tickets,
        crate::routes::admin_list_baggage,
        crate::routes::admin_list_flights,
        crate::routes::create_flight,
        crate::routes::update_flight,
        crate::routes::delete_flight,
        crate::routes::create_airline,
        crate::routes::update_airline,
        crate::routes::delete_airline,
        crate::routes::create_airport,
        crate::routes::update_airport,
        crate::routes::delete_airport,
        crate::routes::list_maintenance,
        crate::routes::get_maintenance,
        crate::routes::create_maintenance,
    ),
    components(schemas(
        crate::dto::RegisterRequest,
        crate::dto::LoginRequest,
        crate::dto::AuthResponse,
        crate::dto::TokenResponse,
        crate::dto::UserResponse,
        crate::dto::UpdateUserRequest,
        crate::dto::UserStatistics,
        crate::dto::UserDashboardResponse,
        crate::dto::AirlineDto,
        crate::dto::AirportDto,
        crate::dto::FlightStatusResponse,
        crate::dto::FlightDto,
        crate::dto::TicketResponse,
        crate::dto::CreateTicketRequest,
        crate::dto::BaggageResponse,
        crate::dto::BaggageRequest,
        crate::dto::MaintenanceLogResponse,
        crate::dto::CreateMaintenanceLogRequest,
        crate::dto::AdminStatistics,
        crate::dto::AdminDashboardResponse,
        crate::dto::PaginationMeta,
        crate::dto::MessageResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Registration, login and the caller's account"),
        (name = "catalog", description = "Airlines, airports and flight statuses"),
        (name = "flights", description = "Flight schedule"),
        (name = "tickets", description = "Ticket booking"),
        (name = "baggage", description = "Baggage check-in and tracking"),
        (name = "admin", description = "Administration (ADMIN role only)"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the JWT bearer security scheme to the OpenAPI document.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Access token returned by /api/auth/login or /api/auth/register.",
                        ))
                        .build(),
                ),
            );
        }
    }
}
