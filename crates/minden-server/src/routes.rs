use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Extension, Router, middleware};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use minden_core::password::{hash_password, validate_password, verify_password};
use minden_core::{
    AirportUser, AppError, BaggageStatus, BaggageUpdate, NewBaggage, NewMaintenanceLog, NewTicket,
    NewUser, Ticket, UserRole, UserUpdate, normalize_code,
};

use crate::auth::{AuthUser, IssuedToken, require_admin, require_auth};
use crate::dto::{
    AdminDashboardResponse, AdminStatistics, AirlineDto, AirportDto, AuthResponse,
    BaggageRequest, BaggageResponse, CountedResponse, CreateMaintenanceLogRequest,
    CreateTicketRequest, DataResponse, ErrorResponse, FlightDto, FlightStatusResponse,
    HealthResponse, LoginRequest, MaintenanceLogResponse, MessageResponse, PaginatedResponse,
    PaginationQuery, RegisterRequest, TicketResponse, TokenResponse, TrackBaggageQuery,
    UpdateUserRequest, UserDashboardResponse, UserResponse, UserStatistics,
};
use crate::error::{ApiError, ApiJson};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Number of upcoming flights shown on the admin dashboard.
const DASHBOARD_RECENT_FLIGHTS: i64 = 10;

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let admin = Router::new()
        .route("/dashboard", get(admin_dashboard))
        .route("/users", get(admin_list_users))
        .route(
            "/users/{id}",
            get(admin_get_user)
                .put(admin_update_user)
                .delete(admin_deactivate_user),
        )
        .route("/tickets", get(admin_list_tickets))
        .route("/baggage", get(admin_list_baggage))
        .route("/flights", get(admin_list_flights).post(create_flight))
        .route("/flights/{id}", put(update_flight).delete(delete_flight))
        .route("/airlines", post(create_airline))
        .route("/airlines/{id}", put(update_airline).delete(delete_airline))
        .route("/airports", post(create_airport))
        .route("/airports/{id}", put(update_airport).delete(delete_airport))
        .route("/maintenance", get(list_maintenance).post(create_maintenance))
        .route("/maintenance/{id}", get(get_maintenance))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let protected = Router::new()
        .route("/auth/profile", get(profile))
        .route("/auth/dashboard", get(user_dashboard))
        .route("/auth/refresh", post(refresh_token))
        .route("/ticket", post(create_ticket))
        .route("/ticket/my", get(my_tickets))
        .route("/ticket/{id}", get(get_ticket))
        .route("/baggage", post(create_baggage))
        .route("/baggage/my", get(my_baggage))
        .route("/baggage/flight/{flight_id}", get(baggage_for_flight))
        .route(
            "/baggage/{id}",
            get(get_baggage).put(update_baggage).delete(delete_baggage),
        )
        .nest("/admin", admin)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/airline", get(list_airlines))
        .route("/airline/{id}", get(get_airline))
        .route("/airport", get(list_airports))
        .route("/airport/{id}", get(get_airport))
        .route("/flightStatus", get(list_flight_statuses))
        .route("/flightStatus/{id}", get(get_flight_status))
        .route("/flight", get(list_flights))
        .route("/flight/{id}", get(get_flight))
        .route("/baggage/track", get(track_baggage));

    Router::new()
        .nest("/api", public.merge(protected))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_uuid(raw: &str, entity: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::Validation(format!("Invalid {entity} id: {raw}")))
}

fn parse_baggage_status(raw: Option<&str>) -> Result<Option<BaggageStatus>, AppError> {
    raw.map(|s| s.parse().map_err(AppError::Validation))
        .transpose()
}

fn check_baggage_size(size: i32) -> Result<(), AppError> {
    if (1..=3).contains(&size) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Size must be 1 (carry-on), 2 (checked) or 3 (oversized), got {size}"
        )))
    }
}

/// Totals over every booking of a user, cancelled ones included.
fn user_statistics(tickets: &[Ticket]) -> UserStatistics {
    UserStatistics {
        total_tickets: tickets.len(),
        active_tickets: tickets.iter().filter(|t| t.is_active()).count(),
        total_spent: tickets.iter().map(|t| t.price).sum(),
    }
}

fn token_cookie(issued: &IssuedToken) -> String {
    let max_age = (issued.expires_at - chrono::Utc::now()).num_seconds().max(0);
    format!(
        "token={}; Path=/; Max-Age={max_age}; HttpOnly; SameSite=Lax",
        issued.token
    )
}

const CLEAR_TOKEN_COOKIE: &str = "token=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

/// Load the caller's account, used to decide whether non-owners may proceed.
async fn caller_is_admin(state: &AppState, auth: &AuthUser) -> Result<bool, AppError> {
    let user = state.db.user_repo().get_by_id(auth.user_id).await?;
    Ok(user.is_some_and(|u| u.active && u.role.is_admin()))
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(HealthResponse {
                status: "healthy".to_string(),
                database: "ok".to_string(),
            }),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                axum::Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    database: "unreachable".to_string(),
                }),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created; `data` holds the token and user", body = AuthResponse),
        (status = 400, description = "Invalid registration data", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.first_name.trim().is_empty() || body.last_name.trim().is_empty() {
        return Err(AppError::Validation("First and last name are required".into()).into());
    }
    let email = AirportUser::normalize_email(&body.email);
    if !email.contains('@') {
        return Err(AppError::Validation("A valid email address is required".into()).into());
    }
    validate_password(&body.password)?;

    let repo = state.db.user_repo();
    if repo.email_exists(&email).await? {
        return Err(AppError::Conflict("Email already registered".into()).into());
    }

    let user = repo
        .create(&NewUser {
            first_name: body.first_name,
            last_name: body.last_name,
            birthdate: body.birthdate,
            password_hash: hash_password(&body.password)?,
            email,
            phone: body.phone.filter(|p| !p.trim().is_empty()),
            role: UserRole::User,
        })
        .await?;

    let issued = state.jwt.issue_token(user.id, &user.email)?;
    let cookie = token_cookie(&issued);
    let response = DataResponse::with_message(
        AuthResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            user: user.into(),
        },
        "User registered successfully",
    );

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        axum::Json(response),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; `data` holds the token and user", body = AuthResponse),
        (status = 401, description = "Invalid credentials or deactivated account", body = ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let invalid = || AppError::Unauthorized("Invalid email or password".into());

    let repo = state.db.user_repo();
    let mut user = repo.get_by_email(&body.email).await?.ok_or_else(invalid)?;

    if !verify_password(&body.password, &user.password_hash) {
        tracing::info!(user_id = %user.id, "Failed login attempt");
        return Err(invalid().into());
    }
    if !user.active {
        return Err(AppError::Unauthorized("Account is deactivated".into()).into());
    }

    repo.update_last_login(user.id).await?;
    user.last_login = Some(chrono::Utc::now());
    let issued = state.jwt.issue_token(user.id, &user.email)?;
    let cookie = token_cookie(&issued);
    let response = DataResponse::with_message(
        AuthResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            user: user.into(),
        },
        "Login successful",
    );

    Ok(([(header::SET_COOKIE, cookie)], axum::Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Token cookie cleared", body = MessageResponse),
    ),
    tag = "auth"
)]
pub async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, CLEAR_TOKEN_COOKIE)],
        axum::Json(MessageResponse {
            message: "Logout successful".to_string(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses(
        (status = 200, description = "Current user in a `data` envelope", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .user_repo()
        .get_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(axum::Json(DataResponse::new(UserResponse::from(user))))
}

#[utoipa::path(
    get,
    path = "/api/auth/dashboard",
    responses(
        (status = 200, description = "User, booking statistics and recent tickets", body = UserDashboardResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn user_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .user_repo()
        .get_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let tickets = state.db.ticket_repo().list_by_user(auth.user_id).await?;
    let statistics = user_statistics(&tickets);

    let response = UserDashboardResponse {
        user: user.into(),
        statistics,
        recent_tickets: tickets.into_iter().map(TicketResponse::from).collect(),
    };

    Ok(axum::Json(DataResponse::new(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    responses(
        (status = 200, description = "New token in a `data` envelope", body = TokenResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let issued = state.jwt.issue_token(auth.user_id, &auth.email)?;
    let cookie = token_cookie(&issued);

    Ok((
        [(header::SET_COOKIE, cookie)],
        axum::Json(DataResponse::new(TokenResponse {
            token: issued.token,
            expires_at: issued.expires_at,
        })),
    ))
}

// ---------------------------------------------------------------------------
// Catalog (public)
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/airline",
    responses((status = 200, description = "All airlines", body = Vec<AirlineDto>)),
    tag = "catalog"
)]
pub async fn list_airlines(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let airlines = state.db.airline_repo().list().await?;
    Ok(axum::Json(
        airlines.into_iter().map(AirlineDto::from).collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/airline/{id}",
    params(("id" = String, Path, description = "Airline IATA code")),
    responses(
        (status = 200, description = "Airline", body = AirlineDto),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    tag = "catalog"
)]
pub async fn get_airline(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = normalize_code(&id);
    let airline = state
        .db
        .airline_repo()
        .get(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Airline", &id))?;
    Ok(axum::Json(AirlineDto::from(airline)))
}

#[utoipa::path(
    get,
    path = "/api/airport",
    responses((status = 200, description = "All airports", body = Vec<AirportDto>)),
    tag = "catalog"
)]
pub async fn list_airports(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let airports = state.db.airport_repo().list().await?;
    Ok(axum::Json(
        airports.into_iter().map(AirportDto::from).collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/airport/{id}",
    params(("id" = String, Path, description = "Airport IATA code")),
    responses(
        (status = 200, description = "Airport", body = AirportDto),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    tag = "catalog"
)]
pub async fn get_airport(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = normalize_code(&id);
    let airport = state
        .db
        .airport_repo()
        .get(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Airport", &id))?;
    Ok(axum::Json(AirportDto::from(airport)))
}

#[utoipa::path(
    get,
    path = "/api/flightStatus",
    responses((status = 200, description = "All flight statuses", body = Vec<FlightStatusResponse>)),
    tag = "catalog"
)]
pub async fn list_flight_statuses(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let statuses = state.db.flight_status_repo().list().await?;
    Ok(axum::Json(
        statuses
            .into_iter()
            .map(FlightStatusResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/flightStatus/{id}",
    params(("id" = i32, Path, description = "Flight status id")),
    responses(
        (status = 200, description = "Flight status", body = FlightStatusResponse),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    tag = "catalog"
)]
pub async fn get_flight_status(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: i32 = raw_id
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid flight status id: {raw_id}")))?;

    let status = state
        .db
        .flight_status_repo()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Flight status", id))?;
    Ok(axum::Json(FlightStatusResponse::from(status)))
}

#[utoipa::path(
    get,
    path = "/api/flight",
    responses((status = 200, description = "All flights by scheduled departure", body = Vec<FlightDto>)),
    tag = "flights"
)]
pub async fn list_flights(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let flights = state.db.flight_repo().list().await?;
    Ok(axum::Json(
        flights.into_iter().map(FlightDto::from).collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/flight/{id}",
    params(("id" = String, Path, description = "Flight number")),
    responses(
        (status = 200, description = "Flight", body = FlightDto),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    tag = "flights"
)]
pub async fn get_flight(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = normalize_code(&id);
    let flight = state
        .db
        .flight_repo()
        .get(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Flight", &id))?;
    Ok(axum::Json(FlightDto::from(flight)))
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/ticket/my",
    responses(
        (status = 200, description = "Caller's tickets with `count`", body = Vec<TicketResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "tickets"
)]
pub async fn my_tickets(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let tickets = state.db.ticket_repo().list_by_user(auth.user_id).await?;

    Ok(axum::Json(CountedResponse {
        count: tickets.len(),
        data: tickets.into_iter().map(TicketResponse::from).collect(),
        message: "Tickets retrieved successfully".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/ticket",
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Ticket booked, in a `data` envelope", body = TicketResponse),
        (status = 400, description = "Unknown flight or invalid data", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "tickets"
)]
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    ApiJson(body): ApiJson<CreateTicketRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let flight_id = normalize_code(&body.flight_id);
    if flight_id.is_empty() {
        return Err(AppError::Validation("Flight ID is required".into()).into());
    }
    if body.price < 0.0 {
        return Err(AppError::Validation("Price must not be negative".into()).into());
    }
    if state.db.flight_repo().get(&flight_id).await?.is_none() {
        return Err(AppError::Validation(format!("Flight does not exist: {flight_id}")).into());
    }

    let ticket = state
        .db
        .ticket_repo()
        .create(&NewTicket {
            airport_user_id: auth.user_id,
            flight_id,
            seat_number: body.seat_number,
            travel_class: body.travel_class,
            price: body.price,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        axum::Json(DataResponse::with_message(
            TicketResponse::from(ticket),
            "Ticket booked successfully",
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/ticket/{id}",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket in a `data` envelope", body = TicketResponse),
        (status = 403, description = "Ticket belongs to someone else", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "tickets"
)]
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_uuid(&raw_id, "ticket")?;
    let ticket = state
        .db
        .ticket_repo()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Ticket", id))?;

    if ticket.airport_user_id != auth.user_id && !caller_is_admin(&state, &auth).await? {
        return Err(AppError::Forbidden("You can only view your own tickets".into()).into());
    }

    Ok(axum::Json(DataResponse::new(TicketResponse::from(ticket))))
}

// ---------------------------------------------------------------------------
// Baggage
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/baggage/track",
    params(TrackBaggageQuery),
    responses(
        (status = 200, description = "Baggage in a `data` envelope", body = BaggageResponse),
        (status = 400, description = "Tracking number missing", body = ErrorResponse),
        (status = 404, description = "Unknown tracking number", body = ErrorResponse),
    ),
    tag = "baggage"
)]
pub async fn track_baggage(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TrackBaggageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let tracking = query
        .tracking
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Tracking number is required".into()))?;

    let baggage = state
        .db
        .baggage_repo()
        .get_by_tracking_number(&tracking)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Baggage not found with the provided tracking number".into())
        })?;

    Ok(axum::Json(DataResponse::new(BaggageResponse::from(baggage))))
}

#[utoipa::path(
    get,
    path = "/api/baggage/my",
    responses(
        (status = 200, description = "Caller's baggage with `count`", body = Vec<BaggageResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "baggage"
)]
pub async fn my_baggage(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.db.baggage_repo().list_by_user(auth.user_id).await?;

    Ok(axum::Json(CountedResponse {
        count: items.len(),
        data: items.into_iter().map(BaggageResponse::from).collect(),
        message: "Baggage retrieved successfully".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/baggage/flight/{flight_id}",
    params(("flight_id" = String, Path, description = "Flight number")),
    responses(
        (status = 200, description = "Baggage checked onto the flight", body = Vec<BaggageResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "baggage"
)]
pub async fn baggage_for_flight(
    State(state): State<Arc<AppState>>,
    Path(flight_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let flight_id = normalize_code(&flight_id);
    let items = state.db.baggage_repo().list_by_flight(&flight_id).await?;

    Ok(axum::Json(DataResponse::with_message(
        items
            .into_iter()
            .map(BaggageResponse::from)
            .collect::<Vec<_>>(),
        "Flight baggage retrieved successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/baggage/{id}",
    params(("id" = Uuid, Path, description = "Baggage ID")),
    responses(
        (status = 200, description = "Baggage in a `data` envelope", body = BaggageResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "baggage"
)]
pub async fn get_baggage(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_uuid(&raw_id, "baggage")?;
    let baggage = state
        .db
        .baggage_repo()
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Baggage not found".into()))?;

    Ok(axum::Json(DataResponse::new(BaggageResponse::from(baggage))))
}

#[utoipa::path(
    post,
    path = "/api/baggage",
    request_body = BaggageRequest,
    responses(
        (status = 201, description = "Baggage checked in, in a `data` envelope", body = BaggageResponse),
        (status = 400, description = "Missing flight, non-positive weight or bad size", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "baggage"
)]
pub async fn create_baggage(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    ApiJson(body): ApiJson<BaggageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let flight_id = body
        .flight_id
        .map(|f| normalize_code(&f))
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::Validation("Flight ID is required".into()))?;
    if body.weight <= 0.0 {
        return Err(AppError::Validation("Weight must be greater than 0".into()).into());
    }
    let size = body.size.unwrap_or(2);
    check_baggage_size(size)?;

    let baggage = state
        .db
        .baggage_repo()
        .create(&NewBaggage {
            airport_user_id: auth.user_id,
            flight_id,
            size,
            weight: body.weight,
            tracking_number: None,
            status: parse_baggage_status(body.status.as_deref())?,
            special_handling: body.special_handling,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        axum::Json(DataResponse::with_message(
            BaggageResponse::from(baggage),
            "Baggage created successfully",
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/baggage/{id}",
    params(("id" = Uuid, Path, description = "Baggage ID")),
    request_body = BaggageRequest,
    responses(
        (status = 200, description = "Updated baggage in a `data` envelope", body = BaggageResponse),
        (status = 400, description = "Non-positive weight or bad status", body = ErrorResponse),
        (status = 403, description = "Baggage belongs to someone else", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "baggage"
)]
pub async fn update_baggage(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(raw_id): Path<String>,
    ApiJson(body): ApiJson<BaggageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_uuid(&raw_id, "baggage")?;
    let repo = state.db.baggage_repo();
    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Baggage not found".into()))?;

    if existing.airport_user_id != auth.user_id {
        return Err(AppError::Forbidden("You can only update your own baggage".into()).into());
    }
    if body.weight <= 0.0 {
        return Err(AppError::Validation("Weight must be greater than 0".into()).into());
    }

    let size = body.size.unwrap_or(existing.size);
    check_baggage_size(size)?;

    let update = BaggageUpdate {
        flight_id: body
            .flight_id
            .map(|f| normalize_code(&f))
            .filter(|f| !f.is_empty())
            .unwrap_or(existing.flight_id),
        size,
        weight: body.weight,
        status: parse_baggage_status(body.status.as_deref())?.unwrap_or(existing.status),
        special_handling: body.special_handling.or(existing.special_handling),
    };
    let baggage = repo.update(id, &update).await?;

    Ok(axum::Json(DataResponse::with_message(
        BaggageResponse::from(baggage),
        "Baggage updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/baggage/{id}",
    params(("id" = Uuid, Path, description = "Baggage ID")),
    responses(
        (status = 200, description = "Baggage deleted", body = MessageResponse),
        (status = 403, description = "Baggage belongs to someone else", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "baggage"
)]
pub async fn delete_baggage(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_uuid(&raw_id, "baggage")?;
    let repo = state.db.baggage_repo();
    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Baggage not found".into()))?;

    if existing.airport_user_id != auth.user_id {
        return Err(AppError::Forbidden("You can only delete your own baggage".into()).into());
    }

    repo.delete(id).await?;
    Ok(axum::Json(MessageResponse {
        message: "Baggage deleted successfully".to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Admin: dashboard & users
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "System statistics in a `data` envelope", body = AdminDashboardResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn admin_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let db = &state.db;
    let statistics = AdminStatistics {
        total_flights: db.flight_repo().count().await?,
        total_airports: db.airport_repo().count().await?,
        total_airlines: db.airline_repo().count().await?,
        active_airlines: db.airline_repo().count_active().await?,
        total_passengers: db.user_repo().count().await?,
        total_baggage: db.baggage_repo().count().await?,
        revenue: db.ticket_repo().revenue().await?,
    };

    let response = AdminDashboardResponse {
        statistics,
        recent_flights: db
            .flight_repo()
            .list_recent(DASHBOARD_RECENT_FLIGHTS)
            .await?
            .into_iter()
            .map(FlightDto::from)
            .collect(),
        airports: db
            .airport_repo()
            .list()
            .await?
            .into_iter()
            .map(AirportDto::from)
            .collect(),
        airlines: db
            .airline_repo()
            .list()
            .await?
            .into_iter()
            .map(AirlineDto::from)
            .collect(),
    };

    Ok(axum::Json(DataResponse::with_message(
        response,
        "Dashboard data retrieved successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(PaginationQuery),
    responses(
        (status = 200, description = "One page of users with `pagination`", body = Vec<UserResponse>),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn admin_list_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state.db.user_repo().list(query.to_request()).await?;
    Ok(axum::Json(PaginatedResponse::<UserResponse>::from_page(
        page,
        "Users retrieved successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User in a `data` envelope", body = UserResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn admin_get_user(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_uuid(&raw_id, "user")?;
    let user = state
        .db
        .user_repo()
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(axum::Json(DataResponse::new(UserResponse::from(user))))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user in a `data` envelope", body = UserResponse),
        (status = 400, description = "Invalid role or email", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn admin_update_user(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    ApiJson(body): ApiJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_uuid(&raw_id, "user")?;

    let role = body
        .role
        .as_deref()
        .map(|r| r.parse::<UserRole>().map_err(AppError::Validation))
        .transpose()?;
    let email = body.email.as_deref().map(AirportUser::normalize_email);
    if email.as_deref().is_some_and(|e| !e.contains('@')) {
        return Err(AppError::Validation("A valid email address is required".into()).into());
    }
    let non_blank = |s: Option<String>| s.filter(|v| !v.trim().is_empty());

    let update = UserUpdate {
        first_name: non_blank(body.first_name),
        last_name: non_blank(body.last_name),
        email,
        phone: body.phone,
        active: body.active,
        role,
    };
    let user = state.db.user_repo().update_by_admin(id, &update).await?;

    Ok(axum::Json(DataResponse::with_message(
        UserResponse::from(user),
        "User updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deactivated", body = MessageResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn admin_deactivate_user(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_uuid(&raw_id, "user")?;
    state.db.user_repo().set_active(id, false).await?;

    Ok(axum::Json(MessageResponse {
        message: "User deactivated successfully".to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Admin: paginated listings
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/admin/tickets",
    params(PaginationQuery),
    responses(
        (status = 200, description = "One page of tickets with `pagination`", body = Vec<TicketResponse>),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn admin_list_tickets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state.db.ticket_repo().list_page(query.to_request()).await?;
    Ok(axum::Json(PaginatedResponse::<TicketResponse>::from_page(
        page,
        "Tickets retrieved successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/admin/baggage",
    params(PaginationQuery),
    responses(
        (status = 200, description = "One page of baggage with `pagination`", body = Vec<BaggageResponse>),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn admin_list_baggage(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .db
        .baggage_repo()
        .list_page(query.to_request())
        .await?;
    Ok(axum::Json(PaginatedResponse::<BaggageResponse>::from_page(
        page,
        "Baggage retrieved successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/admin/flights",
    params(PaginationQuery),
    responses(
        (status = 200, description = "One page of flights with `pagination`", body = Vec<FlightDto>),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn admin_list_flights(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state.db.flight_repo().list_page(query.to_request()).await?;
    Ok(axum::Json(PaginatedResponse::<FlightDto>::from_page(
        page,
        "Flights retrieved successfully",
    )))
}

// ---------------------------------------------------------------------------
// Admin: flights, airlines, airports
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/admin/flights",
    request_body = FlightDto,
    responses(
        (status = 201, description = "Flight created, in a `data` envelope", body = FlightDto),
        (status = 400, description = "Invalid data or unknown airport/airline/status", body = ErrorResponse),
        (status = 409, description = "Flight number already exists", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn create_flight(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<FlightDto>,
) -> Result<impl IntoResponse, ApiError> {
    let flight: minden_core::Flight = body.into();
    if flight.id.is_empty() {
        return Err(AppError::Validation("Flight ID is required".into()).into());
    }
    if flight.scheduled_arrival < flight.scheduled_departure {
        return Err(
            AppError::Validation("Scheduled arrival must not precede departure".into()).into(),
        );
    }

    let created = state.db.flight_repo().create(&flight).await?;
    Ok((
        StatusCode::CREATED,
        axum::Json(DataResponse::with_message(
            FlightDto::from(created),
            "Flight created successfully",
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/flights/{id}",
    params(("id" = String, Path, description = "Flight number")),
    request_body = FlightDto,
    responses(
        (status = 200, description = "Updated flight in a `data` envelope", body = FlightDto),
        (status = 400, description = "Invalid data", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn update_flight(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<FlightDto>,
) -> Result<impl IntoResponse, ApiError> {
    let id = normalize_code(&id);
    let flight: minden_core::Flight = body.into();
    if flight.scheduled_arrival < flight.scheduled_departure {
        return Err(
            AppError::Validation("Scheduled arrival must not precede departure".into()).into(),
        );
    }

    let updated = state.db.flight_repo().update(&id, &flight).await?;
    Ok(axum::Json(DataResponse::with_message(
        FlightDto::from(updated),
        "Flight updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/admin/flights/{id}",
    params(("id" = String, Path, description = "Flight number")),
    responses(
        (status = 200, description = "Flight deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 409, description = "Flight still has tickets or baggage", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn delete_flight(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = normalize_code(&id);
    state.db.flight_repo().delete(&id).await?;
    Ok(axum::Json(MessageResponse {
        message: "Flight deleted successfully".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/airlines",
    request_body = AirlineDto,
    responses(
        (status = 201, description = "Airline created, in a `data` envelope", body = AirlineDto),
        (status = 409, description = "Airline code already exists", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn create_airline(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<AirlineDto>,
) -> Result<impl IntoResponse, ApiError> {
    let airline: minden_core::Airline = body.into();
    if airline.id.is_empty() || airline.name.trim().is_empty() {
        return Err(AppError::Validation("Airline code and name are required".into()).into());
    }

    let created = state.db.airline_repo().create(&airline).await?;
    Ok((
        StatusCode::CREATED,
        axum::Json(DataResponse::with_message(
            AirlineDto::from(created),
            "Airline created successfully",
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/airlines/{id}",
    params(("id" = String, Path, description = "Airline IATA code")),
    request_body = AirlineDto,
    responses(
        (status = 200, description = "Updated airline in a `data` envelope", body = AirlineDto),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn update_airline(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<AirlineDto>,
) -> Result<impl IntoResponse, ApiError> {
    let id = normalize_code(&id);
    let updated = state.db.airline_repo().update(&id, &body.into()).await?;
    Ok(axum::Json(DataResponse::with_message(
        AirlineDto::from(updated),
        "Airline updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/admin/airlines/{id}",
    params(("id" = String, Path, description = "Airline IATA code")),
    responses(
        (status = 200, description = "Airline deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 409, description = "Airline still operates flights", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn delete_airline(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = normalize_code(&id);
    state.db.airline_repo().delete(&id).await?;
    Ok(axum::Json(MessageResponse {
        message: "Airline deleted successfully".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/admin/airports",
    request_body = AirportDto,
    responses(
        (status = 201, description = "Airport created, in a `data` envelope", body = AirportDto),
        (status = 409, description = "Airport code already exists", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn create_airport(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<AirportDto>,
) -> Result<impl IntoResponse, ApiError> {
    let airport: minden_core::Airport = body.into();
    if airport.id.is_empty() || airport.name.trim().is_empty() {
        return Err(AppError::Validation("Airport code and name are required".into()).into());
    }

    let created = state.db.airport_repo().create(&airport).await?;
    Ok((
        StatusCode::CREATED,
        axum::Json(DataResponse::with_message(
            AirportDto::from(created),
            "Airport created successfully",
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/airports/{id}",
    params(("id" = String, Path, description = "Airport IATA code")),
    request_body = AirportDto,
    responses(
        (status = 200, description = "Updated airport in a `data` envelope", body = AirportDto),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn update_airport(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<AirportDto>,
) -> Result<impl IntoResponse, ApiError> {
    let id = normalize_code(&id);
    let updated = state.db.airport_repo().update(&id, &body.into()).await?;
    Ok(axum::Json(DataResponse::with_message(
        AirportDto::from(updated),
        "Airport updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/admin/airports/{id}",
    params(("id" = String, Path, description = "Airport IATA code")),
    responses(
        (status = 200, description = "Airport deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 409, description = "Airport still referenced by flights", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn delete_airport(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = normalize_code(&id);
    state.db.airport_repo().delete(&id).await?;
    Ok(axum::Json(MessageResponse {
        message: "Airport deleted successfully".to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Admin: maintenance logs
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/admin/maintenance",
    responses(
        (status = 200, description = "All maintenance logs in a `data` envelope", body = Vec<MaintenanceLogResponse>),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn list_maintenance(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let logs = state.db.maintenance_repo().list().await?;
    Ok(axum::Json(DataResponse::new(
        logs.into_iter()
            .map(MaintenanceLogResponse::from)
            .collect::<Vec<_>>(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/admin/maintenance/{id}",
    params(("id" = Uuid, Path, description = "Maintenance log ID")),
    responses(
        (status = 200, description = "Maintenance log in a `data` envelope", body = MaintenanceLogResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn get_maintenance(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_uuid(&raw_id, "maintenance log")?;
    let log = state
        .db
        .maintenance_repo()
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Maintenance log", id))?;

    Ok(axum::Json(DataResponse::new(MaintenanceLogResponse::from(
        log,
    ))))
}

#[utoipa::path(
    post,
    path = "/api/admin/maintenance",
    request_body = CreateMaintenanceLogRequest,
    responses(
        (status = 201, description = "Log created, in a `data` envelope", body = MaintenanceLogResponse),
        (status = 400, description = "Invalid data", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "admin"
)]
pub async fn create_maintenance(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CreateMaintenanceLogRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.plane_id.trim().is_empty() || body.technician.trim().is_empty() {
        return Err(AppError::Validation("Plane and technician are required".into()).into());
    }
    if body
        .next_maintenance
        .is_some_and(|next| next < body.maintenance_date)
    {
        return Err(AppError::Validation(
            "Next maintenance must not precede the maintenance date".into(),
        )
        .into());
    }

    let log = state
        .db
        .maintenance_repo()
        .create(&NewMaintenanceLog {
            plane_id: body.plane_id.trim().to_string(),
            maintenance_date: body.maintenance_date,
            description: body.description,
            technician: body.technician,
            next_maintenance: body.next_maintenance,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        axum::Json(DataResponse::with_message(
            MaintenanceLogResponse::from(log),
            "Maintenance log created successfully",
        )),
    ))
}
