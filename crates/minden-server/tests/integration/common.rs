use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Duration;
use http_body_util::BodyExt;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use tower::ServiceExt;
use uuid::Uuid;

use minden_core::UserRole;
use minden_db::Database;
use minden_server::auth::JwtConfig;
use minden_server::routes;
use minden_server::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret";
pub const TEST_PASSWORD: &str = "hunter22";

pub struct TestApp {
    pub router: Router,
    pub db: Database,
    /// Dropping the container stops PostgreSQL.
    _container: ContainerAsync<GenericImage>,
}

/// Spin up a PostgreSQL container, migrate it and build the router.
pub async fn setup_test_app() -> TestApp {
    let container = GenericImage::new("postgres", "16")
        .with_exposed_port(ContainerPort::Tcp(5432))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_PASSWORD", "postgres")
        .with_env_var("POSTGRES_DB", "minden_test")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get port");

    let url = format!("postgresql://postgres:postgres@{host}:{port}/minden_test");
    let db = Database::from_pool(retry_connect(&url).await);
    db.migrate().await.expect("Failed to run migrations");

    let state = Arc::new(AppState {
        db: db.clone(),
        jwt: JwtConfig::new(TEST_JWT_SECRET, Duration::hours(24)),
    });

    TestApp {
        router: routes::router(state),
        db,
        _container: container,
    }
}

async fn retry_connect(url: &str) -> PgPool {
    for _ in 0..30 {
        if let Ok(pool) = PgPoolOptions::new().max_connections(5).connect(url).await {
            return pool;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
    panic!("Failed to connect to test database");
}

impl TestApp {
    /// Send a request and return the status and parsed JSON body
    /// (`Null` for empty bodies).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        self.send("GET", uri, token, None).await
    }

    /// Register an account and return its id and access token.
    pub async fn register(&self, email: &str) -> (Uuid, String) {
        let (status, json) = self
            .send(
                "POST",
                "/api/auth/register",
                None,
                Some(serde_json::json!({
                    "firstName": "Jane",
                    "lastName": "Doe",
                    "email": email,
                    "password": TEST_PASSWORD,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {json}");

        let id = json["data"]["user"]["id"].as_str().unwrap().parse().unwrap();
        let token = json["data"]["token"].as_str().unwrap().to_string();
        (id, token)
    }

    /// Register an account and promote it to ADMIN.
    pub async fn register_admin(&self, email: &str) -> (Uuid, String) {
        let (id, token) = self.register(email).await;
        self.db
            .user_repo()
            .set_role(id, UserRole::Admin)
            .await
            .unwrap();
        (id, token)
    }

    /// Create FRA and MUC plus flight LH100 between them through the admin API.
    pub async fn seed_flight(&self, admin_token: &str) {
        for (code, city) in [("FRA", "Frankfurt"), ("MUC", "Munich")] {
            let (status, json) = self
                .send(
                    "POST",
                    "/api/admin/airports",
                    Some(admin_token),
                    Some(serde_json::json!({
                        "id": code,
                        "name": format!("{city} Airport"),
                        "country": "Germany",
                        "city": city,
                        "timezone": "Europe/Berlin",
                    })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED, "airport create failed: {json}");
        }

        let departure = chrono::Utc::now() + Duration::hours(24);
        let (status, json) = self
            .send(
                "POST",
                "/api/admin/flights",
                Some(admin_token),
                Some(serde_json::json!({
                    "id": "LH100",
                    "from": "FRA",
                    "to": "MUC",
                    "pilotId": "P-1",
                    "planeId": "D-AIMA",
                    "statusId": 1,
                    "scheduledDeparture": departure,
                    "scheduledArrival": departure + Duration::hours(1),
                    "gate": "A12",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "flight create failed: {json}");
    }
}
