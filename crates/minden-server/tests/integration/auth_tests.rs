use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use crate::integration::common::{TEST_PASSWORD, setup_test_app};

fn login_body(email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({"email": email, "password": password})
}

#[tokio::test]
async fn register_then_login() {
    let app = setup_test_app().await;
    let (user_id, token) = app.register("Jane.Doe@Minden.test").await;

    let (status, json) = app.get("/api/auth/profile", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["email"], "jane.doe@minden.test");
    assert_eq!(json["data"]["role"], "USER");
    assert!(json["data"].get("passwordHash").is_none());

    let (status, json) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(login_body("JANE.DOE@minden.test", TEST_PASSWORD)),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Login successful");
    assert_eq!(json["data"]["user"]["id"], user_id.to_string());
    assert!(json["data"]["user"]["lastLogin"].is_string());
}

#[tokio::test]
async fn login_sets_http_only_cookie() {
    let app = setup_test_app().await;
    app.register("jane@minden.test").await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::post("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&login_body("jane@minden.test", TEST_PASSWORD)).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn logout_clears_cookie() {
    let app = setup_test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(Request::post("/api/auth/logout").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers().get(header::SET_COOKIE).unwrap();
    assert!(cookie.to_str().unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn duplicate_email_is_a_conflict_regardless_of_case() {
    let app = setup_test_app().await;
    app.register("jane@minden.test").await;

    let (status, json) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(serde_json::json!({
                "firstName": "Jane",
                "lastName": "Again",
                "email": "JANE@minden.test",
                "password": TEST_PASSWORD,
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "conflict");
}

#[tokio::test]
async fn register_validates_input() {
    let app = setup_test_app().await;

    for body in [
        serde_json::json!({"firstName": "", "lastName": "Doe", "email": "a@b.c", "password": "secret1"}),
        serde_json::json!({"firstName": "Jane", "lastName": "Doe", "email": "nope", "password": "secret1"}),
        serde_json::json!({"firstName": "Jane", "lastName": "Doe", "email": "a@b.c", "password": "12345"}),
    ] {
        let (status, json) = app.send("POST", "/api/auth/register", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{json}");
    }
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = setup_test_app().await;
    app.register("jane@minden.test").await;

    let (status, wrong_password) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(login_body("jane@minden.test", "wrong-password")),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(login_body("ghost@minden.test", TEST_PASSWORD)),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password["message"], unknown["message"]);
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = setup_test_app().await;

    let (status, json) = app.get("/api/auth/profile", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "missing_token");

    let (status, json) = app.get("/api/ticket/my", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "invalid_token");

    let response = app
        .router
        .clone()
        .oneshot(
            Request::get("/api/auth/profile")
                .header("authorization", "Token abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deactivated_user_cannot_log_in() {
    let app = setup_test_app().await;
    let (user_id, _) = app.register("jane@minden.test").await;
    app.db.user_repo().set_active(user_id, false).await.unwrap();

    let (status, json) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(login_body("jane@minden.test", TEST_PASSWORD)),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Account is deactivated");
}

#[tokio::test]
async fn refresh_issues_a_new_token() {
    let app = setup_test_app().await;
    let (_, token) = app.register("jane@minden.test").await;

    let (status, json) = app.send("POST", "/api/auth/refresh", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let refreshed = json["data"]["token"].as_str().unwrap();
    let (status, _) = app.get("/api/auth/profile", Some(refreshed)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn user_dashboard_summarizes_bookings() {
    let app = setup_test_app().await;
    let (_, admin) = app.register_admin("admin@minden.test").await;
    app.seed_flight(&admin).await;
    let (_, token) = app.register("jane@minden.test").await;

    for price in [100.0, 50.0, 20.0, 10.0, 10.0, 10.0] {
        let (status, _) = app
            .send(
                "POST",
                "/api/ticket",
                Some(&token),
                Some(serde_json::json!({"flightId": "LH100", "price": price})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, json) = app.get("/api/auth/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["statistics"]["totalTickets"], 6);
    assert_eq!(json["data"]["statistics"]["activeTickets"], 6);
    assert_eq!(json["data"]["statistics"]["totalSpent"], 200.0);
    assert_eq!(json["data"]["user"]["ticketCount"], 6);
    assert_eq!(json["data"]["recentTickets"].as_array().unwrap().len(), 6);
}
