use axum::http::StatusCode;

use crate::integration::common::setup_test_app;

#[tokio::test]
async fn non_admin_is_forbidden() {
    let app = setup_test_app().await;
    let (_, token) = app.register("jane@minden.test").await;

    let (status, json) = app.get("/api/admin/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Admin access required");

    let (status, _) = app.get("/api/admin/users", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deactivated_admin_is_forbidden() {
    let app = setup_test_app().await;
    let (admin_id, token) = app.register_admin("admin@minden.test").await;
    app.db.user_repo().set_active(admin_id, false).await.unwrap();

    let (status, json) = app.get("/api/admin/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Account is deactivated");
}

#[tokio::test]
async fn dashboard_reports_statistics() {
    let app = setup_test_app().await;
    let (_, admin) = app.register_admin("admin@minden.test").await;
    app.seed_flight(&admin).await;

    let (status, json) = app.get("/api/admin/dashboard", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);

    let stats = &json["data"]["statistics"];
    assert_eq!(stats["totalFlights"], 1);
    assert_eq!(stats["totalAirports"], 2);
    assert_eq!(stats["totalAirlines"], 0);
    assert_eq!(stats["totalPassengers"], 1);
    assert_eq!(stats["revenue"], 0.0);
    assert_eq!(json["data"]["recentFlights"][0]["id"], "LH100");
}

#[tokio::test]
async fn list_users_paginates_with_fallbacks() {
    let app = setup_test_app().await;
    let (_, admin) = app.register_admin("admin@minden.test").await;
    for i in 0..3 {
        app.register(&format!("user{i}@minden.test")).await;
    }

    let (status, json) = app.get("/api/admin/users?page=2&limit=2", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pagination"]["page"], 2);
    assert_eq!(json["pagination"]["limit"], 2);
    assert_eq!(json["pagination"]["total"], 4);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    // Unparseable values fall back to page 1 / limit 50.
    let (status, json) = app
        .get("/api/admin/users?page=zero&limit=1000", Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pagination"]["page"], 1);
    assert_eq!(json["pagination"]["limit"], 50);
    assert_eq!(json["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn update_and_deactivate_user() {
    let app = setup_test_app().await;
    let (_, admin) = app.register_admin("admin@minden.test").await;
    let (user_id, _) = app.register("jane@minden.test").await;
    let uri = format!("/api/admin/users/{user_id}");

    let (status, json) = app
        .send(
            "PUT",
            &uri,
            Some(&admin),
            Some(serde_json::json!({"lastName": "Smith", "role": "staff"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["lastName"], "Smith");
    assert_eq!(json["data"]["firstName"], "Jane");
    assert_eq!(json["data"]["role"], "STAFF");

    let (status, _) = app
        .send(
            "PUT",
            &uri,
            Some(&admin),
            Some(serde_json::json!({"role": "pilot"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            "PUT",
            &uri,
            Some(&admin),
            Some(serde_json::json!({"email": "ADMIN@minden.test"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.send("DELETE", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = app.get(&uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["active"], false);

    let (status, _) = app
        .get(&format!("/api/admin/users/{}", uuid::Uuid::new_v4()), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn airline_crud() {
    let app = setup_test_app().await;
    let (_, admin) = app.register_admin("admin@minden.test").await;

    let body = serde_json::json!({"id": "lh", "name": "Lufthansa", "country": "Germany"});
    let (status, json) = app
        .send("POST", "/api/admin/airlines", Some(&admin), Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["id"], "LH");
    assert_eq!(json["data"]["active"], true);

    let (status, _) = app
        .send("POST", "/api/admin/airlines", Some(&admin), Some(body))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, json) = app
        .send(
            "PUT",
            "/api/admin/airlines/LH",
            Some(&admin),
            Some(serde_json::json!({
                "id": "LH", "name": "Lufthansa Group", "country": "Germany", "active": false
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "Lufthansa Group");

    let (status, json) = app.get("/api/airline/lh", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["active"], false);

    let (status, json) = app
        .send(
            "POST",
            "/api/admin/airlines",
            Some(&admin),
            Some(serde_json::json!({"id": "TOOLONGCODE", "name": "Nope", "country": "Germany"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{json}");

    let (status, _) = app
        .send("DELETE", "/api/admin/airlines/lh", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send("DELETE", "/api/admin/airlines/LH", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn referenced_airport_cannot_be_deleted() {
    let app = setup_test_app().await;
    let (_, admin) = app.register_admin("admin@minden.test").await;
    app.seed_flight(&admin).await;

    let (status, json) = app
        .send("DELETE", "/api/admin/airports/FRA", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{json}");

    let (status, _) = app
        .send("DELETE", "/api/admin/flights/LH100", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send("DELETE", "/api/admin/airports/FRA", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn flight_with_unknown_airport_is_rejected() {
    let app = setup_test_app().await;
    let (_, admin) = app.register_admin("admin@minden.test").await;
    let departure = chrono::Utc::now();

    let (status, json) = app
        .send(
            "POST",
            "/api/admin/flights",
            Some(&admin),
            Some(serde_json::json!({
                "id": "XX1",
                "from": "AAA",
                "to": "BBB",
                "pilotId": "P-1",
                "planeId": "D-ABCD",
                "scheduledDeparture": departure,
                "scheduledArrival": departure,
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn paginated_listings_and_maintenance_logs() {
    let app = setup_test_app().await;
    let (_, admin) = app.register_admin("admin@minden.test").await;
    app.seed_flight(&admin).await;

    for uri in ["/api/admin/flights", "/api/admin/tickets", "/api/admin/baggage"] {
        let (status, json) = app.get(uri, Some(&admin)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(json["pagination"]["page"], 1, "{uri}");
    }

    let (status, json) = app
        .send(
            "POST",
            "/api/admin/maintenance",
            Some(&admin),
            Some(serde_json::json!({
                "planeId": "D-AIMA",
                "maintenanceDate": "2026-01-10T08:00:00Z",
                "description": "A-check",
                "technician": "M. Weber",
                "nextMaintenance": "2026-04-10T08:00:00Z",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    let id = json["data"]["id"].as_str().unwrap().to_string();

    let (status, json) = app
        .get(&format!("/api/admin/maintenance/{id}"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["technician"], "M. Weber");

    let (status, json) = app.get("/api/admin/maintenance", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let (status, _) = app
        .send(
            "POST",
            "/api/admin/maintenance",
            Some(&admin),
            Some(serde_json::json!({
                "planeId": "D-AIMA",
                "maintenanceDate": "2026-01-10T08:00:00Z",
                "description": "A-check",
                "technician": "M. Weber",
                "nextMaintenance": "2025-01-10T08:00:00Z",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
