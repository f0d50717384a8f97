use minden_core::AppError;

use crate::integration::common::{airline, airport, flight, seed_flight, setup_test_db};

#[tokio::test]
async fn health_check_and_seeded_statuses() {
    let (db, _container) = setup_test_db().await;

    db.health_check().await.unwrap();

    let statuses = db.flight_status_repo().list().await.unwrap();
    assert_eq!(statuses.len(), 8);
    assert_eq!(statuses[0].name, "Scheduled");

    let cancelled = db.flight_status_repo().get(8).await.unwrap().unwrap();
    assert_eq!(cancelled.name, "Cancelled");
    assert!(db.flight_status_repo().get(99).await.unwrap().is_none());
}

#[tokio::test]
async fn airline_crud_and_counts() {
    let (db, _container) = setup_test_db().await;
    let repo = db.airline_repo();

    repo.create(&airline("LH")).await.unwrap();
    let mut inactive = airline("XX");
    inactive.active = false;
    repo.create(&inactive).await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 2);
    assert_eq!(repo.count_active().await.unwrap(), 1);

    let mut changed = airline("LH");
    changed.name = "Lufthansa".into();
    changed.logo = Some("/logos/lh.png".into());
    let updated = repo.update("LH", &changed).await.unwrap();
    assert_eq!(updated.name, "Lufthansa");
    assert_eq!(updated.logo.as_deref(), Some("/logos/lh.png"));

    repo.delete("XX").await.unwrap();
    assert!(repo.get("XX").await.unwrap().is_none());
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_airline_is_conflict() {
    let (db, _container) = setup_test_db().await;
    let repo = db.airline_repo();

    repo.create(&airline("LH")).await.unwrap();
    let err = repo.create(&airline("LH")).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn overlong_code_is_a_validation_error() {
    let (db, _container) = setup_test_db().await;

    let err = db
        .airline_repo()
        .create(&airline("TOOLONGCODE"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn missing_records_are_not_found() {
    let (db, _container) = setup_test_db().await;

    let err = db
        .airport_repo()
        .update("ZZZ", &airport("ZZZ", "Nowhere"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = db.flight_repo().delete("NOPE1").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = db.airline_repo().delete("ZZ").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn flight_with_unknown_airport_is_validation_error() {
    let (db, _container) = setup_test_db().await;

    let err = db
        .flight_repo()
        .create(&flight("LH999", "FRA", "MUC", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn deleting_referenced_airport_is_conflict() {
    let (db, _container) = setup_test_db().await;
    seed_flight(&db).await;

    let err = db.airport_repo().delete("FRA").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn flights_ordered_and_paginated() {
    let (db, _container) = setup_test_db().await;
    let repo = db.flight_repo();
    seed_flight(&db).await;
    repo.create(&flight("LH050", "MUC", "FRA", 2)).await.unwrap();
    repo.create(&flight("LH001", "MUC", "FRA", -48)).await.unwrap();

    let all = repo.list().await.unwrap();
    let ids: Vec<_> = all.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, ["LH001", "LH050", "LH100"]);

    let recent = repo.list_recent(10).await.unwrap();
    let ids: Vec<_> = recent.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, ["LH050", "LH100"]);

    let page = repo
        .list_page(minden_core::PageRequest::new(Some(2), Some(2)))
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 1);

    let mut changed = flight("LH050", "MUC", "FRA", 3);
    changed.gate = Some("C7".into());
    changed.status_id = Some(7);
    let updated = repo.update("LH050", &changed).await.unwrap();
    assert_eq!(updated.gate.as_deref(), Some("C7"));
    assert_eq!(updated.status_id, Some(7));
}

#[tokio::test]
async fn maintenance_logs_round_trip() {
    let (db, _container) = setup_test_db().await;
    let repo = db.maintenance_repo();

    let now = chrono::Utc::now();
    let created = repo
        .create(&minden_core::NewMaintenanceLog {
            plane_id: "D-AIMA".into(),
            maintenance_date: now,
            description: "A-check".into(),
            technician: "M. Weber".into(),
            next_maintenance: Some(now + chrono::Duration::days(30)),
        })
        .await
        .unwrap();

    let fetched = repo.get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.description, "A-check");
    assert_eq!(repo.list().await.unwrap().len(), 1);
    assert!(repo.get(uuid::Uuid::new_v4()).await.unwrap().is_none());
}
