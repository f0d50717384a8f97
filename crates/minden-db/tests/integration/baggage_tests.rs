use minden_core::{AppError, BaggageStatus, BaggageUpdate, NewBaggage, PageRequest};

use crate::integration::common::{new_user, seed_flight, setup_test_db};

fn bag(user_id: uuid::Uuid, flight_id: &str) -> NewBaggage {
    NewBaggage {
        airport_user_id: user_id,
        flight_id: flight_id.into(),
        size: 2,
        weight: 23.5,
        tracking_number: None,
        status: None,
        special_handling: Some("Fragile".into()),
    }
}

#[tokio::test]
async fn create_and_fetch_returns_same_fields() {
    let (db, _container) = setup_test_db().await;
    let flight = seed_flight(&db).await;
    let user = db
        .user_repo()
        .create(&new_user("jane@example.com"))
        .await
        .unwrap();
    let repo = db.baggage_repo();

    let created = repo.create(&bag(user.id, &flight.id)).await.unwrap();
    assert!(created.tracking_number.starts_with("BAG"));
    assert_eq!(created.tracking_number.len(), 11);
    assert_eq!(created.status, BaggageStatus::Checked);

    let fetched = repo.get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    let tracked = repo
        .get_by_tracking_number(&created.tracking_number)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(tracked.id, created.id);
    assert!(
        repo.get_by_tracking_number("BAG00000000")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn explicit_tracking_number_must_be_unique() {
    let (db, _container) = setup_test_db().await;
    let flight = seed_flight(&db).await;
    let user = db
        .user_repo()
        .create(&new_user("jane@example.com"))
        .await
        .unwrap();
    let repo = db.baggage_repo();

    let mut first = bag(user.id, &flight.id);
    first.tracking_number = Some("BAGFIXED01".into());
    repo.create(&first).await.unwrap();

    let err = repo.create(&first).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn non_positive_weight_is_rejected_by_schema() {
    let (db, _container) = setup_test_db().await;
    let flight = seed_flight(&db).await;
    let user = db
        .user_repo()
        .create(&new_user("jane@example.com"))
        .await
        .unwrap();

    let mut heavy_nothing = bag(user.id, &flight.id);
    heavy_nothing.weight = 0.0;
    let err = db.baggage_repo().create(&heavy_nothing).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn size_outside_known_classes_is_rejected_by_schema() {
    let (db, _container) = setup_test_db().await;
    let flight = seed_flight(&db).await;
    let user = db
        .user_repo()
        .create(&new_user("jane@example.com"))
        .await
        .unwrap();

    let mut crate_sized = bag(user.id, &flight.id);
    crate_sized.size = 5;
    let err = db.baggage_repo().create(&crate_sized).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn update_delete_and_listings() {
    let (db, _container) = setup_test_db().await;
    let flight = seed_flight(&db).await;
    let user = db
        .user_repo()
        .create(&new_user("jane@example.com"))
        .await
        .unwrap();
    let repo = db.baggage_repo();

    let first = repo.create(&bag(user.id, &flight.id)).await.unwrap();
    let second = repo.create(&bag(user.id, &flight.id)).await.unwrap();

    let updated = repo
        .update(
            first.id,
            &BaggageUpdate {
                flight_id: flight.id.clone(),
                size: 3,
                weight: 31.0,
                status: BaggageStatus::InTransit,
                special_handling: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, BaggageStatus::InTransit);
    assert_eq!(updated.size, 3);
    assert_eq!(updated.tracking_number, first.tracking_number);
    assert!(updated.special_handling.is_none());

    assert_eq!(repo.list_by_user(user.id).await.unwrap().len(), 2);
    assert_eq!(repo.list_by_flight(&flight.id).await.unwrap().len(), 2);
    assert!(repo.list_by_flight("LH999").await.unwrap().is_empty());

    repo.delete(second.id).await.unwrap();
    assert!(repo.get(second.id).await.unwrap().is_none());
    assert!(matches!(
        repo.delete(second.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));

    let page = repo.list_page(PageRequest::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(repo.count().await.unwrap(), 1);
}
