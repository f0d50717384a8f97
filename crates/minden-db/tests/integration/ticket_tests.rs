use minden_core::{AppError, NewTicket, PageRequest, TicketStatus};

use crate::integration::common::{new_user, seed_flight, setup_test_db};

fn ticket_for(user_id: uuid::Uuid, flight_id: &str, price: f64) -> NewTicket {
    NewTicket {
        airport_user_id: user_id,
        flight_id: flight_id.into(),
        seat_number: Some("12A".into()),
        travel_class: Some("Economy".into()),
        price,
    }
}

#[tokio::test]
async fn create_ticket_carries_flight_details() {
    let (db, _container) = setup_test_db().await;
    let flight = seed_flight(&db).await;
    let user = db
        .user_repo()
        .create(&new_user("jane@example.com"))
        .await
        .unwrap();

    let ticket = db
        .ticket_repo()
        .create(&ticket_for(user.id, &flight.id, 199.5))
        .await
        .unwrap();

    assert_eq!(ticket.status, TicketStatus::Confirmed);
    assert!(ticket.is_active());
    assert_eq!(ticket.from.as_deref(), Some("FRA"));
    assert_eq!(ticket.to.as_deref(), Some("MUC"));
    assert_eq!(ticket.gate.as_deref(), Some("A12"));
    assert!(ticket.departure_time.is_some());

    let fetched = db.ticket_repo().get(ticket.id).await.unwrap().unwrap();
    assert_eq!(fetched, ticket);

    let reloaded = db.user_repo().get_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.ticket_count, 1);
}

#[tokio::test]
async fn ticket_for_unknown_flight_is_validation_error() {
    let (db, _container) = setup_test_db().await;
    let user = db
        .user_repo()
        .create(&new_user("jane@example.com"))
        .await
        .unwrap();

    let err = db
        .ticket_repo()
        .create(&ticket_for(user.id, "NOPE1", 10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn revenue_excludes_cancelled_tickets() {
    let (db, _container) = setup_test_db().await;
    let flight = seed_flight(&db).await;
    let user = db
        .user_repo()
        .create(&new_user("jane@example.com"))
        .await
        .unwrap();
    let repo = db.ticket_repo();

    assert_eq!(repo.revenue().await.unwrap(), 0.0);

    repo.create(&ticket_for(user.id, &flight.id, 100.0))
        .await
        .unwrap();
    let cancelled = repo
        .create(&ticket_for(user.id, &flight.id, 50.0))
        .await
        .unwrap();
    sqlx::query("UPDATE tickets SET status = 'CANCELLED' WHERE id = $1")
        .bind(cancelled.id)
        .execute(db.pool())
        .await
        .unwrap();

    assert_eq!(repo.revenue().await.unwrap(), 100.0);
    assert_eq!(repo.count().await.unwrap(), 2);

    let mine = repo.list_by_user(user.id).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(
        mine.iter().filter(|t| t.is_active()).count(),
        1,
        "cancelled ticket must not count as active"
    );

    let page = repo
        .list_page(PageRequest::new(Some(1), Some(1)))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total, 2);
}
