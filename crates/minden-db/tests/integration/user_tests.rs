use minden_core::{AppError, PageRequest, UserRole, UserUpdate};

use crate::integration::common::{new_user, setup_test_db};

#[tokio::test]
async fn create_user_normalizes_email_and_defaults() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();

    let user = repo.create(&new_user("  Jane@Example.COM ")).await.unwrap();

    assert_eq!(user.email, "jane@example.com");
    assert_eq!(user.role, UserRole::User);
    assert!(user.active);
    assert!(user.last_login.is_none());
    assert_eq!(user.ticket_count, 0);

    let by_email = repo.get_by_email("JANE@example.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);
    assert!(repo.email_exists("jane@EXAMPLE.com").await.unwrap());
    assert!(!repo.email_exists("john@example.com").await.unwrap());
}

#[tokio::test]
async fn duplicate_email_in_any_case_is_conflict() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();

    repo.create(&new_user("jane@example.com")).await.unwrap();
    let err = repo.create(&new_user("JANE@example.com")).await.unwrap_err();

    match err {
        AppError::Conflict(msg) => assert_eq!(msg, "Email already registered"),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn last_login_activation_and_role() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();
    let user = repo.create(&new_user("jane@example.com")).await.unwrap();

    repo.update_last_login(user.id).await.unwrap();
    repo.set_active(user.id, false).await.unwrap();
    repo.set_role(user.id, UserRole::Admin).await.unwrap();

    let reloaded = repo.get_by_id(user.id).await.unwrap().unwrap();
    assert!(reloaded.last_login.is_some());
    assert!(!reloaded.active);
    assert_eq!(reloaded.role, UserRole::Admin);

    let missing = uuid::Uuid::new_v4();
    assert!(matches!(
        repo.set_active(missing, true).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        repo.set_role(missing, UserRole::Staff).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn update_by_admin_is_partial() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();
    let user = repo.create(&new_user("jane@example.com")).await.unwrap();

    let updated = repo
        .update_by_admin(
            user.id,
            &UserUpdate {
                phone: Some("+49 69 1234".into()),
                role: Some(UserRole::Manager),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.first_name, "Jane");
    assert_eq!(updated.email, "jane@example.com");
    assert_eq!(updated.phone.as_deref(), Some("+49 69 1234"));
    assert_eq!(updated.role, UserRole::Manager);
    assert!(updated.active);

    let err = repo
        .update_by_admin(uuid::Uuid::new_v4(), &UserUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn update_by_admin_rejects_taken_email() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();
    repo.create(&new_user("jane@example.com")).await.unwrap();
    let john = repo.create(&new_user("john@example.com")).await.unwrap();

    let err = repo
        .update_by_admin(
            john.id,
            &UserUpdate {
                email: Some("Jane@Example.com".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn list_users_paginates() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();
    for i in 0..5 {
        repo.create(&new_user(&format!("user{i}@example.com")))
            .await
            .unwrap();
    }

    let first = repo.list(PageRequest::new(Some(1), Some(2))).await.unwrap();
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.total, 5);

    let last = repo.list(PageRequest::new(Some(3), Some(2))).await.unwrap();
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.page, 3);
    assert_eq!(repo.count().await.unwrap(), 5);
}
