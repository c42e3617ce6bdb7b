//! Exercises the administrative storage path, which has no HTTP surface.

use std::time::Duration;

use waitlist::storage;

use crate::helper::spawn_app;

#[tokio::test]
async fn update_subscription_status_flips_the_flag() {
    let app = spawn_app().await;
    app.post_subscribe(r#"{"name": "Ann Lee", "email": "ann@example.com", "subscribed": true}"#)
        .await;

    let updated = storage::update_subscription_status(&app.db_pool, "ann@example.com", false)
        .await
        .expect("The update should succeed.")
        .expect("The subscriber should exist.");

    assert!(!updated.subscribed_to_updates);
    assert!(updated.updated_at > updated.created_at);
}

#[tokio::test]
async fn update_subscription_status_returns_none_for_an_unknown_email() {
    let app = spawn_app().await;

    let updated = storage::update_subscription_status(&app.db_pool, "nobody@example.com", true)
        .await
        .expect("The update should succeed.");

    assert!(updated.is_none());
}

#[tokio::test]
async fn all_subscribers_lists_newest_first() {
    let app = spawn_app().await;

    app.post_subscribe(r#"{"name": "Ann Lee", "email": "ann@example.com"}"#)
        .await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    app.post_subscribe(r#"{"name": "Bea Cruz", "email": "bea@example.com"}"#)
        .await;

    let subscribers = storage::all_subscribers(&app.db_pool)
        .await
        .expect("The listing should succeed.");

    assert_eq!(2, subscribers.len());
    assert_eq!("bea@example.com", subscribers[0].email);
    assert_eq!("ann@example.com", subscribers[1].email);
}

#[tokio::test]
async fn email_exists_reflects_the_stored_rows() {
    let app = spawn_app().await;

    assert!(!storage::email_exists(&app.db_pool, "ann@example.com")
        .await
        .expect("The lookup should succeed."));

    app.post_subscribe(r#"{"name": "Ann Lee", "email": "ann@example.com"}"#)
        .await;

    assert!(storage::email_exists(&app.db_pool, "ann@example.com")
        .await
        .expect("The lookup should succeed."));
}
