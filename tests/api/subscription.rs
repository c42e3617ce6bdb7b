use sqlx::Row;
use uuid::Uuid;

use crate::helper::spawn_app;

#[tokio::test]
async fn subscribe_returns_200_and_the_new_id_for_valid_data() {
    let app = spawn_app().await;

    let body = r#"{"name": "Ann Lee", "email": "ANN@Example.com", "subscribed": true}"#;
    let response = app.post_subscribe(body).await;

    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.expect("The body should be JSON.");
    assert_eq!(Some(true), body["success"].as_bool());
    assert!(Uuid::parse_str(body["data"]["id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn subscribe_persists_the_sanitized_subscriber() {
    let app = spawn_app().await;

    let body = r#"{"name": "  Ann   Lee ", "email": " ANN@Example.com", "subscribed": true}"#;
    app.post_subscribe(body).await;

    let saved = sqlx::query("SELECT name, email, subscribed_to_updates FROM subscribers")
        .fetch_one(&app.db_pool)
        .await
        .expect("The saved subscriber should exist.");

    assert_eq!("Ann Lee", saved.get::<String, _>("name"));
    assert_eq!("ann@example.com", saved.get::<String, _>("email"));
    assert!(saved.get::<bool, _>("subscribed_to_updates"));
}

#[tokio::test]
async fn the_opt_in_flag_defaults_to_false_when_omitted() {
    let app = spawn_app().await;

    let body = r#"{"name": "Ann Lee", "email": "ann@example.com"}"#;
    app.post_subscribe(body).await;

    let saved = sqlx::query("SELECT subscribed_to_updates FROM subscribers")
        .fetch_one(&app.db_pool)
        .await
        .expect("The saved subscriber should exist.");

    assert!(!saved.get::<bool, _>("subscribed_to_updates"));
}

#[tokio::test]
async fn subscribe_returns_400_when_fields_are_present_but_invalid() {
    let app = spawn_app().await;
    let test_cases = vec![
        (r#"{"name": "", "email": "ann@example.com"}"#, "empty name"),
        (r#"{"name": "A", "email": "ann@example.com"}"#, "one-letter name"),
        (r#"{"name": "Ann 3rd", "email": "ann@example.com"}"#, "digits in name"),
        (r#"{"name": "Ann Lee", "email": ""}"#, "empty email"),
        (r#"{"name": "Ann Lee", "email": "not-an-email"}"#, "email without an at sign"),
        (r#"{"name": "Ann Lee", "email": "ann@localhost"}"#, "email without a tld"),
    ];

    for (body, description) in test_cases {
        let response = app.post_subscribe(body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request when the payload was {}.",
            description
        );

        let body: serde_json::Value = response.json().await.expect("The body should be JSON.");
        assert_eq!(Some(false), body["success"].as_bool());
        assert!(!body["error"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn subscribe_returns_400_when_the_body_is_not_json() {
    let app = spawn_app().await;
    let test_cases = vec![
        ("{not json", "a syntax error"),
        (r#"{"name": "Ann Lee"}"#, "a missing email field"),
        (r#"{"email": "ann@example.com"}"#, "a missing name field"),
        ("{}", "an empty object"),
    ];

    for (body, description) in test_cases {
        let response = app.post_subscribe(body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request for {}.",
            description
        );

        let body: serde_json::Value = response.json().await.expect("The body should be JSON.");
        assert_eq!(Some(false), body["success"].as_bool());
    }
}

#[tokio::test]
async fn subscribing_twice_with_the_same_email_returns_409() {
    let app = spawn_app().await;

    let first = app
        .post_subscribe(r#"{"name": "Ann Lee", "email": "ann@example.com"}"#)
        .await;
    assert_eq!(200, first.status().as_u16());

    let second = app
        .post_subscribe(r#"{"name": "Ann Lee", "email": "ann@example.com"}"#)
        .await;
    assert_eq!(409, second.status().as_u16());

    let body: serde_json::Value = second.json().await.expect("The body should be JSON.");
    assert_eq!(
        Some("This email is already subscribed"),
        body["error"].as_str()
    );
}

#[tokio::test]
async fn duplicate_detection_is_case_and_whitespace_insensitive() {
    let app = spawn_app().await;

    app.post_subscribe(r#"{"name": "Ann Lee", "email": "ann@example.com"}"#)
        .await;
    let second = app
        .post_subscribe(r#"{"name": "Ann Lee", "email": "  ANN@EXAMPLE.COM "}"#)
        .await;

    assert_eq!(409, second.status().as_u16());

    let count = sqlx::query("SELECT COUNT(*) AS count FROM subscribers")
        .fetch_one(&app.db_pool)
        .await
        .expect("The count query should succeed.")
        .get::<i64, _>("count");
    assert_eq!(1, count);
}

#[tokio::test]
async fn subscribe_rejects_get_requests() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(format!("{}/api/subscribe", app.addr))
        .send()
        .await
        .expect("The request should succeed.");

    assert_eq!(405, response.status().as_u16());
}
