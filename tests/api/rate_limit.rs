use sqlx::Row;

use crate::helper::spawn_app_with;

#[tokio::test]
async fn requests_over_the_ceiling_are_answered_with_429() {
    let app = spawn_app_with(|config| config.rate_limit.max_requests = 2).await;

    for i in 0..2 {
        let body = format!(r#"{{"name": "Ann Lee", "email": "ann{}@example.com"}}"#, i);
        let response = app.post_subscribe(&body).await;
        assert_eq!(200, response.status().as_u16());
    }

    let response = app
        .post_subscribe(r#"{"name": "Ann Lee", "email": "ann3@example.com"}"#)
        .await;

    assert_eq!(429, response.status().as_u16());

    let body: serde_json::Value = response.json().await.expect("The body should be JSON.");
    assert_eq!(Some(false), body["success"].as_bool());
    assert_eq!(
        Some("Too many requests. Please try again later."),
        body["error"].as_str()
    );
}

#[tokio::test]
async fn the_count_endpoint_is_not_rate_limited() {
    let app = spawn_app_with(|config| config.rate_limit.max_requests = 1).await;

    for _ in 0..5 {
        let response = app.get_count().await;
        assert_eq!(200, response.status().as_u16());
    }
}

#[tokio::test]
async fn rejected_requests_do_not_reach_the_database() {
    let app = spawn_app_with(|config| config.rate_limit.max_requests = 1).await;

    app.post_subscribe(r#"{"name": "Ann Lee", "email": "ann@example.com"}"#)
        .await;
    app.post_subscribe(r#"{"name": "Bea Cruz", "email": "bea@example.com"}"#)
        .await;

    let count = sqlx::query("SELECT COUNT(*) AS count FROM subscribers")
        .fetch_one(&app.db_pool)
        .await
        .expect("The count query should succeed.");

    assert_eq!(1, count.get::<i64, _>("count"));
}
