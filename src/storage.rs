//! Thin data-access layer over the `subscribers` table.
//!
//! The pre-insert existence check and the insert are not atomic; the unique
//! index on `email` is the backstop, and a violation surfaces as
//! [`StorageError::DuplicateEmail`] so concurrent duplicate signups collapse
//! into the same conflict answer.

use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::subscriber::{NewSubscriber, Subscriber};

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("the email is already subscribed")]
    DuplicateEmail,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(
    name = "inserting new subscriber into the database",
    skip(pool, subscriber),
    fields(email = %subscriber.email, name = %subscriber.name)
)]
pub async fn insert_subscriber(
    pool: &PgPool,
    subscriber: &NewSubscriber,
) -> Result<Subscriber, StorageError> {
    let subscriber = sqlx::query(
        r#"
        INSERT INTO subscribers (id, name, email, subscribed_to_updates, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        RETURNING id, name, email, subscribed_to_updates, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(subscriber.name.as_ref())
    .bind(subscriber.email.as_ref())
    .bind(subscriber.subscribed_to_updates)
    .bind(Utc::now())
    .map(subscriber_from_row)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!(detail = e.to_string(), "failed to save new subscriber");
        if is_unique_violation(&e) {
            StorageError::DuplicateEmail
        } else {
            StorageError::Database(e)
        }
    })?;

    Ok(subscriber)
}

#[tracing::instrument(name = "checking whether an email is already subscribed", skip(pool))]
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT id FROM subscribers WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            tracing::error!(detail = e.to_string(), "failed to look up email");
            e
        })?;

    Ok(row.is_some())
}

#[tracing::instrument(name = "counting subscribers", skip(pool))]
pub async fn subscriber_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM subscribers")
        .fetch_one(pool)
        .await
        .map_err(|e| {
            tracing::error!(detail = e.to_string(), "failed to count subscribers");
            e
        })?;

    Ok(row.get("count"))
}

/// Administrative listing, newest signups first.
#[tracing::instrument(name = "listing all subscribers", skip(pool))]
pub async fn all_subscribers(pool: &PgPool) -> Result<Vec<Subscriber>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT id, name, email, subscribed_to_updates, created_at, updated_at
        FROM subscribers
        ORDER BY created_at DESC
        "#,
    )
    .map(subscriber_from_row)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!(detail = e.to_string(), "failed to list subscribers");
        e
    })
}

/// Administrative path: flip the opt-in flag for an existing subscriber.
/// Returns `None` when the email is not on the waitlist.
#[tracing::instrument(name = "updating subscription status", skip(pool))]
pub async fn update_subscription_status(
    pool: &PgPool,
    email: &str,
    subscribed_to_updates: bool,
) -> Result<Option<Subscriber>, sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE subscribers
        SET subscribed_to_updates = $2, updated_at = $3
        WHERE email = $1
        RETURNING id, name, email, subscribed_to_updates, created_at, updated_at
        "#,
    )
    .bind(email)
    .bind(subscribed_to_updates)
    .bind(Utc::now())
    .map(subscriber_from_row)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!(detail = e.to_string(), "failed to update subscription status");
        e
    })
}

fn subscriber_from_row(row: PgRow) -> Subscriber {
    Subscriber {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        subscribed_to_updates: row.get("subscribed_to_updates"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
