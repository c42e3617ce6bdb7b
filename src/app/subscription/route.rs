use anyhow::Context;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::instrument;

use crate::app::error::{AppError, AppResult};
use crate::app::AppState;
use crate::domain::subscriber::NewSubscriber;
use crate::storage;

use super::schema::{SubscribeBody, SubscribeResponse};

#[instrument(name = "adding a new subscriber", skip_all)]
pub async fn subscribe(
    State(state): State<AppState>,
    body: Result<Json<SubscribeBody>, JsonRejection>,
) -> AppResult<Json<SubscribeResponse>> {
    let Json(body) = body.map_err(AppError::MalformedBody)?;
    let new_subscriber = NewSubscriber::try_from(body).map_err(AppError::Validation)?;

    // The existence check and the insert can race under concurrent identical
    // submissions; the unique index on email turns the loser into the same
    // duplicate answer.
    if storage::email_exists(&state.db, new_subscriber.email.as_ref())
        .await
        .context("failed to check whether the email is already subscribed")?
    {
        return Err(AppError::DuplicateEmail);
    }

    let subscriber = storage::insert_subscriber(&state.db, &new_subscriber).await?;
    tracing::info!(id = %subscriber.id, email = %subscriber.email, "new subscriber added");

    Ok(Json(SubscribeResponse::new(subscriber.id)))
}
