use anyhow::Context;
use axum::{extract::State, Json};

use crate::app::error::AppResult;
use crate::app::AppState;
use crate::storage;

use super::schema::CountResponse;

#[tracing::instrument(name = "fetching the subscriber count", skip(state))]
pub async fn count(State(state): State<AppState>) -> AppResult<Json<CountResponse>> {
    if let Some(count) = state.count_cache.get() {
        return Ok(Json(CountResponse::cached(count)));
    }

    let count = storage::subscriber_count(&state.db)
        .await
        .context("failed to fetch the subscriber count")?;
    state.count_cache.put(count);

    Ok(Json(CountResponse::fresh(count)))
}
