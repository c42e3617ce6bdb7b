use askama::Template;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::app::ui::format;
use crate::app::AppState;
use crate::storage;

#[derive(Template)]
#[template(path = "index.html")]
struct HomeTemplate {
    subscriber_message: String,
}

/// Renders the landing page with a server-side initial count; the page
/// refreshes it from `/api/count` afterwards. A database hiccup degrades to
/// the countless hero line instead of failing the page.
#[tracing::instrument(name = "Home page", skip(state))]
pub async fn home_page(State(state): State<AppState>) -> impl IntoResponse {
    let count = match state.count_cache.get() {
        Some(count) => Some(count),
        None => match storage::subscriber_count(&state.db).await {
            Ok(count) => {
                state.count_cache.put(count);
                Some(count)
            }
            Err(e) => {
                tracing::warn!(detail = e.to_string(), "no subscriber count for the home page");
                None
            }
        },
    };

    HomeTemplate {
        subscriber_message: format::subscriber_message(count),
    }
}
