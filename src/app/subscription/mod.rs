use axum::{middleware, routing::post, Router};

use super::{rate_limit, AppState};

pub mod route;
pub mod schema;

/// The subscribe endpoint is the only rate-limited surface, so the limiter
/// middleware is attached here rather than on the whole API.
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(route::subscribe))
        .layer(middleware::from_fn_with_state(state, rate_limit::enforce))
}
