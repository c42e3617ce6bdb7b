use axum::{routing::get, Router};

use super::AppState;

pub mod cache;
pub mod route;
pub mod schema;

pub fn router() -> Router<AppState> {
    Router::new().route("/count", get(route::count))
}
