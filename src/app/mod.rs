use std::{
    io,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{CountCacheSettings, RateLimitSettings, Settings};

use self::count::cache::CountCache;
use self::rate_limit::RateLimiter;

pub mod count;
pub mod error;
pub mod health;
pub mod rate_limit;
pub mod subscription;
pub mod ui;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub count_cache: Arc<CountCache>,
    pub rate_limiter: Arc<RateLimiter>,
}

fn app_router(state: AppState) -> Router {
    // The browser form posts cross-origin during local development; both API
    // endpoints answer preflights and carry permissive CORS headers.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    let api = subscription::router(state.clone())
        .merge(count::router())
        .layer(cors);

    health::router()
        .merge(ui::router())
        .nest("/api", api)
        .fallback(ui::not_found::not_found_page)
        .with_state(state)
}

pub struct App {
    listener: TcpListener,
    rate_limit: RateLimitSettings,
    count_cache: CountCacheSettings,
}

impl App {
    pub async fn with(config: Settings) -> Self {
        let listener = tokio::net::TcpListener::bind(format!(
            "{}:{}",
            config.application.host, config.application.port
        ))
        .await
        .expect("The listener should be able to bind the address.");

        Self {
            listener,
            rate_limit: config.rate_limit,
            count_cache: config.count_cache,
        }
    }

    pub fn host(&self) -> IpAddr {
        self.listener.local_addr().unwrap().ip()
    }

    pub fn port(&self) -> u16 {
        self.listener.local_addr().unwrap().port()
    }

    pub async fn serve(self, db: PgPool) -> Result<(), io::Error> {
        let state = AppState {
            db,
            count_cache: Arc::new(CountCache::new(self.count_cache.ttl())),
            rate_limiter: Arc::new(RateLimiter::new(
                self.rate_limit.max_requests,
                self.rate_limit.window(),
            )),
        };

        let app = app_router(state).layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let id = uuid::Uuid::new_v4();
                tracing::info_span!(
                    "request",
                    method = ?request.method(),
                    uri = ?request.uri(),
                    %id,
                )
            }),
        );

        // The rate limiter keys on the peer address, so the router is served
        // with connect info.
        axum::serve(
            self.listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
    }
}
