//! Per-IP request ceiling for the subscribe endpoint.
//!
//! Fixed-window counters in a process-local map: state is lost on restart and
//! not shared between instances, which is acceptable here (no durability
//! requirement). Expired windows are reset lazily on the next request from
//! the same address.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use super::error::{AppError, AppResult};
use super::AppState;

pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<IpAddr, Window>>,
}

struct Window {
    count: u32,
    started_at: Instant,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Records a request from `ip` and reports whether it is still within
    /// the ceiling for the current window.
    pub fn check(&self, ip: IpAddr) -> bool {
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();

        let window = windows.entry(ip).or_insert(Window {
            count: 0,
            started_at: now,
        });
        if now.duration_since(window.started_at) >= self.window {
            window.count = 0;
            window.started_at = now;
        }

        if window.count >= self.max_requests {
            return false;
        }
        window.count += 1;
        true
    }
}

#[tracing::instrument(name = "enforcing the rate limit", skip_all)]
pub async fn enforce(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    let ip = client_ip(request.headers(), addr);
    if !state.rate_limiter.check(ip) {
        tracing::warn!(%ip, "rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    Ok(next.run(request).await)
}

// Behind a reverse proxy the peer address is the proxy itself; prefer the
// first hop recorded in X-Forwarded-For.
fn client_ip(headers: &HeaderMap, addr: SocketAddr) -> IpAddr {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or_else(|| addr.ip())
}
