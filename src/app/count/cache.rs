use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Single-value, in-process cache for the subscriber count.
///
/// Process-local and lost on restart; a zero TTL disables caching, which the
/// integration tests rely on.
pub struct CountCache {
    ttl: Duration,
    slot: Mutex<Option<CachedCount>>,
}

struct CachedCount {
    count: i64,
    fetched_at: Instant,
}

impl CountCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub fn get(&self) -> Option<i64> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| cached.count)
    }

    pub fn put(&self, count: i64) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(CachedCount {
            count,
            fetched_at: Instant::now(),
        });
    }
}
