use cxaudit_core::RateLimitConfig;
use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Narrow allow-or-deny capability keyed by client address. The backing
/// counter is pluggable; the pipeline only sees this trait.
pub trait RateLimiter: Send + Sync {
    fn allow(&self, key: &str) -> bool;
}

struct Window {
    count: u32,
    started_at: Instant,
}

/// Fixed-window in-process counter: single-instance only, volatile
/// across restarts. A multi-instance deployment needs a shared backend
/// behind the same trait.
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    windows: DashMap<String, Window>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: DashMap::new(),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, Duration::from_secs(config.window_secs))
    }

    /// Clock-injected variant so tests can advance time.
    fn allow_at(&self, key: &str, now: Instant) -> bool {
        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            started_at: now,
        });
        if now.duration_since(entry.started_at) >= self.window {
            entry.count = 0;
            entry.started_at = now;
        }
        if entry.count >= self.max_requests {
            return false;
        }
        entry.count += 1;
        true
    }
}

impl RateLimiter for FixedWindowLimiter {
    fn allow(&self, key: &str) -> bool {
        self.allow_at(key, Instant::now())
    }
}

/// Best-effort client key: first entry of x-forwarded-for, else a
/// sentinel shared by all unidentified callers.
pub fn client_key(headers: &axum::http::HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
