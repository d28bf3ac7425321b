//! Fixed-window rate limiting per client

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::errors::{AppError, AppResult};

use super::config::RateLimitConfig;

/// Tracked clients before expired windows are swept
const SWEEP_THRESHOLD: usize = 10_000;

/// Longest window honoured, one year
const MAX_WINDOW_SECS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Default)]
struct Windows {
    /// client -> (count, window_start)
    clients: HashMap<String, (u32, DateTime<Utc>)>,
    last_sweep: Option<DateTime<Utc>>,
}

/// Request counter per client key
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Mutex<Windows>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(Windows::default()),
        }
    }

    /// Number of clients with a tracked window
    pub fn tracked_clients(&self) -> usize {
        self.windows.lock().map(|w| w.clients.len()).unwrap_or(0)
    }

    fn window(&self) -> Duration {
        let secs = i64::try_from(self.config.window_secs).unwrap_or(MAX_WINDOW_SECS);
        Duration::seconds(secs.min(MAX_WINDOW_SECS))
    }

    /// Count one request from `client` at `now`
    pub fn check(&self, client: &str, now: DateTime<Utc>) -> AppResult<()> {
        let window = self.window();
        let mut windows = self
            .windows
            .lock()
            .map_err(|_| AppError::internal("Rate limiter lock poisoned"))?;

        // At most one sweep per window, however many clients are live
        let sweep_due = windows.last_sweep.map_or(true, |at| now - at >= window);
        if sweep_due && windows.clients.len() >= SWEEP_THRESHOLD {
            windows.clients.retain(|_, (_, start)| now - *start < window);
            windows.last_sweep = Some(now);
        }

        let entry = windows.clients.entry(client.to_string()).or_insert((0, now));

        // Reset if in new window
        if now - entry.1 >= window {
            *entry = (0, now);
        }

        if entry.0 >= self.config.max_requests {
            let retry_after = (entry.1 + window - now).num_seconds().max(1);
            return Err(AppError::rate_limit("Rate limit exceeded")
                .with_field("retryAfter", retry_after)
                .with_field("limit", self.config.max_requests));
        }

        entry.0 += 1;
        Ok(())
    }
}

/// Paths that count against the limit
pub fn is_limited_path(path: &str) -> bool {
    path.starts_with("/api") || path.contains("/contact")
}
