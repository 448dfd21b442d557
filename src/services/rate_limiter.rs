use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use super::clock::Clock;

/// Fixed-window request counter keyed by client (usually its IP).
pub struct RateLimiter {
    clock: Arc<dyn Clock>,
    window: Duration,
    max_hits: u32,
    windows: Mutex<HashMap<String, Window>>,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: DateTime<Utc>,
    hits: u32,
}

/// Rejection from [`RateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limited {
    pub retry_after_secs: i64,
}

// Stale windows are only swept once the map grows past this.
const SWEEP_THRESHOLD: usize = 1024;

impl RateLimiter {
    pub fn new(clock: Arc<dyn Clock>, window: Duration, max_hits: u32) -> Self {
        RateLimiter {
            clock,
            window,
            max_hits,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Three password reset requests per client per 15 minutes.
    pub fn password_reset(clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, Duration::minutes(15), 3)
    }

    /// Count a hit for `key`. Returns the hits left in the window.
    pub fn check(&self, key: &str) -> Result<u32, Limited> {
        let now = self.clock.now();
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        if windows.len() > SWEEP_THRESHOLD {
            let window = self.window;
            windows.retain(|_, w| now - w.started < window);
        }

        let entry = windows.entry(key.to_string()).or_insert(Window { started: now, hits: 0 });
        if now - entry.started >= self.window {
            *entry = Window { started: now, hits: 0 };
        }
        if entry.hits >= self.max_hits {
            let retry = (entry.started + self.window - now).num_seconds().max(1);
            return Err(Limited { retry_after_secs: retry });
        }
        entry.hits += 1;
        Ok(self.max_hits - entry.hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::ManualClock;

    #[test]
    fn allows_max_hits_then_limits() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let limiter = RateLimiter::password_reset(clock.clone());

        assert_eq!(limiter.check("1.2.3.4"), Ok(2));
        assert_eq!(limiter.check("1.2.3.4"), Ok(1));
        assert_eq!(limiter.check("1.2.3.4"), Ok(0));
        let limited = limiter.check("1.2.3.4").unwrap_err();
        assert_eq!(limited.retry_after_secs, 15 * 60);

        // other clients are unaffected
        assert!(limiter.check("5.6.7.8").is_ok());
    }

    #[test]
    fn window_resets() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let limiter = RateLimiter::new(clock.clone(), Duration::minutes(1), 1);

        assert!(limiter.check("a").is_ok());
        clock.advance(Duration::seconds(30));
        assert_eq!(limiter.check("a"), Err(Limited { retry_after_secs: 30 }));
        clock.advance(Duration::seconds(30));
        assert!(limiter.check("a").is_ok());
    }
}
