use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// In-memory rate limiter keyed by "<bucket>:<ip_hash>" — one bucket per
/// surface that accepts anonymous writes (login, contact, feedback).
pub struct RateLimiter {
    entries: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        RateLimiter {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Record an attempt and return true if it is allowed (under the limit
    /// for the window). Attempts outside the window are pruned first.
    pub fn check_and_record(&self, key: &str, max_attempts: u64, window: Duration) -> bool {
        let mut map = self.entries.lock().unwrap();
        let now = Instant::now();
        let cutoff = now - window;

        let attempts = map.entry(key.to_string()).or_default();
        attempts.retain(|t| *t > cutoff);

        if (attempts.len() as u64) < max_attempts {
            attempts.push(now);
            true
        } else {
            false
        }
    }

    /// Drop keys whose every attempt is older than max_age.
    pub fn cleanup(&self, max_age: Duration) {
        let mut map = self.entries.lock().unwrap();
        let cutoff = Instant::now() - max_age;
        map.retain(|_, attempts| {
            attempts.retain(|t| *t > cutoff);
            !attempts.is_empty()
        });
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
