//! Failed-login lockout counter.
//!
//! Lives in the persistent scope so the lock survives restarts. No timer:
//! expiry is checked lazily on the next access attempt.

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use argus_core::KeyValueStore;

use crate::config::{SessionConfig, keys};

pub(crate) struct Lockout {
    store: Arc<dyn KeyValueStore>,
    max_attempts: u32,
    lock_duration_ms: i64,
}

impl Lockout {
    pub(crate) fn new(store: Arc<dyn KeyValueStore>, config: &SessionConfig) -> Self {
        Self {
            store,
            max_attempts: config.max_login_attempts,
            lock_duration_ms: config.lock_duration_secs * 1000,
        }
    }

    /// Whether the account is currently locked. An elapsed lock is removed
    /// here rather than by a timer.
    pub(crate) fn is_locked(&self) -> bool {
        let Some(raw) = self.store.get(keys::LOCKED_UNTIL) else {
            return false;
        };
        let Ok(locked_until_ms) = raw.parse::<i64>() else {
            // Malformed deadline: treat as absent
            self.store.remove(keys::LOCKED_UNTIL);
            return false;
        };
        if Utc::now().timestamp_millis() < locked_until_ms {
            true
        } else {
            self.store.remove(keys::LOCKED_UNTIL);
            false
        }
    }

    /// Record a backend-rejected login. Reaching the attempt limit sets the
    /// lock deadline and resets the counter to zero.
    pub(crate) fn record_failure(&self) {
        let attempts = self
            .store
            .get(keys::LOGIN_ATTEMPTS)
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(0)
            + 1;

        if attempts >= self.max_attempts {
            let locked_until_ms = Utc::now().timestamp_millis() + self.lock_duration_ms;
            self.store
                .set(keys::LOCKED_UNTIL, &locked_until_ms.to_string());
            self.store.set(keys::LOGIN_ATTEMPTS, "0");
            warn!(attempts, "account locked after repeated login failures");
        } else {
            self.store.set(keys::LOGIN_ATTEMPTS, &attempts.to_string());
        }
    }

    /// Clear the counter and any lock (successful login or logout).
    pub(crate) fn reset(&self) {
        self.store.remove(keys::LOGIN_ATTEMPTS);
        self.store.remove(keys::LOCKED_UNTIL);
    }
}
