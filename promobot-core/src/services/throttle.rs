// File: promobot-core/src/services/throttle.rs

use chrono::Duration;

use crate::config::DEFAULT_MAX_WRONG_ATTEMPTS;

/// Lockout duration is fixed at one hour from the moment the threshold is
/// reached.
pub fn lockout_duration() -> Duration {
    Duration::hours(1)
}

/// Counts consecutive invalid submissions and decides when a user enters
/// lockout. Pure policy: no store access, so it is testable in isolation.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    pub threshold: i32,
}

impl LockoutPolicy {
    pub fn new(threshold: i32) -> Self {
        Self { threshold }
    }

    /// One more failed submission. Returns the counter value to persist and
    /// whether the user enters lockout; entering lockout resets the counter
    /// to zero.
    pub fn register_failure(&self, current_attempts: i32) -> (i32, bool) {
        let attempts = current_attempts + 1;
        if attempts >= self.threshold {
            (0, true)
        } else {
            (attempts, false)
        }
    }

    /// How many more wrong submissions remain before lockout.
    pub fn attempts_left(&self, attempts: i32) -> i32 {
        (self.threshold - attempts).max(0)
    }
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self { threshold: DEFAULT_MAX_WRONG_ATTEMPTS }
    }
}
