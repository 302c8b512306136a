use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered participant, keyed by the opaque numeric account id supplied
/// by the front end. `wrong_attempts` and `blocked_until` belong to the
/// redemption throttle and survive re-registration.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct User {
    pub account_id: i64,
    pub full_name: String,
    pub phone_number: String,
    pub registered_at: DateTime<Utc>,
    pub wrong_attempts: i32,
    pub blocked_until: Option<DateTime<Utc>>,
}

impl User {
    /// Whether the lockout timestamp lies in the future relative to `now`.
    /// The store-side check (`UserRepository::is_blocked`) is authoritative;
    /// this is a convenience for callers that already hold the row.
    pub fn is_blocked_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.blocked_until, Some(until) if until > now)
    }
}
