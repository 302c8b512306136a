use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Error;
use crate::models::promo_code::PromoCode;
use crate::models::redemption::{RedeemedCode, UserWithCount};
use crate::models::user::User;

/// Store operations on registered participants.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user, or overwrite name/phone for an existing one.
    /// Throttle state (`wrong_attempts`, `blocked_until`) is left untouched
    /// on re-registration.
    async fn upsert(&self, account_id: i64, full_name: &str, phone_number: &str)
        -> Result<(), Error>;

    async fn get(&self, account_id: i64) -> Result<Option<User>, Error>;

    async fn exists(&self, account_id: i64) -> Result<bool, Error>;

    async fn set_wrong_attempts(&self, account_id: i64, attempts: i32) -> Result<(), Error>;

    async fn set_blocked_until(&self, account_id: i64, until: DateTime<Utc>) -> Result<(), Error>;

    /// True iff `blocked_until` is set and strictly later than the database
    /// clock. Evaluated in the store so one clock decides lockout expiry.
    async fn is_blocked(&self, account_id: i64) -> Result<bool, Error>;

    /// Every registered user with their confirmed-redemption count, newest
    /// registration first.
    async fn list_with_counts(&self) -> Result<Vec<UserWithCount>, Error>;
}

/// Store operations on promo codes.
#[async_trait]
pub trait PromoCodeRepository: Send + Sync {
    /// Returns false (without error) when the code already exists.
    async fn insert(&self, code: &str) -> Result<bool, Error>;

    /// All-or-nothing batch insert. Codes already present are silently
    /// skipped. Returns the number of rows actually inserted.
    async fn insert_bulk(&self, codes: &HashSet<String>) -> Result<u64, Error>;

    async fn lookup(&self, code: &str) -> Result<Option<PromoCode>, Error>;

    /// Flip the code to `used` and record the redemption, as one
    /// transaction. Returns false when the code is absent or was already
    /// claimed -- including by a concurrent submission that won the race.
    async fn redeem(&self, code: &str, account_id: i64) -> Result<bool, Error>;

    async fn count_used(&self) -> Result<i64, Error>;
}

/// Store queries over the user<->code redemption links.
#[async_trait]
pub trait RedemptionRepository: Send + Sync {
    /// A user's confirmed redemptions, most recent first.
    async fn list_for_user(&self, account_id: i64) -> Result<Vec<RedeemedCode>, Error>;

    /// Uniform random sample without replacement of at most `count` users
    /// holding at least one redemption, one row per user. Redemption counts
    /// are reported but never weight selection.
    async fn sample_winners(&self, count: i64) -> Result<Vec<UserWithCount>, Error>;
}
