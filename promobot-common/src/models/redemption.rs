use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::User;

/// The durable link between one user and the one code they claimed.
/// Never mutated or deleted; `redemption_id` is a surrogate key that is not
/// observable outside the store.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Redemption {
    pub redemption_id: Uuid,
    pub account_id: i64,
    pub code: String,
    pub submitted_at: DateTime<Utc>,
}

/// One row of a user's redemption history.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RedeemedCode {
    pub code: String,
    pub submitted_at: DateTime<Utc>,
}

/// A user together with their total confirmed-redemption count, as returned
/// by participant listings and winner draws. The count is reporting data
/// only; it never weights winner selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWithCount {
    pub user: User,
    pub redemption_count: i64,
}
