// File: promobot-common/src/models/promo_code.rs

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a promo code. Exactly one transition is legal:
/// `Unused` -> `Used`, performed atomically with the redemption insert.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
#[sqlx(rename_all = "lowercase")]
pub enum CodeStatus {
    Unused,
    Used,
}

impl fmt::Display for CodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeStatus::Unused => write!(f, "unused"),
            CodeStatus::Used => write!(f, "used"),
        }
    }
}

impl FromStr for CodeStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unused" => Ok(CodeStatus::Unused),
            "used" => Ok(CodeStatus::Used),
            _ => Err(format!("Unknown code status: {}", s)),
        }
    }
}

/// A single-use promotional code.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PromoCode {
    pub code: String,
    pub status: CodeStatus,
    pub created_at: DateTime<Utc>,
}

impl PromoCode {
    pub fn is_used(&self) -> bool {
        self.status == CodeStatus::Used
    }
}
