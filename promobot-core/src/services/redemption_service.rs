// File: promobot-core/src/services/redemption_service.rs

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use promobot_common::error::Error;
use promobot_common::models::redemption::RedeemedCode;
use promobot_common::traits::repository_traits::{
    PromoCodeRepository, RedemptionRepository, UserRepository,
};

use crate::services::throttle::{self, LockoutPolicy};

/// Outcome of one code submission, rendered by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The code was valid and is now bound to this user.
    Accepted,
    /// The code exists but was claimed earlier -- possibly a moment earlier
    /// by a concurrent submission.
    AlreadyUsed,
    /// No such code; `attempts_left` tells the user how close they are to
    /// lockout.
    Invalid { attempts_left: i32 },
    /// The user is locked out; nothing was looked up or mutated.
    Blocked,
}

/// The redemption engine: validates a submitted code against a user,
/// enforces at-most-once use, and keeps the attempt/lockout state.
pub struct RedemptionService {
    users: Arc<dyn UserRepository>,
    codes: Arc<dyn PromoCodeRepository>,
    redemptions: Arc<dyn RedemptionRepository>,
    policy: LockoutPolicy,
}

impl RedemptionService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        codes: Arc<dyn PromoCodeRepository>,
        redemptions: Arc<dyn RedemptionRepository>,
        policy: LockoutPolicy,
    ) -> Self {
        Self { users, codes, redemptions, policy }
    }

    /// Codes are generated uppercase only; submissions are matched
    /// case-insensitively.
    fn normalize(raw_code: &str) -> String {
        raw_code.trim().to_uppercase()
    }

    pub async fn submit(&self, account_id: i64, raw_code: &str) -> Result<SubmitOutcome, Error> {
        let code = Self::normalize(raw_code);

        if self.users.is_blocked(account_id).await? {
            return Ok(SubmitOutcome::Blocked);
        }

        let promo = match self.codes.lookup(&code).await? {
            Some(p) => p,
            None => return self.register_wrong_attempt(account_id).await,
        };

        if promo.is_used() {
            // A claimed code is not evidence of guessing: no attempt penalty,
            // unlike the nonexistent-code branch.
            return Ok(SubmitOutcome::AlreadyUsed);
        }

        if self.codes.redeem(&code, account_id).await? {
            self.users.set_wrong_attempts(account_id, 0).await?;
            info!("account {}: redeemed code {}", account_id, code);
            Ok(SubmitOutcome::Accepted)
        } else {
            // Lost the race: a concurrent submission claimed the code between
            // our lookup and the redeem transaction.
            info!("account {}: code {} was claimed concurrently", account_id, code);
            Ok(SubmitOutcome::AlreadyUsed)
        }
    }

    async fn register_wrong_attempt(&self, account_id: i64) -> Result<SubmitOutcome, Error> {
        let current = match self.users.get(account_id).await? {
            Some(user) => user.wrong_attempts,
            None => 0,
        };

        let (attempts, should_lock) = self.policy.register_failure(current);
        self.users.set_wrong_attempts(account_id, attempts).await?;

        if should_lock {
            let until = Utc::now() + throttle::lockout_duration();
            self.users.set_blocked_until(account_id, until).await?;
            warn!("account {}: locked out until {}", account_id, until);
            Ok(SubmitOutcome::Blocked)
        } else {
            Ok(SubmitOutcome::Invalid {
                attempts_left: self.policy.attempts_left(attempts),
            })
        }
    }

    /// The user's confirmed redemptions, most recent first.
    pub async fn history(&self, account_id: i64) -> Result<Vec<RedeemedCode>, Error> {
        self.redemptions.list_for_user(account_id).await
    }
}
