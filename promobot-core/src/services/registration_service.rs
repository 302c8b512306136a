// File: promobot-core/src/services/registration_service.rs

use std::sync::Arc;

use tracing::error;

use promobot_common::error::Error;
use promobot_common::models::user::User;
use promobot_common::traits::repository_traits::UserRepository;

/// Participant registration. Registration is an idempotent upsert keyed by
/// the account id: re-registering overwrites name and phone but never the
/// throttle state.
pub struct RegistrationService {
    users: Arc<dyn UserRepository>,
}

impl RegistrationService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Returns false when the store rejects the write; the failure is logged
    /// here rather than raised, and the front end re-prompts.
    pub async fn register(&self, account_id: i64, full_name: &str, phone_number: &str) -> bool {
        match self.users.upsert(account_id, full_name, phone_number).await {
            Ok(()) => true,
            Err(e) => {
                error!("register: upsert failed for account {}: {}", account_id, e);
                false
            }
        }
    }

    pub async fn is_registered(&self, account_id: i64) -> Result<bool, Error> {
        self.users.exists(account_id).await
    }

    pub async fn profile(&self, account_id: i64) -> Result<Option<User>, Error> {
        self.users.get(account_id).await
    }
}
