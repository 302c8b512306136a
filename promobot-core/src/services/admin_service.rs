// File: promobot-core/src/services/admin_service.rs

use std::sync::Arc;

use tracing::info;

use promobot_common::error::Error;
use promobot_common::models::redemption::UserWithCount;
use promobot_common::traits::repository_traits::{
    PromoCodeRepository, RedemptionRepository, UserRepository,
};

use crate::utils::codegen;

/// Largest code batch an admin may request in one operation.
pub const MAX_BATCH_SIZE: usize = 10_000;

/// Admin surface: batch code generation, participation stats, and winner
/// draws. Callers are expected to have passed an `AdminAuthorizer` check
/// before reaching these operations.
pub struct AdminService {
    users: Arc<dyn UserRepository>,
    codes: Arc<dyn PromoCodeRepository>,
    redemptions: Arc<dyn RedemptionRepository>,
    code_length: usize,
}

impl AdminService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        codes: Arc<dyn PromoCodeRepository>,
        redemptions: Arc<dyn RedemptionRepository>,
        code_length: usize,
    ) -> Self {
        Self { users, codes, redemptions, code_length }
    }

    /// Generate `count` fresh codes and store them in one all-or-nothing
    /// batch. Returns the batch sorted, for stable presentation by the
    /// caller.
    pub async fn generate_codes(&self, count: usize) -> Result<Vec<String>, Error> {
        if count == 0 || count > MAX_BATCH_SIZE {
            return Err(Error::Validation(format!(
                "code batch size must be between 1 and {}, got {}",
                MAX_BATCH_SIZE, count
            )));
        }

        let batch = codegen::generate_codes(count, self.code_length);
        let inserted = self.codes.insert_bulk(&batch).await?;
        info!("generated {} codes ({} newly stored)", batch.len(), inserted);

        let mut sorted: Vec<String> = batch.into_iter().collect();
        sorted.sort();
        Ok(sorted)
    }

    /// Total number of codes that have been redeemed.
    pub async fn confirmed_code_count(&self) -> Result<i64, Error> {
        self.codes.count_used().await
    }

    /// Every registered participant with their redemption count, newest
    /// registration first.
    pub async fn list_participants(&self) -> Result<Vec<UserWithCount>, Error> {
        self.users.list_with_counts().await
    }

    /// Draw up to `count` distinct winners among users holding at least one
    /// redemption. Fewer rows come back when fewer users are eligible.
    pub async fn draw_winners(&self, count: i64) -> Result<Vec<UserWithCount>, Error> {
        if count < 1 {
            return Err(Error::Validation(format!(
                "winner count must be at least 1, got {}",
                count
            )));
        }
        let winners = self.redemptions.sample_winners(count).await?;
        info!("drew {} winners (requested {})", winners.len(), count);
        Ok(winners)
    }
}
