// File: promobot-core/src/repositories/postgres/redemption.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};

use promobot_common::error::Error;
use promobot_common::models::redemption::{RedeemedCode, UserWithCount};
use promobot_common::models::user::User;
use promobot_common::traits::repository_traits::RedemptionRepository;

#[derive(Clone)]
pub struct PostgresRedemptionRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresRedemptionRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RedemptionRepository for PostgresRedemptionRepository {
    async fn list_for_user(&self, account_id: i64) -> Result<Vec<RedeemedCode>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT code, submitted_at
            FROM redemptions
            WHERE account_id = $1
            ORDER BY submitted_at DESC
            "#,
        )
            .bind(account_id)
            .fetch_all(&self.pool)
            .await?;

        let mut result = Vec::new();
        for row in rows {
            result.push(RedeemedCode {
                code: row.try_get("code")?,
                submitted_at: row.try_get("submitted_at")?,
            });
        }
        Ok(result)
    }

    async fn sample_winners(&self, count: i64) -> Result<Vec<UserWithCount>, Error> {
        // Counts are aggregated per user before the random ordering, so a
        // user with many redemptions is exactly one candidate row and every
        // eligible user has equal selection probability.
        let rows = sqlx::query(
            r#"
            SELECT u.account_id,
                   u.full_name,
                   u.phone_number,
                   u.registered_at,
                   u.wrong_attempts,
                   u.blocked_until,
                   c.redemption_count
            FROM users u
            JOIN (
                SELECT account_id, COUNT(*) AS redemption_count
                FROM redemptions
                GROUP BY account_id
            ) c ON c.account_id = u.account_id
            ORDER BY RANDOM()
            LIMIT $1
            "#,
        )
            .bind(count)
            .fetch_all(&self.pool)
            .await?;

        let mut winners = Vec::new();
        for r in rows {
            winners.push(UserWithCount {
                user: User {
                    account_id: r.try_get("account_id")?,
                    full_name: r.try_get("full_name")?,
                    phone_number: r.try_get("phone_number")?,
                    registered_at: r.try_get::<DateTime<Utc>, _>("registered_at")?,
                    wrong_attempts: r.try_get("wrong_attempts")?,
                    blocked_until: r.try_get::<Option<DateTime<Utc>>, _>("blocked_until")?,
                },
                redemption_count: r.try_get("redemption_count")?,
            });
        }
        Ok(winners)
    }
}
