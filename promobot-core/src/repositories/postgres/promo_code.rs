// File: promobot-core/src/repositories/postgres/promo_code.rs

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use promobot_common::error::Error;
use promobot_common::models::promo_code::{CodeStatus, PromoCode};
use promobot_common::models::redemption::Redemption;
use promobot_common::traits::repository_traits::PromoCodeRepository;

#[derive(Clone)]
pub struct PostgresPromoCodeRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresPromoCodeRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromoCodeRepository for PostgresPromoCodeRepository {
    async fn insert(&self, code: &str) -> Result<bool, Error> {
        let res = sqlx::query(
            r#"
            INSERT INTO promo_codes (code, status)
            VALUES ($1, 'unused')
            ON CONFLICT (code) DO NOTHING
            "#,
        )
            .bind(code)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() == 1)
    }

    async fn insert_bulk(&self, codes: &HashSet<String>) -> Result<u64, Error> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;
        for code in codes {
            let res = sqlx::query(
                r#"
                INSERT INTO promo_codes (code, status)
                VALUES ($1, 'unused')
                ON CONFLICT (code) DO NOTHING
                "#,
            )
                .bind(code)
                .execute(&mut *tx)
                .await?;
            inserted += res.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }

    async fn lookup(&self, code: &str) -> Result<Option<PromoCode>, Error> {
        let row = sqlx::query(
            r#"
            SELECT code, status, created_at
            FROM promo_codes
            WHERE code = $1
            "#,
        )
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(r) = row {
            Ok(Some(PromoCode {
                code: r.try_get("code")?,
                status: r.try_get::<CodeStatus, _>("status")?,
                created_at: r.try_get("created_at")?,
            }))
        } else {
            Ok(None)
        }
    }

    async fn redeem(&self, code: &str, account_id: i64) -> Result<bool, Error> {
        let mut tx = self.pool.begin().await?;

        // Conditional flip: the row lock taken by this UPDATE is what makes
        // two racing submissions resolve to exactly one winner. Zero rows
        // affected means the code is absent or already claimed.
        let updated = sqlx::query(
            r#"
            UPDATE promo_codes
            SET status = 'used'
            WHERE code = $1 AND status = 'unused'
            "#,
        )
            .bind(code)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            // Dropping the transaction rolls it back.
            return Ok(false);
        }

        let redemption = Redemption {
            redemption_id: Uuid::new_v4(),
            account_id,
            code: code.to_string(),
            submitted_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO redemptions (redemption_id, account_id, code, submitted_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
            .bind(redemption.redemption_id)
            .bind(redemption.account_id)
            .bind(&redemption.code)
            .bind(redemption.submitted_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn count_used(&self) -> Result<i64, Error> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS used_count
            FROM promo_codes
            WHERE status = 'used'
            "#,
        )
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("used_count")?)
    }
}
