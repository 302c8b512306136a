// src/repositories/postgres/user.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};

use promobot_common::error::Error;
use promobot_common::models::redemption::UserWithCount;
use promobot_common::models::user::User;
use promobot_common::traits::repository_traits::UserRepository;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresUserRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn upsert(&self, account_id: i64, full_name: &str, phone_number: &str)
        -> Result<(), Error>
    {
        // Re-registration overwrites name/phone only; wrong_attempts and
        // blocked_until keep their current values.
        sqlx::query(
            r#"
            INSERT INTO users (account_id, full_name, phone_number)
            VALUES ($1, $2, $3)
            ON CONFLICT (account_id)
            DO UPDATE SET full_name = EXCLUDED.full_name,
                          phone_number = EXCLUDED.phone_number
            "#,
        )
            .bind(account_id)
            .bind(full_name)
            .bind(phone_number)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get(&self, account_id: i64) -> Result<Option<User>, Error> {
        let row = sqlx::query(
            r#"
            SELECT account_id,
                   full_name,
                   phone_number,
                   registered_at,
                   wrong_attempts,
                   blocked_until
            FROM users
            WHERE account_id = $1
            "#,
        )
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(r) = row {
            Ok(Some(User {
                account_id: r.try_get("account_id")?,
                full_name: r.try_get("full_name")?,
                phone_number: r.try_get("phone_number")?,
                registered_at: r.try_get::<DateTime<Utc>, _>("registered_at")?,
                wrong_attempts: r.try_get("wrong_attempts")?,
                blocked_until: r.try_get::<Option<DateTime<Utc>>, _>("blocked_until")?,
            }))
        } else {
            Ok(None)
        }
    }

    async fn exists(&self, account_id: i64) -> Result<bool, Error> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (SELECT 1 FROM users WHERE account_id = $1) AS found
            "#,
        )
            .bind(account_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("found")?)
    }

    async fn set_wrong_attempts(&self, account_id: i64, attempts: i32) -> Result<(), Error> {
        sqlx::query("UPDATE users SET wrong_attempts = $1 WHERE account_id = $2")
            .bind(attempts)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_blocked_until(&self, account_id: i64, until: DateTime<Utc>) -> Result<(), Error> {
        sqlx::query("UPDATE users SET blocked_until = $1 WHERE account_id = $2")
            .bind(until)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn is_blocked(&self, account_id: i64) -> Result<bool, Error> {
        // Compared against the database clock, so lockout expiry is decided
        // by the same clock that set it.
        let row = sqlx::query(
            r#"
            SELECT blocked_until > now() AS is_blocked
            FROM users
            WHERE account_id = $1
            "#,
        )
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(r) = row {
            let blocked: Option<bool> = r.try_get("is_blocked")?;
            Ok(blocked.unwrap_or(false))
        } else {
            Ok(false)
        }
    }

    async fn list_with_counts(&self) -> Result<Vec<UserWithCount>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT u.account_id,
                   u.full_name,
                   u.phone_number,
                   u.registered_at,
                   u.wrong_attempts,
                   u.blocked_until,
                   COUNT(r.redemption_id) AS redemption_count
            FROM users u
            LEFT JOIN redemptions r ON r.account_id = u.account_id
            GROUP BY u.account_id, u.full_name, u.phone_number,
                     u.registered_at, u.wrong_attempts, u.blocked_until
            ORDER BY u.registered_at DESC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        let mut list = Vec::new();
        for r in rows {
            list.push(UserWithCount {
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
        Ok(list)
    }
}
