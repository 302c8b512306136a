// File: promobot-core/tests/integration/repository_tests.rs

use std::collections::HashSet;

use chrono::{Duration, Utc};

use promobot_common::models::promo_code::CodeStatus;
use promobot_core::repositories::postgres::{
    PostgresPromoCodeRepository, PostgresRedemptionRepository, PostgresUserRepository,
};
use promobot_core::repositories::{
    PromoCodeRepository, RedemptionRepository, UserRepository,
};
use promobot_core::Error;

use crate::test_utils::helpers::setup_test_database;

#[tokio::test]
async fn test_user_repository() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let repo = PostgresUserRepository::new(db.pool().clone());

    // Create
    repo.upsert(1001, "Aliyev Ali", "+998901234567").await?;
    assert!(repo.exists(1001).await?);
    assert!(!repo.exists(9999).await?);

    let user = repo.get(1001).await?.expect("user should exist");
    assert_eq!(user.full_name, "Aliyev Ali");
    assert_eq!(user.wrong_attempts, 0);
    assert!(user.blocked_until.is_none());

    // Throttle state survives re-registration.
    repo.set_wrong_attempts(1001, 2).await?;
    repo.upsert(1001, "Aliyev Vali", "+998907654321").await?;
    let user = repo.get(1001).await?.expect("user should exist");
    assert_eq!(user.full_name, "Aliyev Vali");
    assert_eq!(user.phone_number, "+998907654321");
    assert_eq!(user.wrong_attempts, 2);

    // Lockout checks run against the database clock.
    assert!(!repo.is_blocked(1001).await?);
    repo.set_blocked_until(1001, Utc::now() + Duration::hours(1)).await?;
    assert!(repo.is_blocked(1001).await?);
    repo.set_blocked_until(1001, Utc::now() - Duration::hours(1)).await?;
    assert!(!repo.is_blocked(1001).await?);

    // Unknown users are simply not blocked.
    assert!(!repo.is_blocked(9999).await?);

    Ok(())
}

#[tokio::test]
async fn test_promo_code_repository() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let users = PostgresUserRepository::new(db.pool().clone());
    let codes = PostgresPromoCodeRepository::new(db.pool().clone());

    // Duplicate single insert is reported, not raised.
    assert!(codes.insert("AAAA1111").await?);
    assert!(!codes.insert("AAAA1111").await?);

    let promo = codes.lookup("AAAA1111").await?.expect("code should exist");
    assert_eq!(promo.status, CodeStatus::Unused);
    assert!(codes.lookup("MISSING1").await?.is_none());
    assert_eq!(codes.count_used().await?, 0);

    // Redeem flips the status and records the link, exactly once.
    users.upsert(2001, "Test User", "+998900000001").await?;
    assert!(codes.redeem("AAAA1111", 2001).await?);
    assert_eq!(codes.lookup("AAAA1111").await?.unwrap().status, CodeStatus::Used);
    assert_eq!(codes.count_used().await?, 1);

    assert!(!codes.redeem("AAAA1111", 2001).await?);
    assert!(!codes.redeem("MISSING1", 2001).await?);
    assert_eq!(codes.count_used().await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_bulk_insert_is_idempotent() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let codes = PostgresPromoCodeRepository::new(db.pool().clone());

    assert!(codes.insert("OLDCODE1").await?);

    let batch: HashSet<String> = ["OLDCODE1", "NEWCODE1", "NEWCODE2"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    // The existing code is skipped silently.
    assert_eq!(codes.insert_bulk(&batch).await?, 2);

    // Replaying the whole batch changes nothing.
    assert_eq!(codes.insert_bulk(&batch).await?, 0);
    for code in &batch {
        assert!(codes.lookup(code).await?.is_some());
    }

    Ok(())
}

#[tokio::test]
async fn test_redemption_listing_is_most_recent_first() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let users = PostgresUserRepository::new(db.pool().clone());
    let codes = PostgresPromoCodeRepository::new(db.pool().clone());
    let redemptions = PostgresRedemptionRepository::new(db.pool().clone());

    users.upsert(3001, "History User", "+998900000002").await?;
    for code in ["HIST0001", "HIST0002", "HIST0003"] {
        codes.insert(code).await?;
        codes.redeem(code, 3001).await?;
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    let history = redemptions.list_for_user(3001).await?;
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].code, "HIST0003");
    assert_eq!(history[2].code, "HIST0001");
    assert!(history[0].submitted_at >= history[1].submitted_at);

    // A user with no redemptions gets an empty list.
    users.upsert(3002, "Empty User", "+998900000003").await?;
    assert!(redemptions.list_for_user(3002).await?.is_empty());

    Ok(())
}
