// src/repositories/mod.rs

pub mod postgres;

pub use postgres::promo_code::PostgresPromoCodeRepository;
pub use postgres::redemption::PostgresRedemptionRepository;
pub use postgres::user::PostgresUserRepository;

pub use promobot_common::traits::repository_traits::{
    PromoCodeRepository, RedemptionRepository, UserRepository,
};
