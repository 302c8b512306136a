// File: promobot-core/src/services/mod.rs

pub mod admin_service;
pub mod redemption_service;
pub mod registration_service;
pub mod throttle;

pub use admin_service::AdminService;
pub use redemption_service::{RedemptionService, SubmitOutcome};
pub use registration_service::RegistrationService;
pub use throttle::LockoutPolicy;
