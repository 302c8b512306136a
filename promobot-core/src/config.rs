// promobot-core/src/config.rs

use anyhow::Context;

/// Tunables for the core, read from the environment (a `.env` file is
/// honored). Only two knobs govern core logic -- the lockout threshold and
/// the generated code length; the rest is store wiring.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub max_wrong_attempts: i32,
    pub code_length: usize,
    /// Capability token for the admin surface. `None` (or empty) refuses
    /// every admin request.
    pub admin_token: Option<String>,
}

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_MAX_WRONG_ATTEMPTS: i32 = 4;
pub const DEFAULT_CODE_LENGTH: usize = 8;

impl CoreConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .context("DATABASE_URL must be set")?;

        let max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(v) => v.parse().context("DATABASE_MAX_CONNECTIONS must be an integer")?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        let max_wrong_attempts = match std::env::var("MAX_WRONG_ATTEMPTS") {
            Ok(v) => v.parse().context("MAX_WRONG_ATTEMPTS must be an integer")?,
            Err(_) => DEFAULT_MAX_WRONG_ATTEMPTS,
        };

        let code_length = match std::env::var("PROMO_CODE_LENGTH") {
            Ok(v) => v.parse().context("PROMO_CODE_LENGTH must be an integer")?,
            Err(_) => DEFAULT_CODE_LENGTH,
        };

        let admin_token = std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty());

        Ok(Self {
            database_url,
            max_connections,
            max_wrong_attempts,
            code_length,
            admin_token,
        })
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            max_wrong_attempts: DEFAULT_MAX_WRONG_ATTEMPTS,
            code_length: DEFAULT_CODE_LENGTH,
            admin_token: None,
        }
    }
}
