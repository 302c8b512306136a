// File: promobot-core/src/auth/mod.rs

use async_trait::async_trait;

use promobot_common::error::Error;
pub use promobot_common::traits::auth_traits::AdminAuthorizer;

/// Capability-token authorizer backed by a single configured token. When no
/// token is configured the admin surface is closed: every request is
/// refused.
pub struct StaticTokenAuthorizer {
    token: Option<String>,
}

impl StaticTokenAuthorizer {
    pub fn new(token: Option<String>) -> Self {
        Self { token: token.filter(|t| !t.is_empty()) }
    }
}

#[async_trait]
impl AdminAuthorizer for StaticTokenAuthorizer {
    async fn authorize(&self, token: &str) -> Result<bool, Error> {
        Ok(matches!(&self.token, Some(expected) if expected == token))
    }
}
