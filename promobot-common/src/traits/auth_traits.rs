use async_trait::async_trait;

use crate::error::Error;

/// Gate in front of the admin operations. The conversational login flow is
/// owned by the front end; the core only ever sees a capability token and
/// asks this collaborator whether it grants the admin surface.
#[async_trait]
pub trait AdminAuthorizer: Send + Sync {
    async fn authorize(&self, token: &str) -> Result<bool, Error>;
}
