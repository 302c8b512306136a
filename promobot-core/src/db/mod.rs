// promobot-core/src/db/mod.rs

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::Error;

/// Shared handle over the Postgres connection pool. Constructed once at
/// startup and injected into the repositories; the pool is the only shared
/// mutable resource in the process.
#[derive(Clone)]
pub struct Database {
    pool: Pool<Postgres>,
}

impl Database {
    /// Connect with an explicit pool size.
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!("connected to Postgres ({} max connections)", max_connections);
        Ok(Self { pool })
    }

    /// Run migrations in the workspace `migrations/` folder. Schema creation
    /// is idempotent, so this is safe to run on every startup.
    pub async fn migrate(&self) -> Result<(), Error> {
        info!("applying migrations");
        sqlx::migrate!("../migrations").run(&self.pool).await?;
        info!("migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }

    pub fn from_pool(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}
