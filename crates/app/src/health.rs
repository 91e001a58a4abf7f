//! Health

use async_trait::async_trait;
use mockall::automock;

use crate::database::Db;

#[derive(Debug, Clone)]
pub struct PgHealthService {
    db: Db,
}

impl PgHealthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HealthService for PgHealthService {
    async fn ping_database(&self) -> Result<(), sqlx::Error> {
        self.db.ping().await
    }
}

#[automock]
#[async_trait]
pub trait HealthService: Send + Sync {
    /// Check the database answers.
    async fn ping_database(&self) -> Result<(), sqlx::Error>;
}
